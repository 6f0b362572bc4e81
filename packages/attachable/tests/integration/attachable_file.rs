use attachable::{Attachable, AttachableError, DownloadState, RecordRef, StorageTarget};

use crate::common::{Showcase, TestApp};

mod declaration {
    use super::*;

    #[test]
    fn declares_every_attachment() {
        let registry = Showcase::registry();
        assert_eq!(registry.model(), "Showcase");
        assert_eq!(
            registry.attribute_names().collect::<Vec<_>>(),
            vec!["wonderful_img", "wonderful_video", "not_so_wonderful"]
        );
    }

    #[test]
    fn defaults_to_s3_with_a_bucket() {
        let config = Showcase::registry()
            .configuration_of("wonderful_img")
            .unwrap();
        assert_eq!(config.storage, StorageTarget::S3);
        assert!(!config.bucket.is_empty());
    }

    #[test]
    fn merges_options_with_defaults() {
        let registry = Showcase::registry();
        let img = registry.configuration_of("wonderful_img").unwrap();
        let video = registry.configuration_of("wonderful_video").unwrap();

        assert_eq!(img.path, "/path/of/wonder");
        assert_eq!(video.path, "/path/of/wonder-video");
        assert_eq!(img.storage, StorageTarget::S3);
    }

    #[test]
    fn adds_attachment_accessor() {
        let record = Showcase::default();
        assert_eq!(record.wonderful_img().path, "/path/of/wonder");
        assert!(!record.wonderful_img().bucket.is_empty());
        assert_eq!(record.wonderful_img().storage, StorageTarget::S3);
        assert_eq!(record.wonderful_video().path, "/path/of/wonder-video");
        assert_eq!(record.not_so_wonderful().path, "/path/of/less-wonder");
    }

    #[test]
    fn adds_remote_url_accessors() {
        let mut record = Showcase::default();
        assert_eq!(record.wonderful_img_remote_url(), None);
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar.jpg"));
        assert_eq!(record.wonderful_img_remote_url(), Some("http://foo.com/bar.jpg"));
        assert_eq!(record.not_so_wonderful_original_url(), None);
    }

    #[test]
    fn unknown_attachment_is_not_declared() {
        let record = Showcase::default();
        assert!(matches!(
            record.original_url("boring_img"),
            Err(AttachableError::NotDeclared { .. })
        ));
    }
}

mod remote_url_assignment {
    use super::*;

    #[tokio::test]
    async fn nil_assignment_returns_immediately() {
        let app = TestApp::new();
        let mut record = app.record(1);
        record.set_wonderful_img_remote_url(None);

        assert_eq!(record.pending_downloads().state(), &DownloadState::Idle);
        assert!(app.coordinator.after_save(&mut record).await.unwrap().is_none());
        assert_eq!(app.queue_size().await, 0);
    }

    #[test]
    fn stores_the_url_as_original_url() {
        let mut record = Showcase::default();
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar.jpg"));
        assert_eq!(record.wonderful_img_original_url(), Some("http://foo.com/bar.jpg"));
    }

    #[test]
    fn handles_paths_with_spaces() {
        let mut record = Showcase::default();
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar.jpg"));
        record.set_wonderful_img_remote_url(Some("http://foo.com/poster with spaces.jpg"));
        assert_eq!(
            record.wonderful_img_original_url(),
            Some("http://foo.com/poster%20with%20spaces.jpg")
        );
    }

    #[test]
    fn encodes_stray_percent_signs() {
        let mut record = Showcase::default();
        record.set_wonderful_img_remote_url(Some("http://foo.com/100%.jpg"));
        assert_eq!(
            record.wonderful_img_original_url(),
            Some("http://foo.com/100%25.jpg")
        );
    }

    #[test]
    fn arms_the_post_save_hook() {
        let mut record = Showcase::default();
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar.jpg"));
        assert!(record.pending_downloads().is_armed());
    }

    #[tokio::test]
    async fn queues_one_download_job_per_save() {
        let app = TestApp::new();
        let mut record = app.record(42);
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar.jpg"));

        app.coordinator.after_save(&mut record).await.unwrap();
        assert_eq!(app.queue_size().await, 1);

        app.coordinator.after_save(&mut record).await.unwrap();
        assert_eq!(app.queue_size().await, 1);

        let jobs = app.queued_jobs().await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].record, RecordRef::new("Showcase", "42"));
        assert_eq!(jobs[0].attachments, vec!["wonderful_img"]);
        // URL stays readable for the worker after the hook disarms.
        assert_eq!(record.wonderful_img_original_url(), Some("http://foo.com/bar.jpg"));
    }
}

mod multiple_attachments {
    use super::*;

    fn assigned_record(app: &TestApp) -> Showcase {
        let mut record = app.record(7);
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar.jpg"));
        record.set_wonderful_video_remote_url(Some("http://foo.com/bar.mp4"));
        record
    }

    #[tokio::test]
    async fn creates_one_job_per_record() {
        let app = TestApp::new();
        let mut record = assigned_record(&app);

        app.coordinator.after_save(&mut record).await.unwrap();
        assert_eq!(app.queue_size().await, 1);
    }

    #[tokio::test]
    async fn passes_each_assigned_attachment_name() {
        let app = TestApp::new();
        let mut record = assigned_record(&app);

        app.coordinator.after_save(&mut record).await.unwrap();

        let jobs = app.queued_jobs().await;
        assert_eq!(jobs[0].attachments, vec!["wonderful_img", "wonderful_video"]);
    }

    #[tokio::test]
    async fn each_save_batches_its_own_assignments() {
        let app = TestApp::new();
        let mut record = assigned_record(&app);
        app.coordinator.after_save(&mut record).await.unwrap();

        record.set_not_so_wonderful_remote_url(Some("http://foo.com/meh.gif"));
        record.set_wonderful_img_remote_url(Some("http://foo.com/bar2.jpg"));
        app.coordinator.after_save(&mut record).await.unwrap();

        let jobs = app.queued_jobs().await;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].attachments, vec!["not_so_wonderful", "wonderful_img"]);
        assert_ne!(jobs[0].job_id, jobs[1].job_id);
    }

    #[tokio::test]
    async fn records_enqueue_independently() {
        let app = TestApp::new();
        let mut first = assigned_record(&app);
        let mut second = app.record(8);
        second.set_not_so_wonderful_remote_url(Some("http://foo.com/meh.gif"));

        app.coordinator.after_save(&mut second).await.unwrap();
        app.coordinator.after_save(&mut first).await.unwrap();

        let jobs = app.queued_jobs().await;
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].record.id, "8");
        assert_eq!(jobs[0].attachments, vec!["not_so_wonderful"]);
        assert_eq!(jobs[1].record.id, "7");
    }
}
