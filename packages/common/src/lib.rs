pub mod config;
pub mod download_job;
pub mod mq;
pub mod worker;

pub use download_job::{DownloadJob, RecordRef};
pub use worker::{Task, TaskError};
