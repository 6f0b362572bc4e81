mod attachable_file;
