pub mod import_file_store;
