pub mod file_source;
pub mod http_source;
pub mod snapshot_source;
