pub mod report;
pub mod scenario;
pub mod sources;
pub mod watch;
