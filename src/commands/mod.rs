pub mod asset;
pub mod config;
pub mod init;
pub mod open;
pub mod project;
pub mod version;
pub mod watch;
