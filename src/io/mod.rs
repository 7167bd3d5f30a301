pub mod auth_client;
pub mod config_io;
pub mod paths;
pub mod session_io;
pub mod storage;
