pub mod config;
pub mod logging;
pub mod monitor;
pub mod server;
pub mod sources;
