pub mod config;
pub mod export;
pub mod list;
pub mod show;
pub mod submit;
pub mod update;
pub mod watch;
