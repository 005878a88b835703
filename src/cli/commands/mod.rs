pub mod completions;
pub mod config;
pub mod status;
pub mod watch;
pub mod window;
