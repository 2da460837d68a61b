pub mod args;
mod backup;
pub mod codec;
pub mod commands;
mod config;
pub mod entry;
mod error;
mod fs;
pub mod model;
pub mod report;
pub mod session;


pub use backup::Backup;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
