pub mod app;
pub mod cache;
pub mod config;
pub mod desk;
pub mod error;
pub mod feeds;
pub mod logging;
pub mod market;
pub mod report;
pub mod session;
pub mod ui;

pub use error::{Error, Result};
