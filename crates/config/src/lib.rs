//! Configuration crate: file locations and retention settings for the
//! quality-control pipeline.

mod config;

pub use config::Config;
