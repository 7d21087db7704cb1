pub mod config;
pub mod describe;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod strategy;
pub mod ui;
pub mod version;

pub use error::{Result, VersionError};
pub use pipeline::{DerivedVersion, Pipeline};
pub use version::Version;
