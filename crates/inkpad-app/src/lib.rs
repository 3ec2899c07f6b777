//! Inkpad Application
//!
//! The notebook session tying the stroke model, storage and raster surface
//! together, plus configuration and the command-line front end.

pub mod cli;
pub mod config;
mod notebook;

pub use config::{ConfigError, NotebookConfig};
pub use notebook::{ExportedImage, Notebook, NotebookError, PageEntry};
