//! Teletext page client.
//!
//! Wraps the [`teletext`] parser with what a reader application needs around
//! it: a file logger for parser diagnostics, request URLs for the page API
//! and loading saved payloads from disk.

pub mod endpoint;
pub mod error;
pub mod log_init;

use std::path::Path;

pub use error::{Result, TexttvError};
pub use log_init::init_logger;
pub use teletext::{self, Page, PageCollection};

/// Read a saved payload and parse every page in it.
pub fn load_collection(path: impl AsRef<Path>) -> Result<PageCollection> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("loaded {} bytes from {}", data.len(), path.display());
    Ok(teletext::get_page_collection(&data)?)
}

/// Read a saved payload and return its first page.
pub fn load_page(path: impl AsRef<Path>) -> Result<Page> {
    let data = std::fs::read(path)?;
    Ok(teletext::get_page(&data)?)
}
