//! CLI library components for the tabview browser.

pub mod logging;
pub mod summary;
