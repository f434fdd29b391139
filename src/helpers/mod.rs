//! Formatting helpers for dates and site URLs

mod date;
mod url;

pub use date::*;
pub use url::*;
