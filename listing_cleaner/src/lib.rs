#![warn(missing_docs)]

//! Rule based cleaning of product description markup.
//!
//! Vendor exported descriptions carry layout tables, images, captions that
//! point at those images and all kinds of inline styling. The cleaner parses
//! a fragment leniently, runs a fixed sequence of passes over it and writes
//! back a small, predictable subset of HTML.
//!
//! # How to use the cleaner
//!
//! - [`clean_description`] cleans a single fragment.
//! - [`clean_optional`] accepts a missing description.
//! - [`clean_batch`] cleans many fragments in parallel.
//! - [`feed::rewrite_feed`] cleans every description of an XML product feed.
//!
//! Rules live in [`CleaningConfig`]. Compiling them once into a [`Cleaner`]
//! avoids rebuilding the caption matcher for every call.
//!
//! # Basic usage
//!
//! ```
//! use listing_cleaner::{clean_description, CleaningConfig};
//!
//! let mut config = CleaningConfig::default();
//! config
//!     .with_allowed_tags(["p", "ul", "li"])
//!     .with_orphan_phrases(["photo above"])
//!     .with_tables_to_lists(true);
//!
//! let html = r#"<p><img src="x.jpg"><br>see photo above</p>
//! <table><tr><td>Size</td><td>M</td></tr></table>
//! <p style="color:red">Soft <span>cotton</span></p>"#;
//!
//! assert_eq!(
//!     clean_description(html, &config).unwrap(),
//!     "<ul><li>Size – M</li></ul>\n<p>Soft cotton</p>"
//! );
//! ```

extern crate hashbrown;
extern crate log;

/// The cleaning passes.
pub mod cleaning;
/// Rules for a cleaning run.
pub mod configuration;
/// Crate errors.
pub mod error;
/// Product feed rewriting.
pub mod feed;
/// Internal packages customized.
pub mod packages;
/// Application utils.
pub mod utils;

pub use cleaning::Cleaner;
pub use configuration::CleaningConfig;
pub use error::{Error, Result};
pub use packages::fragment::Fragment;

/// Clean one description with the given rules.
///
/// Empty or whitespace only input yields an empty string.
pub fn clean_description(html: &str, config: &CleaningConfig) -> Result<String> {
    Cleaner::new(config).clean(html)
}

/// Clean a description that may be missing. A missing description cleans to
/// an empty string.
pub fn clean_optional(html: Option<&str>, config: &CleaningConfig) -> Result<String> {
    match html {
        Some(html) => clean_description(html, config),
        None => Ok(String::new()),
    }
}

/// Clean many descriptions in parallel. Results keep the input order.
pub fn clean_batch<S>(htmls: &[S], config: &CleaningConfig) -> Vec<Result<String>>
where
    S: AsRef<str> + Sync,
{
    Cleaner::new(config).clean_batch(htmls)
}
