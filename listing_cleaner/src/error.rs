/// Errors from cleaning fragments or rewriting product feeds.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The cleaned tree could not be written back to markup.
    #[error("failed to serialize cleaned fragment: {0}")]
    Serialize(std::io::Error),
    /// The product feed is not well-formed XML.
    #[error("invalid feed xml: {0}")]
    Xml(#[from] quick_xml::Error),
    /// The feed parsed but holds no `SHOPITEM` element.
    #[error("no SHOPITEM element found in feed")]
    NoShopItems,
    /// An I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
