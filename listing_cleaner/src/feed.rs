//! Rewrite the descriptions of an XML product feed.
//!
//! The feed is streamed once. Every `DESCRIPTION` or `LONG_DESCRIPTION`
//! element directly under a `SHOPITEM` has its inner content collected as
//! markup, cleaned, and written back as escaped text. Everything else is
//! copied through unchanged.

use std::borrow::Cow;

use auto_encoder::auto_encode_bytes;
use log::debug;
use quick_xml::errors::IllFormedError;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::cleaning::Cleaner;
use crate::configuration::CleaningConfig;
use crate::error::{Error, Result};
use crate::utils::{is_blank, log};

const SHOP_ITEM: &[u8] = b"SHOPITEM";
const DESCRIPTION_TAGS: [&[u8]; 2] = [b"DESCRIPTION", b"LONG_DESCRIPTION"];
/// Entities resolved by XML itself.
const XML_ENTITIES: [&str; 5] = ["lt", "gt", "amp", "apos", "quot"];

/// Outcome of a feed rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReport {
    /// The rewritten feed, UTF-8 encoded.
    pub bytes: Vec<u8>,
    /// `SHOPITEM` elements seen.
    pub shop_items: usize,
    /// Descriptions replaced with their cleaned markup.
    pub descriptions_cleaned: usize,
}

/// Decode feed bytes, falling back to charset detection for legacy encodings.
pub fn decode_feed(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text.trim_start_matches('\u{FEFF}')),
        Err(_) => {
            debug!("feed is not utf-8, detecting charset");
            Cow::Owned(auto_encode_bytes(bytes))
        }
    }
}

/// True for `#123` and `#x7B` character references.
fn is_char_ref(name: &str) -> bool {
    match name.strip_prefix('#') {
        Some(hex) if hex.starts_with(['x', 'X']) => {
            hex.len() > 1 && hex[1..].bytes().all(|b| b.is_ascii_hexdigit())
        }
        Some(dec) => !dec.is_empty() && dec.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Unescape description text. References XML knows are resolved; any other
/// `&` is kept literally, so html entities such as `&nbsp;` reach the html
/// parser intact.
pub fn unescape_description(raw: &str) -> Result<String> {
    let mut escaped = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        escaped.push_str(&rest[..amp]);
        rest = &rest[amp + 1..];

        let known = rest
            .find(';')
            .map(|end| &rest[..end])
            .map_or(false, |name| XML_ENTITIES.contains(&name) || is_char_ref(name));

        escaped.push_str(if known { "&" } else { "&amp;" });
    }
    escaped.push_str(rest);

    let text = unescape(&escaped).map_err(quick_xml::Error::from)?;

    Ok(text.into_owned())
}

fn local_name_is(start: &BytesStart<'_>, name: &[u8]) -> bool {
    start.local_name().as_ref().eq_ignore_ascii_case(name)
}

fn is_description(start: &BytesStart<'_>) -> bool {
    DESCRIPTION_TAGS
        .iter()
        .any(|name| local_name_is(start, name))
}

/// Inner content of a description being collected.
#[derive(Default)]
struct Capture<'a> {
    /// Depth of nested elements below the description.
    depth: usize,
    /// Original events, replayed when the description is blank.
    events: Vec<Event<'a>>,
    /// Inner content as markup.
    html: String,
}

impl<'a> Capture<'a> {
    /// Record one inner event. Returns true when the closing tag of the
    /// description itself was reached.
    fn push(&mut self, event: Event<'a>) -> Result<bool> {
        match &event {
            Event::End(_) if self.depth == 0 => return Ok(true),
            Event::Start(start) => {
                self.depth += 1;
                self.html.push('<');
                self.html.push_str(&String::from_utf8_lossy(start));
                self.html.push('>');
            }
            Event::Empty(start) => {
                self.html.push('<');
                self.html.push_str(&String::from_utf8_lossy(start));
                self.html.push_str("/>");
            }
            Event::End(end) => {
                self.depth -= 1;
                self.html.push_str("</");
                self.html.push_str(&String::from_utf8_lossy(end.name().as_ref()));
                self.html.push('>');
            }
            Event::Text(text) if self.depth == 0 => {
                let unescaped = unescape_description(&String::from_utf8_lossy(text))?;
                self.html.push_str(&unescaped);
            }
            Event::Text(text) => self.html.push_str(&String::from_utf8_lossy(text)),
            Event::CData(data) => self.html.push_str(&String::from_utf8_lossy(data)),
            _ => (),
        }

        self.events.push(event);
        Ok(false)
    }
}

/// Rewrite a feed with an already compiled cleaner.
pub fn rewrite_feed_with(bytes: &[u8], cleaner: &Cleaner) -> Result<FeedReport> {
    let text = decode_feed(bytes);
    let mut reader = Reader::from_str(&text);
    let mut writer = Writer::new(Vec::with_capacity(text.len()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut report = FeedReport::default();
    // open elements and whether each is a SHOPITEM
    let mut open: Vec<(String, bool)> = Vec::new();
    let mut capture: Option<Capture<'_>> = None;

    loop {
        let event = reader.read_event()?;

        if let Some(mut current) = capture.take() {
            if let Event::Eof = event {
                break;
            }

            if current.push(event.clone())? {
                if is_blank(&current.html) {
                    for inner in current.events {
                        writer.write_event(inner)?;
                    }
                } else {
                    let cleaned = cleaner.clean(&current.html)?;
                    writer.write_event(Event::Text(BytesText::new(&cleaned)))?;
                    report.descriptions_cleaned += 1;
                }
                writer.write_event(event)?;
                open.pop();
            } else {
                capture = Some(current);
            }
            continue;
        }

        match event {
            Event::Eof => break,
            Event::Decl(_) => (),
            Event::Start(start) => {
                let under_item = open.last().map_or(false, |(_, is_item)| *is_item);
                let is_item = local_name_is(&start, SHOP_ITEM);

                if is_item {
                    report.shop_items += 1;
                }

                if under_item && is_description(&start) {
                    capture = Some(Capture::default());
                }

                open.push((String::from_utf8_lossy(start.name().as_ref()).into_owned(), is_item));
                writer.write_event(Event::Start(start))?;
            }
            Event::Empty(start) => {
                if local_name_is(&start, SHOP_ITEM) {
                    report.shop_items += 1;
                }
                writer.write_event(Event::Empty(start))?;
            }
            Event::End(end) => {
                open.pop();
                writer.write_event(Event::End(end))?;
            }
            other => writer.write_event(other)?,
        }
    }

    // a truncated feed must not pass as a rewritten one
    if let Some((name, _)) = open.pop() {
        return Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(name)).into());
    }

    if report.shop_items == 0 {
        return Err(Error::NoShopItems);
    }

    report.bytes = writer.into_inner();

    log(
        "rewrote feed",
        format!(
            "items={} descriptions={}",
            report.shop_items, report.descriptions_cleaned
        ),
    );

    Ok(report)
}

/// Rewrite every product description of a feed.
pub fn rewrite_feed(bytes: &[u8], config: &CleaningConfig) -> Result<FeedReport> {
    rewrite_feed_with(bytes, &Cleaner::new(config))
}
