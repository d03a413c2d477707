//! SMS backup XML reader
//!
//! Reads the `<smses>` export produced by SMS backup tools and yields one
//! [`RawMessage`] per direct `<sms>` child of the root element.
//!
//! # Format
//!
//! ```xml
//! <smses count="2">
//!   <sms date="1715351458724" readable_date="10 May 2024 4:30:58 PM" body="..." />
//!   <sms date="1715351506754" readable_date="10 May 2024 4:31:46 PM" body="..." />
//! </smses>
//! ```
//!
//! Only `date`, `readable_date` and `body` are read; missing attributes become
//! empty strings.
//!
//! # Error Handling
//!
//! Some exports close the root with `</smses/>`. That one marker is rewritten
//! to `</smses>` before parsing. Any other structural defect is a fatal
//! `MalformedSource` error: a store is never built from a partial load.

use crate::core::{build_records, RawMessage, RecordStore};
use crate::types::LedgerError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, info};

/// Closing marker emitted by some exporters
pub const MALFORMED_ROOT_CLOSE: &str = "</smses/>";

/// Replacement for [`MALFORMED_ROOT_CLOSE`]
pub const ROOT_CLOSE: &str = "</smses>";

/// Name of the per-message element
const MESSAGE_ELEMENT: &[u8] = b"sms";

/// Apply the one tolerated correction to raw source text
pub fn normalize_source(content: &str) -> Cow<'_, str> {
    if content.contains(MALFORMED_ROOT_CLOSE) {
        debug!("rewriting malformed root closing marker");
        Cow::Owned(content.replace(MALFORMED_ROOT_CLOSE, ROOT_CLOSE))
    } else {
        Cow::Borrowed(content)
    }
}

/// Parse source text into raw messages, in document order
///
/// # Errors
///
/// Returns `MalformedSource` for mismatched or unclosed tags, a missing root
/// element, content after the root, or invalid attributes.
pub fn parse_messages(content: &str) -> Result<Vec<RawMessage>, LedgerError> {
    let content = normalize_source(content);
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    let mut messages = Vec::new();
    let mut depth: usize = 0;
    let mut root_seen = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            LedgerError::malformed_source(Some(reader.error_position() as u64), e.to_string())
        })?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(element) => {
                if depth == 0 {
                    open_root(&mut root_seen, position)?;
                } else if depth == 1 && element.name().as_ref() == MESSAGE_ELEMENT {
                    messages.push(read_message(&element, position)?);
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if depth == 0 {
                    open_root(&mut root_seen, position)?;
                } else if depth == 1 && element.name().as_ref() == MESSAGE_ELEMENT {
                    messages.push(read_message(&element, position)?);
                }
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    LedgerError::malformed_source(Some(position), "closing tag without opening tag")
                })?;
            }
            Event::Text(_) | Event::CData(_) if depth == 0 => {
                return Err(LedgerError::malformed_source(
                    Some(position),
                    "text outside the root element",
                ));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(LedgerError::malformed_source(None, "no root element"));
    }
    if depth != 0 {
        return Err(LedgerError::malformed_source(
            None,
            format!("{} element(s) left unclosed at end of input", depth),
        ));
    }

    Ok(messages)
}

/// Read and parse a source from any byte stream
///
/// # Errors
///
/// Returns `MalformedSource` if the stream is not UTF-8 or not well-formed,
/// and `IoError` if the stream cannot be read.
pub fn read_messages<R: Read>(mut source: R) -> Result<Vec<RawMessage>, LedgerError> {
    let mut content = String::new();
    source.read_to_string(&mut content).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            LedgerError::malformed_source(None, "source is not valid UTF-8")
        } else {
            LedgerError::from(e)
        }
    })?;
    parse_messages(&content)
}

/// Read and parse a source file
///
/// # Errors
///
/// Returns `FileNotFound` if the path does not exist, otherwise as
/// [`read_messages`].
pub fn read_messages_from_path(path: &Path) -> Result<Vec<RawMessage>, LedgerError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            LedgerError::file_not_found(&path.display().to_string())
        } else {
            LedgerError::from(e)
        }
    })?;
    read_messages(file)
}

/// Load a source file into a fully indexed record store
///
/// # Errors
///
/// Any load error is returned as-is; no partial store is ever produced.
pub fn load_store(path: &Path) -> Result<RecordStore, LedgerError> {
    let messages = read_messages_from_path(path)?;
    let store = RecordStore::from_records(build_records(messages));
    info!(path = %path.display(), records = store.len(), "loaded transactions from XML");
    Ok(store)
}

fn open_root(root_seen: &mut bool, position: u64) -> Result<(), LedgerError> {
    if *root_seen {
        return Err(LedgerError::malformed_source(
            Some(position),
            "content after the root element",
        ));
    }
    *root_seen = true;
    Ok(())
}

fn read_message(element: &BytesStart<'_>, position: u64) -> Result<RawMessage, LedgerError> {
    let mut message = RawMessage::default();

    for attribute in element.attributes() {
        let attribute = attribute
            .map_err(|e| LedgerError::malformed_source(Some(position), e.to_string()))?;

        let slot = match attribute.key.as_ref() {
            b"readable_date" => &mut message.readable_date,
            b"date" => &mut message.date,
            b"body" => &mut message.body,
            _ => continue,
        };

        *slot = attribute
            .unescape_value()
            .map_err(|e| LedgerError::malformed_source(Some(position), e.to_string()))?
            .into_owned();
    }

    Ok(message)
}
