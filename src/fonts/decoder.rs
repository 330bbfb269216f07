//! Show-text byte decoding.
//!
//! Decoding never fails once a font is available: a codec that rejects the
//! input falls back to lossy UTF-8, and unmapped table bytes stand for
//! themselves.

use super::font::{Font, FontEncoding};
use crate::error::{Error, Result};
use encoding_rs::Encoding;
use std::borrow::Cow;

/// A resolved text codec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextCodec {
    /// 7-bit ASCII: any byte at or above 0x80 is malformed
    Ascii,
    /// ISO-8859-1: every byte is its own code point
    Latin1,
    /// Any codec known to `encoding_rs`
    Encoding(&'static Encoding),
}

impl TextCodec {
    /// Resolve a codec name such as `utf-16-be`, `utf_8` or `latin-1`.
    ///
    /// Returns `None` for names no codec answers to.
    pub fn for_name(name: &str) -> Option<Self> {
        let label = name.trim().to_ascii_lowercase().replace('_', "-");
        match label.as_str() {
            "ascii" | "us-ascii" | "646" => Some(TextCodec::Ascii),
            "latin-1" | "latin1" | "l1" | "iso-8859-1" | "iso8859-1" | "8859" | "charmap" => {
                Some(TextCodec::Latin1)
            },
            "utf-16-be" | "utf-16be" => Some(TextCodec::Encoding(encoding_rs::UTF_16BE)),
            "utf-16-le" | "utf-16le" => Some(TextCodec::Encoding(encoding_rs::UTF_16LE)),
            "utf8" | "utf-8" | "u8" => Some(TextCodec::Encoding(encoding_rs::UTF_8)),
            other => Encoding::for_label(other.as_bytes()).map(TextCodec::Encoding),
        }
    }

    /// Decode strictly. Malformed input yields `None`.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextCodec::Ascii => std::str::from_utf8(bytes)
                .ok()
                .filter(|text| text.is_ascii())
                .map(Cow::Borrowed),
            TextCodec::Latin1 => Some(Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect())),
            TextCodec::Encoding(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(bytes)
            },
        }
    }
}

/// Decode show-text bytes with the current font.
///
/// Fails with [`Error::FontNotSet`] when no font has been selected.
///
/// # Examples
///
/// ```
/// use pdf_layout_state::fonts::{decode_text, Font, FontEncoding};
///
/// let font = Font::new("Type0", 250.0)
///     .with_encoding(FontEncoding::Codec("utf-16-be".into()))
///     .with_char_mapping('B', "β");
/// assert_eq!(decode_text(&[0x00, 0x41, 0x00, 0x42], Some(&font)).unwrap(), "Aβ");
/// assert!(decode_text(b"A", None).is_err());
/// ```
pub fn decode_text(bytes: &[u8], font: Option<&Font>) -> Result<String> {
    let font = font.ok_or(Error::FontNotSet)?;
    let text = match &font.encoding {
        FontEncoding::Codec(name) => decode_with_codec(bytes, name),
        FontEncoding::Table(table) => bytes
            .iter()
            .map(|b| match table.get(b) {
                Some(mapped) => Cow::Borrowed(mapped.as_str()),
                None => Cow::Owned(char::from(*b).to_string()),
            })
            .collect(),
    };
    Ok(apply_char_map(&text, font))
}

fn decode_with_codec(bytes: &[u8], name: &str) -> String {
    let decoded = match TextCodec::for_name(name) {
        Some(codec) => codec.decode(bytes),
        None => {
            log::debug!("Unknown text codec '{}'", name);
            None
        },
    };
    match decoded {
        Some(text) => text.into_owned(),
        None => {
            log::debug!("Falling back to lossy UTF-8 for {} bytes under '{}'", bytes.len(), name);
            String::from_utf8_lossy(bytes).into_owned()
        },
    }
}

fn apply_char_map(text: &str, font: &Font) -> String {
    if font.char_map.is_empty() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match font.char_map.get(&ch) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(ch),
        }
    }
    out
}
