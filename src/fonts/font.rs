//! Font description consumed by layout-mode text extraction.
//!
//! A [`Font`] is produced by whatever parses the page's font resources. This
//! crate only reads it: the encoding turns shown bytes into text, the character
//! map repairs subsetted or `/Differences` encoded glyphs, and the width map
//! measures how far the text position advances.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// How show-text bytes are turned into characters.
///
/// Serializes as a bare codec name or as a map from byte value to text.
/// Map keys are written as decimal strings, as JSON requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FontEncoding {
    /// A named text codec applied to the whole byte string (e.g. `utf-16-be`)
    Codec(String),
    /// Per-byte lookup table, typically built from a base encoding and `/Differences`
    Table(HashMap<u8, String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEncoding {
    Codec(String),
    Table(HashMap<String, String>),
}

impl<'de> Deserialize<'de> for FontEncoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawEncoding::deserialize(deserializer)? {
            RawEncoding::Codec(name) => Ok(FontEncoding::Codec(name)),
            RawEncoding::Table(raw) => raw
                .into_iter()
                .map(|(key, text)| {
                    key.trim()
                        .parse::<u8>()
                        .map(|byte| (byte, text))
                        .map_err(|_| {
                            <D::Error as de::Error>::custom(format!("invalid byte key '{}' in encoding table", key))
                        })
                })
                .collect::<Result<HashMap<_, _>, _>>()
                .map(FontEncoding::Table),
        }
    }
}

impl Default for FontEncoding {
    fn default() -> Self {
        FontEncoding::Table(HashMap::new())
    }
}

/// Read-only font information shared by every text snapshot that uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font subtype (e.g., "Type1", "TrueType", "Type0")
    pub subtype: String,
    /// Width of the space glyph in 1000ths of em
    pub space_width: f64,
    /// Byte decoding strategy
    pub encoding: FontEncoding,
    /// Substitutions applied to decoded characters
    #[serde(default)]
    pub char_map: HashMap<char, String>,
    /// Glyph widths in 1000ths of em, keyed by decoded character
    #[serde(default)]
    pub width_map: HashMap<char, f64>,
    /// Entries of the PDF font dictionary this font was built from, values in
    /// PDF syntax. Carried for callers only; nothing here reads them.
    #[serde(default)]
    pub font_dictionary: HashMap<String, String>,
}

impl Font {
    /// Create a font with an empty byte table, no substitutions and no widths.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::fonts::{Font, FontEncoding};
    ///
    /// let font = Font::new("Type1", 250.0).with_encoding(FontEncoding::Codec("utf-8".into()));
    /// assert_eq!(font.subtype, "Type1");
    /// assert_eq!(font.word_width("ab"), 1000.0);
    /// ```
    pub fn new(subtype: impl Into<String>, space_width: f64) -> Self {
        Self {
            subtype: subtype.into(),
            space_width,
            encoding: FontEncoding::default(),
            char_map: HashMap::new(),
            width_map: HashMap::new(),
            font_dictionary: HashMap::new(),
        }
    }

    /// Set the byte decoding strategy.
    pub fn with_encoding(mut self, encoding: FontEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Add a decoded-character substitution.
    pub fn with_char_mapping(mut self, from: char, to: impl Into<String>) -> Self {
        self.char_map.insert(from, to.into());
        self
    }

    /// Set the width of one character, in 1000ths of em.
    pub fn with_width(mut self, ch: char, width: f64) -> Self {
        self.width_map.insert(ch, width);
        self
    }

    /// Keep a raw font dictionary entry, e.g. `("BaseFont", "/Helvetica")`.
    pub fn with_dictionary_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.font_dictionary.insert(key.into(), value.into());
        self
    }

    /// Width of a character in 1000ths of em.
    ///
    /// Characters without a known width are assumed to be twice as wide as a
    /// space, which errs on the side of separating words.
    pub fn char_width(&self, ch: char) -> f64 {
        self.width_map
            .get(&ch)
            .copied()
            .unwrap_or(self.space_width * 2.0)
    }

    /// Sum of character widths for `text`, in 1000ths of em.
    pub fn word_width(&self, text: &str) -> f64 {
        text.chars().map(|ch| self.char_width(ch)).sum()
    }
}
