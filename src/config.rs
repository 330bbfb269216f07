//! Configuration for layout-mode text extraction.
//!
//! Configuration is passed by value into each interpretation pass, so
//! concurrent extractions can use different settings.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Code points always treated as right-to-left (Hebrew through Arabic Extended-A).
const RTL_BLOCK: RangeInclusive<u32> = 0x0590..=0x08FF;

/// Reading direction of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharDirection {
    /// Left-to-right
    Ltr,
    /// Right-to-left
    Rtl,
    /// Punctuation, digits-adjacent symbols and the like; takes the direction of
    /// its neighbours
    Neutral,
}

/// Right-to-left character classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RtlConfig {
    /// Extra code point range treated as right-to-left
    pub custom_range: Option<RangeInclusive<u32>>,
    /// Characters forced to be direction-neutral
    pub special_chars: BTreeSet<char>,
}

impl RtlConfig {
    /// Create a configuration with only the built-in RTL block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat every code point in `min..=max` as right-to-left.
    ///
    /// An empty range (`min > max`) clears the custom range.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::config::{CharDirection, RtlConfig};
    ///
    /// let cfg = RtlConfig::new().with_custom_range('A' as u32, 'z' as u32);
    /// assert_eq!(cfg.direction('h'), CharDirection::Rtl);
    /// ```
    pub fn with_custom_range(mut self, min: u32, max: u32) -> Self {
        self.custom_range = (min <= max).then_some(min..=max);
        self
    }

    /// Force these characters to be direction-neutral.
    pub fn with_special_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.special_chars = chars.into_iter().collect();
        self
    }

    /// Classify one character.
    pub fn direction(&self, ch: char) -> CharDirection {
        let cp = ch as u32;
        if self.special_chars.contains(&ch) {
            return CharDirection::Neutral;
        }
        if self.custom_range.as_ref().is_some_and(|r| r.contains(&cp)) {
            return CharDirection::Rtl;
        }
        if cp <= 0x2F
            || (0x3A..=0x40).contains(&cp)
            || (0x2000..=0x206F).contains(&cp)
            || (0x20A0..=0x21FF).contains(&cp)
        {
            return CharDirection::Neutral;
        }
        if RTL_BLOCK.contains(&cp) {
            CharDirection::Rtl
        } else {
            CharDirection::Ltr
        }
    }

    /// True when the first strongly directional character of `text` is RTL.
    pub fn is_rtl(&self, text: &str) -> bool {
        text.chars()
            .map(|ch| self.direction(ch))
            .find(|dir| *dir != CharDirection::Neutral)
            == Some(CharDirection::Rtl)
    }
}

/// Layout-mode extraction configuration.
#[derive(Debug, Clone, Default)]
pub struct ExtractionConfig {
    /// Right-to-left classification
    pub rtl: RtlConfig,
}

impl ExtractionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the right-to-left classification.
    pub fn with_rtl(mut self, rtl: RtlConfig) -> Self {
        self.rtl = rtl;
        self
    }
}
