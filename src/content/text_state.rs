//! Text state scalars: character spacing, word spacing, horizontal scaling,
//! leading and rise.

use crate::object::Object;

/// A text state scalar addressed by its operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextParam {
    /// Character spacing (Tc)
    CharSpacing,
    /// Word spacing (Tw)
    WordSpacing,
    /// Horizontal scaling percentage (Tz)
    HorizontalScaling,
    /// Text leading (TL)
    Leading,
    /// Text rise (Ts)
    Rise,
}

impl TextParam {
    const OPERATORS: [(&'static str, TextParam); 5] = [
        ("Tc", TextParam::CharSpacing),
        ("Tw", TextParam::WordSpacing),
        ("Tz", TextParam::HorizontalScaling),
        ("TL", TextParam::Leading),
        ("Ts", TextParam::Rise),
    ];

    /// Look up the scalar set by an operator. Unknown operators yield `None`.
    pub fn from_operator(name: &str) -> Option<Self> {
        Self::OPERATORS
            .iter()
            .find(|(op, _)| *op == name)
            .map(|(_, param)| *param)
    }

    /// The operator that sets this scalar.
    pub fn operator(self) -> &'static str {
        Self::OPERATORS
            .iter()
            .find(|(_, param)| *param == self)
            .map(|(op, _)| *op)
            .unwrap_or_default()
    }
}

/// Current text state scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStateScalars {
    /// Character spacing (Tc)
    pub char_spacing: f64,
    /// Word spacing (Tw)
    pub word_spacing: f64,
    /// Horizontal scaling percentage (Tz), 100 means unscaled
    pub horizontal_scaling: f64,
    /// Text leading (TL)
    pub leading: f64,
    /// Text rise (Ts)
    pub rise: f64,
}

impl TextStateScalars {
    /// Create scalars with PDF defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::TextStateScalars;
    ///
    /// let scalars = TextStateScalars::new();
    /// assert_eq!(scalars.horizontal_scaling, 100.0);
    /// assert_eq!(scalars.leading, 0.0);
    /// ```
    pub fn new() -> Self {
        Self {
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 100.0,
            leading: 0.0,
            rise: 0.0,
        }
    }

    /// Read one scalar.
    pub fn get(&self, param: TextParam) -> f64 {
        match param {
            TextParam::CharSpacing => self.char_spacing,
            TextParam::WordSpacing => self.word_spacing,
            TextParam::HorizontalScaling => self.horizontal_scaling,
            TextParam::Leading => self.leading,
            TextParam::Rise => self.rise,
        }
    }

    /// Write one scalar.
    pub fn set(&mut self, param: TextParam, value: f64) {
        let slot = match param {
            TextParam::CharSpacing => &mut self.char_spacing,
            TextParam::WordSpacing => &mut self.word_spacing,
            TextParam::HorizontalScaling => &mut self.horizontal_scaling,
            TextParam::Leading => &mut self.leading,
            TextParam::Rise => &mut self.rise,
        };
        *slot = value;
    }

    /// Set a scalar by operator name.
    ///
    /// Operators other than `Tc`, `Tw`, `Tz`, `TL` and `Ts` are ignored. The value
    /// may be a number or an array, in which case its first element is used.
    pub fn set_param(&mut self, name: &str, value: &Object) {
        let Some(param) = TextParam::from_operator(name) else {
            return;
        };
        let number = match value {
            Object::Array(items) => items.first().and_then(Object::as_number),
            other => other.as_number(),
        };
        match number {
            Some(v) => self.set(param, v),
            None => log::warn!("Ignoring non-numeric {} operand: {}", name, value.type_name()),
        }
    }
}

impl Default for TextStateScalars {
    fn default() -> Self {
        Self::new()
    }
}
