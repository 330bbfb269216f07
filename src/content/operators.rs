//! Content stream operators understood by the layout-mode interpreter.
//!
//! Only the operators that affect transforms, text state or text output are
//! modelled. Everything else is carried through as [`Operator::Other`] and
//! ignored downstream.

use crate::object::Object;

/// A content stream operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    // Text object operators
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,

    // Text positioning operators
    /// Move text position (Td)
    Td {
        /// Horizontal offset
        tx: f64,
        /// Vertical offset
        ty: f64,
    },
    /// Move text position and set leading (TD)
    TD {
        /// Horizontal offset
        tx: f64,
        /// Vertical offset
        ty: f64,
    },
    /// Set text matrix (Tm)
    Tm {
        /// Matrix element a
        a: f64,
        /// Matrix element b
        b: f64,
        /// Matrix element c
        c: f64,
        /// Matrix element d
        d: f64,
        /// Matrix element e (x translation)
        e: f64,
        /// Matrix element f (y translation)
        f: f64,
    },
    /// Move to start of next line (T*)
    TStar,

    // Text showing operators
    /// Show text string (Tj)
    Tj {
        /// Text to show (byte array)
        text: Vec<u8>,
    },
    /// Show text with individual glyph positioning (TJ)
    TJ {
        /// Array of text strings and positioning adjustments
        array: Vec<TextElement>,
    },
    /// Move to next line and show text (')
    Quote {
        /// Text to show
        text: Vec<u8>,
    },
    /// Set spacing and show text (")
    DoubleQuote {
        /// Word spacing
        word_space: f64,
        /// Character spacing
        char_space: f64,
        /// Text to show
        text: Vec<u8>,
    },

    // Text state operators
    /// Set character spacing (Tc)
    Tc {
        /// Character spacing
        char_space: f64,
    },
    /// Set word spacing (Tw)
    Tw {
        /// Word spacing
        word_space: f64,
    },
    /// Set horizontal scaling (Tz)
    Tz {
        /// Horizontal scaling percentage
        scale: f64,
    },
    /// Set text leading (TL)
    TL {
        /// Text leading
        leading: f64,
    },
    /// Set font and size (Tf)
    Tf {
        /// Font resource name
        font: String,
        /// Font size
        size: f64,
    },
    /// Set text rise (Ts)
    Ts {
        /// Text rise
        rise: f64,
    },

    // Graphics state operators
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Modify current transformation matrix (cm)
    Cm {
        /// Matrix element a
        a: f64,
        /// Matrix element b
        b: f64,
        /// Matrix element c
        c: f64,
        /// Matrix element d
        d: f64,
        /// Matrix element e (x translation)
        e: f64,
        /// Matrix element f (y translation)
        f: f64,
    },

    /// Any operator not modelled above
    Other {
        /// Operator name
        name: String,
        /// Operands
        operands: Vec<Object>,
    },
}

/// Element in a TJ array (text showing with positioning).
#[derive(Debug, Clone, PartialEq)]
pub enum TextElement {
    /// Text string to show
    String(Vec<u8>),
    /// Positioning adjustment (in thousandths of a unit of text space)
    Offset(f64),
}

impl Operator {
    /// Build an operator from its name and operands.
    ///
    /// This is the hand-off point from an external tokenizer. Missing or
    /// mistyped operands fall back to neutral defaults rather than failing, so a
    /// damaged stream degrades instead of aborting extraction.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::Operator;
    /// use pdf_layout_state::object::Object;
    ///
    /// let op = Operator::from_raw("Td", vec![Object::Integer(10), Object::Real(-12.5)]);
    /// assert_eq!(op, Operator::Td { tx: 10.0, ty: -12.5 });
    /// ```
    pub fn from_raw(name: &str, operands: Vec<Object>) -> Operator {
        match name {
            "BT" => Operator::BeginText,
            "ET" => Operator::EndText,

            // Text positioning
            "Td" => {
                let tx = get_number(&operands, 0).unwrap_or(0.0);
                let ty = get_number(&operands, 1).unwrap_or(0.0);
                Operator::Td { tx, ty }
            },
            "TD" => {
                let tx = get_number(&operands, 0).unwrap_or(0.0);
                let ty = get_number(&operands, 1).unwrap_or(0.0);
                Operator::TD { tx, ty }
            },
            "Tm" => {
                let [a, b, c, d, e, f] = get_matrix(&operands);
                Operator::Tm { a, b, c, d, e, f }
            },
            "T*" => Operator::TStar,

            // Text showing
            "Tj" => {
                let text = get_string(&operands, 0).unwrap_or_default();
                Operator::Tj { text }
            },
            "TJ" => {
                let array = operands
                    .first()
                    .and_then(Object::as_array)
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|obj| match obj {
                                Object::String(s) => Some(TextElement::String(s.clone())),
                                other => other.as_number().map(TextElement::Offset),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                Operator::TJ { array }
            },
            "'" => {
                let text = get_string(&operands, 0).unwrap_or_default();
                Operator::Quote { text }
            },
            "\"" => {
                let word_space = get_number(&operands, 0).unwrap_or(0.0);
                let char_space = get_number(&operands, 1).unwrap_or(0.0);
                let text = get_string(&operands, 2).unwrap_or_default();
                Operator::DoubleQuote {
                    word_space,
                    char_space,
                    text,
                }
            },

            // Text state
            "Tc" => Operator::Tc {
                char_space: get_number(&operands, 0).unwrap_or(0.0),
            },
            "Tw" => Operator::Tw {
                word_space: get_number(&operands, 0).unwrap_or(0.0),
            },
            "Tz" => Operator::Tz {
                scale: get_number(&operands, 0).unwrap_or(100.0),
            },
            "TL" => Operator::TL {
                leading: get_number(&operands, 0).unwrap_or(0.0),
            },
            "Ts" => Operator::Ts {
                rise: get_number(&operands, 0).unwrap_or(0.0),
            },
            "Tf" => {
                let font = operands
                    .first()
                    .and_then(Object::as_name)
                    .unwrap_or("")
                    .to_string();
                let size = get_number(&operands, 1).unwrap_or(12.0);
                Operator::Tf { font, size }
            },

            // Graphics state
            "q" => Operator::SaveState,
            "Q" => Operator::RestoreState,
            "cm" => {
                let [a, b, c, d, e, f] = get_matrix(&operands);
                Operator::Cm { a, b, c, d, e, f }
            },

            _ => Operator::Other {
                name: name.to_string(),
                operands,
            },
        }
    }

    /// The operator as it is spelled in a content stream.
    pub fn name(&self) -> &str {
        match self {
            Operator::BeginText => "BT",
            Operator::EndText => "ET",
            Operator::Td { .. } => "Td",
            Operator::TD { .. } => "TD",
            Operator::Tm { .. } => "Tm",
            Operator::TStar => "T*",
            Operator::Tj { .. } => "Tj",
            Operator::TJ { .. } => "TJ",
            Operator::Quote { .. } => "'",
            Operator::DoubleQuote { .. } => "\"",
            Operator::Tc { .. } => "Tc",
            Operator::Tw { .. } => "Tw",
            Operator::Tz { .. } => "Tz",
            Operator::TL { .. } => "TL",
            Operator::Tf { .. } => "Tf",
            Operator::Ts { .. } => "Ts",
            Operator::SaveState => "q",
            Operator::RestoreState => "Q",
            Operator::Cm { .. } => "cm",
            Operator::Other { name, .. } => name,
        }
    }
}

// Helper functions to extract operands

fn get_number(operands: &[Object], index: usize) -> Option<f64> {
    operands.get(index).and_then(Object::as_number)
}

fn get_string(operands: &[Object], index: usize) -> Option<Vec<u8>> {
    operands
        .get(index)
        .and_then(|obj| obj.as_string().map(|s| s.to_vec()))
}

fn get_matrix(operands: &[Object]) -> [f64; 6] {
    if operands.len() != 6 {
        log::warn!("Matrix operator with {} operands, padding with identity", operands.len());
    }
    let identity = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut m = identity;
    for (i, slot) in m.iter_mut().enumerate() {
        *slot = get_number(operands, i).unwrap_or(identity[i]);
    }
    m
}
