// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Layout State
//!
//! Transform and text state tracking for layout-preserving PDF text extraction.
//!
//! ## Features
//!
//! - **Transform stack**: `cm`, `Tm`, `Td`, `TD`, `T*` and text advance frames,
//!   composed in content stream order
//! - **Save/restore**: `q`/`Q` undo exactly the graphics matrices pushed inside them
//! - **Text state**: character and word spacing, horizontal scaling, leading, rise
//! - **Decoding**: codec or byte-table font encodings with lossy recovery and
//!   per-character substitution
//! - **Snapshots**: one immutable [`TextStateParams`](layout::TextStateParams) per
//!   shown string, delivered to a visitor
//!
//! Tokenizing content streams, parsing font dictionaries and assembling lines
//! from snapshots all happen outside this crate.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_layout_state::content::{Matrix, Operator};
//! use pdf_layout_state::fonts::{Font, FontEncoding};
//! use pdf_layout_state::layout::{LayoutInterpreter, TextStateParams};
//! use pdf_layout_state::object::Object;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut fonts = HashMap::new();
//! let font = Font::new("Type1", 250.0).with_encoding(FontEncoding::Codec("latin-1".into()));
//! fonts.insert("F1".to_string(), Arc::new(font));
//!
//! let ops = vec![
//!     Operator::from_raw("cm", vec![2.0.into(), 0.0.into(), 0.0.into(), 2.0.into(), 0.0.into(), 0.0.into()]),
//!     Operator::from_raw("BT", vec![]),
//!     Operator::from_raw("Tf", vec![Object::Name("F1".into()), 12.0.into()]),
//!     Operator::from_raw("Td", vec![100.0.into(), 100.0.into()]),
//!     Operator::from_raw("Tj", vec![Object::String(b"Hello".to_vec())]),
//!     Operator::from_raw("ET", vec![]),
//! ];
//!
//! let mut shown = Vec::new();
//! let mut interp = LayoutInterpreter::new(&fonts);
//! interp.run(&ops, &mut |p: TextStateParams| shown.push(p))?;
//!
//! assert_eq!(shown[0].text(), "Hello");
//! assert_eq!(shown[0].transform(), Matrix::new(2.0, 0.0, 0.0, 2.0, 200.0, 200.0));
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Operand values
pub mod object;

// Geometry
pub mod geometry;

// Content stream state
pub mod content;

// Fonts and decoding
pub mod fonts;

// Layout-mode text state
pub mod layout;

// Configuration
pub mod config;

pub use error::{Error, Result};
