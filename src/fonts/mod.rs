//! Font collaborator and text decoding.
//!
//! Fonts are built outside this crate from page resources and shared read-only
//! between interpretation passes.

pub mod decoder;
pub mod font;

pub use decoder::{decode_text, TextCodec};
pub use font::{Font, FontEncoding};
