//! Transform and text state for one content stream pass.
//!
//! [`TextStateManager`] owns the transform stack, the `q`/`Q` nesting tracker
//! and the text state scalars, and builds [`TextStateParams`] snapshots from
//! them. Create one per page or form XObject; it has no internal locking and
//! must not be shared between concurrent passes.

use super::text_state_params::TextStateParams;
use crate::config::{CharDirection, ExtractionConfig, RtlConfig};
use crate::content::{Matrix, NestingTracker, TextStateScalars, TransformStack};
use crate::error::{Error, Result};
use crate::fonts::{decode_text, Font};
use crate::object::Object;
use std::sync::Arc;

/// Text handed to [`TextStateManager::text_state_params`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShownText<'a> {
    /// Raw show-text bytes, decoded with the current font
    Raw(&'a [u8]),
    /// Already decoded text
    Decoded(&'a str),
}

impl<'a> From<&'a [u8]> for ShownText<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ShownText::Raw(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ShownText<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        ShownText::Raw(bytes)
    }
}

impl<'a> From<&'a str> for ShownText<'a> {
    fn from(text: &'a str) -> Self {
        ShownText::Decoded(text)
    }
}

/// Tracks cumulative transforms and text parameters while operators replay.
#[derive(Debug, Clone)]
pub struct TextStateManager {
    stack: TransformStack,
    nesting: NestingTracker,
    scalars: TextStateScalars,
    font: Option<Arc<Font>>,
    font_size: Option<f64>,
    rtl: RtlConfig,
}

impl TextStateManager {
    /// Create a manager with default configuration.
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    /// Create a manager using `config`.
    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            stack: TransformStack::new(),
            nesting: NestingTracker::new(),
            scalars: TextStateScalars::new(),
            font: None,
            font_size: None,
            rtl: config.rtl.clone(),
        }
    }

    /// Save graphics state (`q`).
    pub fn open_scope(&mut self) {
        self.nesting.open_scope();
    }

    /// Restore graphics state (`Q`), undoing every `cm` since the matching `q`.
    pub fn close_scope(&mut self) {
        self.nesting.close_scope(&mut self.stack);
    }

    /// Concatenate a graphics matrix (`cm`).
    pub fn push_graphics(&mut self, matrix: Matrix) {
        self.stack.push_graphics(matrix);
        self.nesting.record_push();
    }

    /// Push a text position matrix from 2 or 6 operands.
    pub fn push_text_matrix(&mut self, operands: &[f64]) -> Result<()> {
        self.stack.push_text_matrix(operands)
    }

    /// Push a text render matrix from 2 or 6 operands.
    pub fn push_render_matrix(&mut self, operands: &[f64]) -> Result<()> {
        self.stack.push_render_matrix(operands)
    }

    /// Drop all text and render frames.
    pub fn collapse_to_graphics_scope(&mut self) {
        self.stack.collapse_to_graphics_scope();
    }

    /// Drop render frames, keeping the text position.
    pub fn collapse_render_scope(&mut self) {
        self.stack.collapse_render_scope();
    }

    /// Set a text state scalar by operator name. Unknown names are ignored.
    pub fn set_param(&mut self, name: &str, value: &Object) {
        self.scalars.set_param(name, value);
    }

    /// Select the font and size (`Tf`).
    pub fn set_font(&mut self, font: Arc<Font>, size: f64) {
        self.font = Some(font);
        self.font_size = Some(size);
    }

    /// Decode show-text bytes with the current font.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        decode_text(bytes, self.font.as_deref())
    }

    /// Snapshot the current state for a shown string.
    ///
    /// Fails with [`Error::FontStateIncomplete`] before the first `Tf`.
    pub fn text_state_params<'a>(&self, text: impl Into<ShownText<'a>>) -> Result<TextStateParams> {
        let (Some(font), Some(font_size)) = (&self.font, self.font_size) else {
            return Err(Error::FontStateIncomplete);
        };
        let text = match text.into() {
            ShownText::Raw(bytes) => self.decode(bytes)?,
            ShownText::Decoded(text) => text.to_string(),
        };
        let direction = if self.rtl.is_rtl(&text) {
            CharDirection::Rtl
        } else {
            CharDirection::Ltr
        };
        Ok(TextStateParams::new(
            text,
            Arc::clone(font),
            font_size,
            self.scalars,
            self.stack.text_transform(),
            self.stack.graphics_transform(),
            direction,
        ))
    }

    /// The matrix currently in effect.
    pub fn effective_transform(&self) -> Matrix {
        self.stack.effective_transform()
    }

    /// The graphics part of the current transform (CTM).
    pub fn graphics_transform(&self) -> Matrix {
        self.stack.graphics_transform()
    }

    /// True when the page content is drawn upside down.
    pub fn is_flipped_vertically(&self) -> bool {
        self.stack.is_flipped_vertically()
    }

    /// Current text state scalars.
    pub fn scalars(&self) -> &TextStateScalars {
        &self.scalars
    }

    /// Current font, if one has been selected.
    pub fn font(&self) -> Option<&Arc<Font>> {
        self.font.as_ref()
    }

    /// Current font size, if one has been selected.
    pub fn font_size(&self) -> Option<f64> {
        self.font_size
    }

    /// The transform stack.
    pub fn stack(&self) -> &TransformStack {
        &self.stack
    }

    /// The `q`/`Q` nesting tracker.
    pub fn nesting(&self) -> &NestingTracker {
        &self.nesting
    }
}

impl Default for TextStateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontEncoding;

    fn ascii_font() -> Arc<Font> {
        Arc::new(Font::new("Type1", 250.0).with_encoding(FontEncoding::Codec("latin-1".into())))
    }

    #[test]
    fn test_fresh_manager() {
        let mgr = TextStateManager::new();
        assert_eq!(mgr.effective_transform(), Matrix::identity());
        assert_eq!(*mgr.scalars(), TextStateScalars::new());
        assert!(mgr.font().is_none());
        assert!(mgr.font_size().is_none());
    }

    #[test]
    fn test_scope_restores_transform() {
        let mut mgr = TextStateManager::new();
        mgr.push_graphics(Matrix::translation(3.0, 4.0));
        let before = mgr.effective_transform();
        mgr.open_scope();
        mgr.push_graphics(Matrix::new(0.5, 0.2, -0.3, 2.0, 9.0, -9.0));
        mgr.push_graphics(Matrix::scaling(7.0, 7.0));
        mgr.close_scope();
        assert_eq!(mgr.effective_transform(), before);
    }

    #[test]
    fn test_nested_scopes() {
        let mut mgr = TextStateManager::new();
        let m1 = Matrix::scaling(2.0, 2.0);
        let m2 = Matrix::translation(10.0, 0.0);
        mgr.open_scope();
        mgr.push_graphics(m1);
        mgr.open_scope();
        mgr.push_graphics(m2);
        mgr.close_scope();
        assert_eq!(mgr.effective_transform(), m1);
        mgr.close_scope();
        assert_eq!(mgr.effective_transform(), Matrix::identity());
    }

    #[test]
    fn test_double_open_then_pushes_attach_to_innermost() {
        let mut mgr = TextStateManager::new();
        mgr.open_scope();
        mgr.open_scope();
        mgr.push_graphics(Matrix::scaling(2.0, 2.0));
        mgr.push_graphics(Matrix::translation(5.0, 5.0));
        mgr.close_scope();
        assert_eq!(mgr.effective_transform(), Matrix::identity());
        mgr.close_scope();
        assert_eq!(mgr.effective_transform(), Matrix::identity());
    }

    #[test]
    fn test_snapshot_requires_font() {
        let mgr = TextStateManager::new();
        assert!(matches!(mgr.text_state_params("A"), Err(Error::FontStateIncomplete)));
        assert!(matches!(mgr.text_state_params(b"A"), Err(Error::FontStateIncomplete)));
        assert!(matches!(mgr.decode(b"A"), Err(Error::FontNotSet)));
    }

    #[test]
    fn test_snapshot_captures_state() {
        let mut mgr = TextStateManager::new();
        mgr.set_font(ascii_font(), 12.0);
        mgr.set_param("Tc", &Object::Real(0.25));
        mgr.push_graphics(Matrix::scaling(2.0, 2.0));
        mgr.push_text_matrix(&[1.0, 0.0, 0.0, 1.0, 100.0, 100.0]).unwrap();

        let params = mgr.text_state_params(b"Hi").unwrap();
        assert_eq!(params.text(), "Hi");
        assert_eq!(params.font_size(), 12.0);
        assert_eq!(params.char_spacing(), 0.25);
        assert_eq!(params.transform(), Matrix::new(2.0, 0.0, 0.0, 2.0, 200.0, 200.0));
        assert_eq!(params.transform(), mgr.effective_transform());
        assert_eq!(params.graphics_transform(), Matrix::scaling(2.0, 2.0));
        assert_eq!(params.text_transform(), Matrix::translation(100.0, 100.0));

        // Later changes do not leak into an existing snapshot
        mgr.collapse_to_graphics_scope();
        mgr.set_param("Tc", &Object::Real(9.0));
        assert_eq!(params.char_spacing(), 0.25);
        assert_eq!(params.transform().e, 200.0);
    }

    #[test]
    fn test_decoded_text_is_not_decoded_again() {
        let mut mgr = TextStateManager::new();
        let font = Font::new("Type1", 250.0).with_char_mapping('a', "X");
        mgr.set_font(Arc::new(font), 10.0);
        assert_eq!(mgr.text_state_params("abc").unwrap().text(), "abc");
        assert_eq!(mgr.text_state_params(b"abc").unwrap().text(), "Xbc");
    }

    #[test]
    fn test_rtl_config_flows_into_snapshot() {
        let config = ExtractionConfig::new().with_rtl(RtlConfig::new().with_custom_range(0, 255));
        let mut mgr = TextStateManager::with_config(&config);
        mgr.set_font(ascii_font(), 10.0);
        assert!(mgr.text_state_params("English").unwrap().is_rtl());

        let mut plain = TextStateManager::new();
        plain.set_font(ascii_font(), 10.0);
        assert!(!plain.text_state_params("English").unwrap().is_rtl());
        assert!(plain.text_state_params("مرحبا").unwrap().is_rtl());
    }

    #[test]
    fn test_flip_vertical() {
        let mut mgr = TextStateManager::new();
        mgr.push_graphics(Matrix::new(1.0, 0.0, 0.0, -1.0, 0.0, 842.0));
        assert!(mgr.is_flipped_vertically());
    }
}
