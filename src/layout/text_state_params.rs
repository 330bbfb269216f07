//! Immutable text snapshots handed to the layout assembler.

use crate::config::CharDirection;
use crate::content::{Matrix, TextStateScalars};
use crate::fonts::Font;
use crate::geometry::Point;
use std::sync::Arc;

/// Text state captured when a string is shown.
///
/// One snapshot is created per shown string. It owns its decoded text and a
/// shared handle to the font; nothing in it changes after creation.
#[derive(Debug, Clone)]
pub struct TextStateParams {
    text: String,
    font: Arc<Font>,
    font_size: f64,
    scalars: TextStateScalars,
    transform: Matrix,
    text_matrix: Matrix,
    graphics_matrix: Matrix,
    direction: CharDirection,
}

impl TextStateParams {
    pub(crate) fn new(
        text: String,
        font: Arc<Font>,
        font_size: f64,
        scalars: TextStateScalars,
        text_matrix: Matrix,
        graphics_matrix: Matrix,
        direction: CharDirection,
    ) -> Self {
        Self {
            text,
            font,
            font_size,
            scalars,
            transform: text_matrix.multiply(&graphics_matrix),
            text_matrix,
            graphics_matrix,
            direction,
        }
    }

    /// Decoded text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Font in effect when the text was shown.
    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    /// Font size set by `Tf`.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Character spacing (Tc).
    pub fn char_spacing(&self) -> f64 {
        self.scalars.char_spacing
    }

    /// Word spacing (Tw).
    pub fn word_spacing(&self) -> f64 {
        self.scalars.word_spacing
    }

    /// Horizontal scaling percentage (Tz).
    pub fn horizontal_scaling(&self) -> f64 {
        self.scalars.horizontal_scaling
    }

    /// Text leading (TL).
    pub fn leading(&self) -> f64 {
        self.scalars.leading
    }

    /// Text rise (Ts).
    pub fn rise(&self) -> f64 {
        self.scalars.rise
    }

    /// All text state scalars at once.
    pub fn scalars(&self) -> &TextStateScalars {
        &self.scalars
    }

    /// Effective transform (text, render and graphics frames combined).
    pub fn transform(&self) -> Matrix {
        self.transform
    }

    /// Text space part of the transform: the text matrix with any advance
    /// since the last positioning operator.
    pub fn text_transform(&self) -> Matrix {
        self.text_matrix
    }

    /// Graphics part of the transform (the CTM).
    pub fn graphics_transform(&self) -> Matrix {
        self.graphics_matrix
    }

    /// Where the text starts, in user space.
    pub fn origin(&self) -> Point {
        self.transform.transform_point(0.0, 0.0)
    }

    /// Rendered glyph height: the font size scaled by the vertical axis of
    /// the transform.
    pub fn font_height(&self) -> f64 {
        self.font_size * self.transform.b.hypot(self.transform.d)
    }

    /// Horizontal advance of the shown text, in unscaled text space units.
    ///
    /// Each glyph contributes its width at the current font size plus character
    /// spacing, spaces also add word spacing, and the total is scaled by `Tz`.
    pub fn rendered_width(&self) -> f64 {
        let per_em = self.font_size / 1000.0;
        let advance: f64 = self
            .text
            .chars()
            .map(|ch| {
                let spacing = if ch == ' ' {
                    self.scalars.char_spacing + self.scalars.word_spacing
                } else {
                    self.scalars.char_spacing
                };
                self.font.char_width(ch) * per_em + spacing
            })
            .sum();
        advance * self.scalars.horizontal_scaling / 100.0
    }

    /// Matrix moving the text position past this text.
    pub fn displacement_matrix(&self) -> Matrix {
        Matrix::translation(self.rendered_width(), 0.0)
    }

    /// Reading direction of the text's first strongly directional character.
    pub fn direction(&self) -> CharDirection {
        self.direction
    }

    /// True when the text reads right to left.
    pub fn is_rtl(&self) -> bool {
        self.direction == CharDirection::Rtl
    }
}
