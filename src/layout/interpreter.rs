//! Operator dispatch for layout-mode text extraction.
//!
//! [`LayoutInterpreter`] routes each [`Operator`] to the transform stack, the
//! nesting tracker or the text state scalars, and emits a [`TextStateParams`]
//! to the caller's [`TextVisitor`] for every shown string. After a string is
//! shown a render frame advances the text position past it, so consecutive
//! `Tj` operators within one text object land side by side.

use super::text_state_manager::TextStateManager;
use super::text_state_params::TextStateParams;
use crate::config::ExtractionConfig;
use crate::content::{Matrix, Operator, TextElement, TextParam};
use crate::error::{Error, Result};
use crate::fonts::Font;
use crate::object::Object;
use std::collections::HashMap;
use std::sync::Arc;

/// Receives one snapshot per shown string.
pub trait TextVisitor {
    /// Called with the state captured when text was shown.
    fn visit_text(&mut self, params: TextStateParams);
}

impl<F> TextVisitor for F
where
    F: FnMut(TextStateParams),
{
    fn visit_text(&mut self, params: TextStateParams) {
        self(params)
    }
}

impl TextVisitor for Vec<TextStateParams> {
    fn visit_text(&mut self, params: TextStateParams) {
        self.push(params);
    }
}

/// Replays content stream operators for one page or form XObject.
#[derive(Debug)]
pub struct LayoutInterpreter<'a> {
    state: TextStateManager,
    fonts: &'a HashMap<String, Arc<Font>>,
}

impl<'a> LayoutInterpreter<'a> {
    /// Create an interpreter resolving `Tf` names against `fonts`.
    pub fn new(fonts: &'a HashMap<String, Arc<Font>>) -> Self {
        Self::with_config(fonts, &ExtractionConfig::default())
    }

    /// Create an interpreter using `config`.
    pub fn with_config(fonts: &'a HashMap<String, Arc<Font>>, config: &ExtractionConfig) -> Self {
        Self {
            state: TextStateManager::with_config(config),
            fonts,
        }
    }

    /// Current state.
    pub fn state(&self) -> &TextStateManager {
        &self.state
    }

    /// Replay a sequence of operators, stopping at the first error.
    pub fn run<'o, V>(&mut self, operators: impl IntoIterator<Item = &'o Operator>, visitor: &mut V) -> Result<()>
    where
        V: TextVisitor + ?Sized,
    {
        for op in operators {
            self.process(op, visitor)?;
        }
        Ok(())
    }

    /// Apply one operator.
    pub fn process<V>(&mut self, op: &Operator, visitor: &mut V) -> Result<()>
    where
        V: TextVisitor + ?Sized,
    {
        match op {
            Operator::BeginText | Operator::EndText => self.state.collapse_to_graphics_scope(),
            Operator::SaveState => self.state.open_scope(),
            Operator::RestoreState => self.state.close_scope(),
            Operator::Cm { a, b, c, d, e, f } => {
                self.state.push_graphics(Matrix::new(*a, *b, *c, *d, *e, *f));
            },

            Operator::Tm { a, b, c, d, e, f } => {
                self.state.collapse_to_graphics_scope();
                self.state.push_text_matrix(&[*a, *b, *c, *d, *e, *f])?;
            },
            Operator::Td { tx, ty } => self.move_text(*tx, *ty)?,
            Operator::TD { tx, ty } => {
                self.set_scalar(TextParam::Leading, -ty);
                self.move_text(*tx, *ty)?;
            },
            Operator::TStar => self.next_line()?,

            Operator::Tc { char_space } => self.set_scalar(TextParam::CharSpacing, *char_space),
            Operator::Tw { word_space } => self.set_scalar(TextParam::WordSpacing, *word_space),
            Operator::Tz { scale } => self.set_scalar(TextParam::HorizontalScaling, *scale),
            Operator::TL { leading } => self.set_scalar(TextParam::Leading, *leading),
            Operator::Ts { rise } => self.set_scalar(TextParam::Rise, *rise),
            Operator::Tf { font, size } => {
                let resolved = self
                    .fonts
                    .get(font)
                    .ok_or_else(|| Error::UnknownFont(font.clone()))?;
                self.state.set_font(Arc::clone(resolved), *size);
            },

            Operator::Tj { text } => self.show(text, visitor)?,
            Operator::TJ { array } => {
                for element in array {
                    match element {
                        TextElement::String(text) => self.show(text, visitor)?,
                        TextElement::Offset(offset) => self.adjust(*offset)?,
                    }
                }
            },
            Operator::Quote { text } => {
                self.next_line()?;
                self.show(text, visitor)?;
            },
            Operator::DoubleQuote {
                word_space,
                char_space,
                text,
            } => {
                self.set_scalar(TextParam::WordSpacing, *word_space);
                self.set_scalar(TextParam::CharSpacing, *char_space);
                self.next_line()?;
                self.show(text, visitor)?;
            },

            Operator::Other { name, operands } => {
                if TextParam::from_operator(name).is_some() {
                    let value = operands.first().cloned().unwrap_or(Object::Null);
                    self.state.set_param(name, &value);
                } else {
                    log::trace!("Ignoring operator {} with {} operands", name, operands.len());
                }
            },
        }
        Ok(())
    }

    fn set_scalar(&mut self, param: TextParam, value: f64) {
        self.state.set_param(param.operator(), &Object::Real(value));
    }

    fn move_text(&mut self, tx: f64, ty: f64) -> Result<()> {
        self.state.collapse_render_scope();
        self.state.push_text_matrix(&[tx, ty])
    }

    fn next_line(&mut self) -> Result<()> {
        let leading = self.state.scalars().leading;
        self.move_text(0.0, -leading)
    }

    fn show<V>(&mut self, bytes: &[u8], visitor: &mut V) -> Result<()>
    where
        V: TextVisitor + ?Sized,
    {
        let params = self.state.text_state_params(bytes)?;
        let advance = params.displacement_matrix();
        visitor.visit_text(params);
        self.state.push_render_matrix(&advance.to_array())
    }

    /// Apply a TJ positioning adjustment, in thousandths of text space.
    fn adjust(&mut self, offset: f64) -> Result<()> {
        let font_size = self.state.font_size().ok_or(Error::FontStateIncomplete)?;
        let scaling = self.state.scalars().horizontal_scaling / 100.0;
        let tx = -offset / 1000.0 * font_size * scaling;
        self.state.push_render_matrix(&[tx, 0.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontEncoding;

    fn fonts() -> HashMap<String, Arc<Font>> {
        let font = Font::new("Type1", 250.0)
            .with_encoding(FontEncoding::Codec("latin-1".to_string()))
            .with_width('A', 600.0)
            .with_width('B', 400.0);
        let mut map = HashMap::new();
        map.insert("F1".to_string(), Arc::new(font));
        map
    }

    fn collect(ops: &[Operator]) -> Result<Vec<TextStateParams>> {
        let fonts = fonts();
        let mut interp = LayoutInterpreter::new(&fonts);
        let mut out = Vec::new();
        interp.run(ops, &mut out)?;
        Ok(out)
    }

    fn tf(size: f64) -> Operator {
        Operator::Tf {
            font: "F1".to_string(),
            size,
        }
    }

    fn tj(text: &[u8]) -> Operator {
        Operator::Tj { text: text.to_vec() }
    }

    #[test]
    fn test_consecutive_tj_advance() {
        let out = collect(&[
            Operator::BeginText,
            tf(10.0),
            Operator::Td { tx: 50.0, ty: 700.0 },
            tj(b"A"),
            tj(b"B"),
            Operator::EndText,
        ])
        .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].origin().x, 50.0);
        assert_eq!(out[0].origin().y, 700.0);
        assert!((out[1].origin().x - 56.0).abs() < 1e-9);
    }

    #[test]
    fn test_closure_and_vec_visitors_agree() {
        let fonts = fonts();
        let ops = [tf(10.0), Operator::Td { tx: 7.0, ty: 9.0 }, tj(b"AB"), tj(b"B")];

        let mut by_closure = Vec::new();
        LayoutInterpreter::new(&fonts)
            .run(&ops, &mut |p: TextStateParams| by_closure.push(p.origin()))
            .unwrap();

        let mut by_vec: Vec<TextStateParams> = Vec::new();
        LayoutInterpreter::new(&fonts).run(&ops, &mut by_vec).unwrap();

        assert_eq!(by_vec.len(), 2);
        assert_eq!(by_vec.iter().map(|p| p.origin()).collect::<Vec<_>>(), by_closure);
    }

    #[test]
    fn test_visitor_sees_text_and_graphics_matrices() {
        let out = collect(&[
            Operator::SaveState,
            Operator::Cm {
                a: 1.0,
                b: 0.0,
                c: 0.0,
                d: 1.0,
                e: 36.0,
                f: 720.0,
            },
            Operator::BeginText,
            tf(10.0),
            Operator::Tm {
                a: 2.0,
                b: 0.0,
                c: 0.0,
                d: 2.0,
                e: 10.0,
                f: 20.0,
            },
            tj(b"A"),
            Operator::EndText,
            Operator::RestoreState,
        ])
        .unwrap();
        assert_eq!(out[0].graphics_transform(), Matrix::translation(36.0, 720.0));
        assert_eq!(out[0].text_transform(), Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 20.0));
        assert_eq!(out[0].transform(), Matrix::new(2.0, 0.0, 0.0, 2.0, 46.0, 740.0));
    }

    #[test]
    fn test_tj_offsets_move_left() {
        let out = collect(&[
            tf(10.0),
            Operator::TJ {
                array: vec![
                    TextElement::String(b"A".to_vec()),
                    TextElement::Offset(-1000.0),
                    TextElement::String(b"B".to_vec()),
                ],
            },
        ])
        .unwrap();
        // 6 for the glyph, then a negative offset moves right by one em
        assert!((out[1].origin().x - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_td_discards_render_frames() {
        let out = collect(&[
            tf(10.0),
            Operator::Td { tx: 10.0, ty: 10.0 },
            tj(b"A"),
            Operator::Td { tx: 0.0, ty: -12.0 },
            tj(b"B"),
        ])
        .unwrap();
        assert_eq!(out[1].origin().x, 10.0);
        assert_eq!(out[1].origin().y, -2.0);
    }

    #[test]
    fn test_tm_replaces_text_position() {
        let out = collect(&[
            tf(10.0),
            Operator::Td { tx: 300.0, ty: 300.0 },
            Operator::Tm {
                a: 1.0,
                b: 0.0,
                c: 0.0,
                d: 1.0,
                e: 5.0,
                f: 6.0,
            },
            tj(b"A"),
        ])
        .unwrap();
        assert_eq!(out[0].origin().x, 5.0);
        assert_eq!(out[0].origin().y, 6.0);
    }

    #[test]
    fn test_td_upper_sets_leading_and_tstar_uses_it() {
        let fonts = fonts();
        let mut interp = LayoutInterpreter::new(&fonts);
        let mut out = Vec::new();
        interp
            .run(
                &[
                    tf(10.0),
                    Operator::TD { tx: 0.0, ty: -14.0 },
                    Operator::TStar,
                    tj(b"A"),
                ],
                &mut |p: TextStateParams| out.push(p),
            )
            .unwrap();
        assert_eq!(interp.state().scalars().leading, 14.0);
        assert_eq!(out[0].origin().y, -28.0);
    }

    #[test]
    fn test_quote_operators() {
        let out = collect(&[
            tf(10.0),
            Operator::TL { leading: 12.0 },
            Operator::Quote { text: b"A".to_vec() },
            Operator::DoubleQuote {
                word_space: 3.0,
                char_space: 1.0,
                text: b"B".to_vec(),
            },
        ])
        .unwrap();
        assert_eq!(out[0].origin().y, -12.0);
        assert_eq!(out[1].origin().y, -24.0);
        assert_eq!(out[1].origin().x, 0.0);
        assert_eq!(out[1].word_spacing(), 3.0);
        assert_eq!(out[1].char_spacing(), 1.0);
    }

    #[test]
    fn test_unknown_font_is_an_error() {
        let err = collect(&[Operator::Tf {
            font: "F9".to_string(),
            size: 10.0,
        }])
        .unwrap_err();
        assert!(matches!(err, Error::UnknownFont(ref name) if name == "F9"));
    }

    #[test]
    fn test_show_before_tf_is_an_error() {
        let err = collect(&[tj(b"A")]).unwrap_err();
        assert!(matches!(err, Error::FontStateIncomplete));
    }

    #[test]
    fn test_other_operators_are_ignored_or_forwarded() {
        let fonts = fonts();
        let mut interp = LayoutInterpreter::new(&fonts);
        let mut sink = |_: TextStateParams| {};
        let ops = [
            Operator::from_raw("re", vec![Object::Integer(0); 4]),
            Operator::Other {
                name: "Tc".to_string(),
                operands: vec![Object::Real(2.0)],
            },
        ];
        interp.run(&ops, &mut sink).unwrap();
        assert_eq!(interp.state().scalars().char_spacing, 2.0);
        assert_eq!(interp.state().effective_transform(), Matrix::identity());
    }
}
