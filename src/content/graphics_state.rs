//! Transform tracking for content stream replay.
//!
//! Graphics (`cm`), text position (`Tm`, `Td`, `TD`, `T*`) and text render
//! displacement matrices are kept on one [`TransformStack`]. Each frame is tagged
//! with the scope it belongs to so that text frames can be discarded when a new
//! text object starts or a graphics matrix is concatenated.

use crate::error::{Error, Result};
use crate::geometry::Point;

/// `d` coefficient below which a composed transform is considered upside down.
const FLIP_EPSILON: f64 = -1e-6;

/// A 2D transformation matrix.
///
/// PDF uses matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Where (a,b,c,d) define scaling/rotation/skewing and (e,f) define translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f64,
    /// Rotation/skew component
    pub b: f64,
    /// Rotation/skew component
    pub c: f64,
    /// Vertical scaling component
    pub d: f64,
    /// Horizontal translation
    pub e: f64,
    /// Vertical translation
    pub f: f64,
}

impl Matrix {
    /// Create a matrix from its six coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.to_array(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    /// ```
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a translation matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::Matrix;
    ///
    /// let m = Matrix::translation(10.0, 20.0);
    /// assert_eq!(m.e, 10.0);
    /// assert_eq!(m.f, 20.0);
    /// ```
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a scaling matrix.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Build a matrix from a text positioning operand list.
    ///
    /// Six operands are taken as `a b c d e f`. Two operands are an `x y`
    /// translation, as supplied by `Td` and friends, and expand to
    /// `1 0 0 1 x y`. Any other count is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::Matrix;
    ///
    /// let m = Matrix::from_operands(&[5.0, -3.0]).unwrap();
    /// assert_eq!(m, Matrix::translation(5.0, -3.0));
    /// assert!(Matrix::from_operands(&[1.0, 2.0, 3.0]).is_err());
    /// ```
    pub fn from_operands(operands: &[f64]) -> Result<Self> {
        match *operands {
            [x, y] => Ok(Self::translation(x, y)),
            [a, b, c, d, e, f] => Ok(Self::new(a, b, c, d, e, f)),
            _ => Err(Error::InvalidOperands {
                operator: "text matrix".to_string(),
                expected: "2 or 6",
                found: operands.len(),
            }),
        }
    }

    /// Compose this matrix with another.
    ///
    /// Matrix multiplication is not commutative: A * B ≠ B * A.
    /// The result represents first applying `self`, then applying `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::Matrix;
    ///
    /// let translate = Matrix::translation(10.0, 0.0);
    /// let scale = Matrix::scaling(2.0, 2.0);
    /// let p = translate.multiply(&scale).transform_point(5.0, 5.0);
    /// assert_eq!((p.x, p.y), (30.0, 10.0));
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    pub fn transform_point(&self, x: f64, y: f64) -> Point {
        Point {
            x: self.a * x + self.c * y + self.e,
            y: self.b * x + self.d * y + self.f,
        }
    }

    /// Get the determinant of this matrix.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// The six coefficients in `a b c d e f` order.
    pub fn to_array(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f64; 6]> for Matrix {
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }
}

/// Compose two matrices: the result applies `first`, then `then`.
pub fn compose(first: &Matrix, then: &Matrix) -> Matrix {
    first.multiply(then)
}

/// Which part of the state machine pushed a frame.
///
/// A render frame always belongs to a text object as well, so there is no way
/// to express a render frame outside text scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameScope {
    /// Pushed by `cm`, or the root frame
    Graphics,
    /// Pushed by a text positioning operator
    Text,
    /// Pushed after showing text, to advance past the rendered glyphs
    Render,
}

/// One entry of the transform stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Matrix contributed by this frame
    pub matrix: Matrix,
    /// Scope tag
    pub scope: FrameScope,
}

impl Frame {
    /// Create a frame.
    pub fn new(matrix: Matrix, scope: FrameScope) -> Self {
        Self { matrix, scope }
    }

    /// True for text and render frames.
    pub fn is_text(&self) -> bool {
        matches!(self.scope, FrameScope::Text | FrameScope::Render)
    }

    /// True for render frames only.
    pub fn is_render(&self) -> bool {
        self.scope == FrameScope::Render
    }
}

/// Ordered stack of transform frames.
///
/// The root frame is an untagged identity matrix and is never removed.
#[derive(Debug, Clone)]
pub struct TransformStack {
    frames: Vec<Frame>,
}

impl TransformStack {
    /// Create a stack holding only the identity root frame.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_layout_state::content::{Matrix, TransformStack};
    ///
    /// let stack = TransformStack::new();
    /// assert_eq!(stack.depth(), 1);
    /// assert_eq!(stack.effective_transform(), Matrix::identity());
    /// ```
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new(Matrix::identity(), FrameScope::Graphics)],
        }
    }

    fn top(&self) -> &Frame {
        self.frames.last().expect("root frame is never removed")
    }

    /// Concatenate a graphics matrix (`cm`).
    ///
    /// Any open text or render frames are discarded first: `cm` always operates
    /// on the graphics state, never beneath a text matrix.
    pub fn push_graphics(&mut self, matrix: Matrix) {
        self.collapse_to_graphics_scope();
        self.frames.push(Frame::new(matrix, FrameScope::Graphics));
    }

    /// Push a text position matrix from 2 or 6 operands.
    pub fn push_text_matrix(&mut self, operands: &[f64]) -> Result<()> {
        let matrix = Matrix::from_operands(operands)?;
        self.frames.push(Frame::new(matrix, FrameScope::Text));
        Ok(())
    }

    /// Push a text render matrix from 2 or 6 operands.
    pub fn push_render_matrix(&mut self, operands: &[f64]) -> Result<()> {
        let matrix = Matrix::from_operands(operands)?;
        self.frames.push(Frame::new(matrix, FrameScope::Render));
        Ok(())
    }

    /// Pop text and render frames down to the nearest graphics frame.
    pub fn collapse_to_graphics_scope(&mut self) {
        while self.top().is_text() {
            self.frames.pop();
        }
    }

    /// Pop render frames, keeping the current text position frame.
    pub fn collapse_render_scope(&mut self) {
        while self.top().is_render() {
            self.frames.pop();
        }
    }

    /// Pop up to `count` frames, never touching the root frame.
    pub(crate) fn pop_frames(&mut self, count: usize) {
        let keep = self.frames.len().saturating_sub(count).max(1);
        self.frames.truncate(keep);
    }

    /// The single matrix currently in effect.
    ///
    /// Frames are applied innermost first, so a text matrix is applied before
    /// the graphics matrices beneath it (`Tm × CTM`).
    pub fn effective_transform(&self) -> Matrix {
        Self::fold(self.frames.iter())
    }

    /// Composition of the graphics frames alone (the CTM).
    pub fn graphics_transform(&self) -> Matrix {
        Self::fold(self.frames.iter().filter(|f| !f.is_text()))
    }

    /// Composition of the text and render frames alone, in text space.
    ///
    /// Text frames always sit above every graphics frame, so the effective
    /// transform is this matrix followed by [`graphics_transform`](Self::graphics_transform).
    pub fn text_transform(&self) -> Matrix {
        Self::fold(self.frames.iter().filter(|f| f.is_text()))
    }

    fn fold<'a>(frames: impl DoubleEndedIterator<Item = &'a Frame>) -> Matrix {
        frames
            .rev()
            .fold(Matrix::identity(), |acc, frame| acc.multiply(&frame.matrix))
    }

    /// True when the page content is drawn upside down.
    pub fn is_flipped_vertically(&self) -> bool {
        self.effective_transform().d < FLIP_EPSILON
    }

    /// Number of frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames from the root outward.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
