//! Content stream state tracking.
//!
//! This module holds the pieces of state that change as a content stream is
//! replayed: the transform stack, the `q`/`Q` nesting tracker, the text state
//! scalars and the typed operator model fed into them.

pub mod graphics_state;
pub mod nesting;
pub mod operators;
pub mod text_state;

pub use graphics_state::{compose, Frame, FrameScope, Matrix, TransformStack};
pub use nesting::{NestingTracker, ScopeId};
pub use operators::{Operator, TextElement};
pub use text_state::{TextParam, TextStateScalars};
