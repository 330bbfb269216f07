//! Layout-mode text state.
//!
//! Replays content stream operators and reports every shown string together
//! with the font, spacing and transform in effect, for a downstream assembler
//! that rebuilds lines and columns from positioned text.

pub mod interpreter;
pub mod text_state_manager;
pub mod text_state_params;

pub use interpreter::{LayoutInterpreter, TextVisitor};
pub use text_state_manager::{ShownText, TextStateManager};
pub use text_state_params::TextStateParams;
