//! Pairing of `q` / `Q` operators with the transform frames pushed between them.
//!
//! Frames for `cm` are pushed lazily, so a `q` by itself does not touch the
//! [`TransformStack`]. Instead every open scope counts the graphics frames pushed
//! while it was innermost, and `Q` pops exactly that many.

use super::graphics_state::TransformStack;

/// Identifier of an open `q` scope.
///
/// Identifiers increase strictly for the lifetime of a tracker and are never
/// reused, even after the scope that held one has closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u64);

#[derive(Debug, Clone)]
struct OpenScope {
    id: ScopeId,
    pushed: usize,
}

/// Tracks currently open save/restore scopes.
#[derive(Debug, Clone, Default)]
pub struct NestingTracker {
    open: Vec<OpenScope>,
    next_id: u64,
}

impl NestingTracker {
    /// Create a tracker with no open scopes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new innermost scope (`q`).
    pub fn open_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        self.open.push(OpenScope { id, pushed: 0 });
        id
    }

    /// Record one graphics frame pushed inside the innermost scope.
    ///
    /// Frames pushed outside any scope belong to the page and are never popped.
    pub fn record_push(&mut self) {
        if let Some(scope) = self.open.last_mut() {
            scope.pushed += 1;
        }
    }

    /// Close the innermost scope (`Q`) and unwind its frames from `stack`.
    ///
    /// Open text frames are discarded first. An unbalanced `Q` only does that.
    pub fn close_scope(&mut self, stack: &mut TransformStack) {
        stack.collapse_to_graphics_scope();
        match self.open.pop() {
            Some(scope) => {
                log::trace!("Closing scope {:?}, popping {} frames", scope.id, scope.pushed);
                stack.pop_frames(scope.pushed);
            },
            None => log::debug!("Ignoring Q without matching q"),
        }
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}
