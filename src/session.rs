//! Input model: modifier keys, the drag state machine, and listener bookkeeping.
//!
//! `DragState` is the active gesture tracked between pointer-down and
//! pointer-up. Each dragging variant carries only the context its engine
//! needs, so resize-specific data cannot exist outside a resize session.
//! `ListenerSlot` owns whatever document-level listeners a session attached
//! and guarantees the previous set is gone before the next is installed.

use serde::Deserialize;

use crate::block::SelectionTarget;
use crate::geom::Geometry;
use crate::handle::ResizeHandle;
use crate::moving::MoveDrag;
use crate::resize::ResizeDrag;

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

/// Keyboard modifier keys held during a pointer event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Modifier that engages aspect-ratio lock on corner handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockModifier {
    Shift,
    Alt,
    Ctrl,
    Meta,
}

impl LockModifier {
    #[must_use]
    pub fn is_held(self, m: Modifiers) -> bool {
        match self {
            Self::Shift => m.shift,
            Self::Alt => m.alt,
            Self::Ctrl => m.ctrl,
            Self::Meta => m.meta,
        }
    }
}

/// Which engine owns a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Move,
    Resize(ResizeHandle),
}

/// Sequence number of a drag session, unique within one `EditorCore`.
pub type SessionId = u64;

/// The drag state machine. `Idle -> Moving|Resizing -> Idle`; a finished
/// session is never resumed.
#[derive(Debug, Clone, Default)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Free translation via the move region.
    Moving {
        target: SelectionTarget,
        drag: MoveDrag,
        /// Geometry written on the most recent tick.
        current: Geometry,
    },
    /// Resizing from one of the eight handles.
    Resizing {
        target: SelectionTarget,
        drag: ResizeDrag,
        /// Geometry written on the most recent tick.
        current: Geometry,
    },
}

impl DragState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The element being manipulated, if a session is active.
    #[must_use]
    pub fn target(&self) -> Option<SelectionTarget> {
        match self {
            Self::Idle => None,
            Self::Moving { target, .. } | Self::Resizing { target, .. } => Some(*target),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Option<SessionKind> {
        match self {
            Self::Idle => None,
            Self::Moving { .. } => Some(SessionKind::Move),
            Self::Resizing { drag, .. } => Some(SessionKind::Resize(drag.handle)),
        }
    }

    /// Live geometry of the active session.
    #[must_use]
    pub fn current(&self) -> Option<Geometry> {
        match self {
            Self::Idle => None,
            Self::Moving { current, .. } | Self::Resizing { current, .. } => Some(*current),
        }
    }
}

/// Holds at most one set of document-level listeners.
///
/// Listener sets release themselves on drop (as `gloo_events::EventListener`
/// does), so replacing the slot's contents detaches the old set. `attach`
/// drops the previous set *before* building the new one.
pub struct ListenerSlot<L> {
    current: Option<L>,
}

impl<L> ListenerSlot<L> {
    #[must_use]
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Detach any previous set, then attach the one produced by `make`.
    pub fn attach(&mut self, make: impl FnOnce() -> L) {
        if self.current.take().is_some() {
            tracing::debug!("detached listeners left over from a previous session");
        }
        self.current = Some(make());
    }

    /// Detach the current set. Returns whether anything was attached.
    pub fn detach(&mut self) -> bool {
        self.current.take().is_some()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.current.is_some()
    }
}

impl<L> Default for ListenerSlot<L> {
    fn default() -> Self {
        Self::new()
    }
}
