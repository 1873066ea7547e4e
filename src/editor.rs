//! Composition root: selection, drag sessions, edit mode, and host actions.
//!
//! `EditorCore` wires pointer input to the move/resize engines and the
//! selection to the bounds tracker. It never paints or awaits anything
//! itself; every side effect is returned as an [`Action`] for the host to
//! carry out, and the asynchronous reconciliation pass is handed back as
//! [`Action::Reconcile`] so the host can run it on its own executor.

use std::collections::HashMap;

use serde::Serialize;

use crate::block::{Block, BlockId, BlockKind, BlockStore, SelectionTarget};
use crate::bounds::{Invalidation, SelectionBoundsTracker};
use crate::config::EditorConfig;
use crate::geom::{Geometry, Point};
use crate::handle::HitRegion;
use crate::moving::MoveDrag;
use crate::overlay::OverlayModel;
use crate::reconcile::{PendingReconcile, ReconcileOutcome};
use crate::resize::ResizeDrag;
use crate::session::{DragState, Modifiers, SessionId};
use crate::surface::{RenderSink, SurfaceInspector};

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// How a double-activated block takes keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditMode {
    /// The block's inner content becomes `contentEditable`.
    ContentEditable,
    /// A nested live-code editor takes focus. The host clears
    /// `contentEditable` on the block and slide and suspends deck shortcuts.
    LiveCode,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Write geometry to the target's inline style.
    Paint { target: SelectionTarget, geometry: Geometry },
    /// Stop nested iframes/videos from swallowing pointer events.
    SuppressEmbeddedPointerEvents { block: BlockId },
    /// Undo a previous suppression.
    RestoreEmbeddedPointerEvents { block: BlockId },
    /// Run [`crate::reconcile::reconcile`] and feed the result to
    /// [`EditorCore::apply_reconciled`].
    Reconcile(PendingReconcile),
    EnterEditMode { block: BlockId, mode: EditMode },
    ExitEditMode { block: BlockId, mode: EditMode },
    ZIndexChanged { block: BlockId, z_index: i64 },
    /// Selection, bounds, or drag readout changed; repaint the overlay.
    OverlayChanged,
}

/// Core editor state. Independent of the DOM so it can be tested natively.
pub struct EditorCore {
    pub blocks: BlockStore,
    pub config: EditorConfig,
    pub drag: DragState,
    pub tracker: SelectionBoundsTracker,
    selection: Option<SelectionTarget>,
    editing: Option<(BlockId, EditMode)>,
    /// Whether the most recent session changed geometry. A double-click that
    /// follows a real drag does not enter edit mode.
    last_session_changed: bool,
    /// Last issued session number; the active drag, if any, owns it.
    session_seq: SessionId,
    /// Most recently ended session per block. Only its reconciliation applies.
    last_ended: HashMap<BlockId, SessionId>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorCore {
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self {
            blocks: BlockStore::new(),
            config,
            drag: DragState::Idle,
            tracker: SelectionBoundsTracker::new(),
            selection: None,
            editing: None,
            last_session_changed: false,
            session_seq: 0,
            last_ended: HashMap::new(),
        }
    }

    // --- Data inputs ---

    /// Replace every block with a snapshot from the host.
    pub fn load_snapshot(&mut self, blocks: Vec<Block>) -> Vec<Action> {
        let mut actions = self.cancel_drag();
        actions.extend(self.clear_selection());
        self.blocks.load_snapshot(blocks);
        self.last_ended.clear();
        actions
    }

    /// Register or replace one block.
    pub fn register_block(&mut self, block: Block) {
        self.blocks.insert(block);
    }

    /// Insert a new block of `kind` at the default centered position.
    pub fn insert_block(&mut self, kind: BlockKind) -> (BlockId, Vec<Action>) {
        let before = self.z_snapshot();
        let id = self.blocks.insert_centered(kind, &self.config);
        let mut actions = Vec::new();
        if let Some(block) = self.blocks.get(&id) {
            actions.push(Action::Paint { target: SelectionTarget::block(id), geometry: block.geometry });
            actions.push(Action::ZIndexChanged { block: id, z_index: block.z_index });
        }
        actions.extend(self.z_changes_since(before));
        (id, actions)
    }

    /// Remove a block, ending any drag or selection that referred to it.
    pub fn remove_block(&mut self, id: &BlockId) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.drag.target().is_some_and(|t| t.block == *id) {
            actions.extend(self.cancel_drag());
        }
        if self.selection.is_some_and(|t| t.block == *id) {
            actions.extend(self.clear_selection());
        }
        self.blocks.remove(id);
        self.last_ended.remove(id);
        actions
    }

    // --- Selection ---

    /// Change the selection. Leaves edit mode and abandons any drag.
    pub fn select<S: SurfaceInspector + ?Sized>(&mut self, target: Option<SelectionTarget>, surface: &S) -> Vec<Action> {
        if self.selection == target {
            return Vec::new();
        }
        let mut actions = self.cancel_drag();
        actions.extend(self.exit_edit_mode());
        self.selection = target;
        let eligible = target.is_some_and(|t| self.blocks.is_eligible(t));
        self.tracker.observe(target, eligible, surface);
        tracing::debug!(target = ?target, eligible, "selection changed");
        actions.push(Action::OverlayChanged);
        actions
    }

    fn clear_selection(&mut self) -> Vec<Action> {
        let mut actions = self.exit_edit_mode();
        if self.selection.take().is_some() {
            self.tracker.stop();
            actions.push(Action::OverlayChanged);
        }
        actions
    }

    #[must_use]
    pub fn selection(&self) -> Option<SelectionTarget> {
        self.selection
    }

    /// Forward a layout invalidation to the bounds tracker. Returns `true`
    /// when the host must call [`Self::on_animation_frame`] on the next frame.
    pub fn invalidate_bounds<S: SurfaceInspector + ?Sized>(&mut self, cause: Invalidation, surface: &S) -> bool {
        self.tracker.invalidate(cause, surface)
    }

    pub fn on_animation_frame<S: SurfaceInspector + ?Sized>(&mut self, surface: &S) {
        self.tracker.on_frame(surface);
    }

    // --- Pointer input ---

    /// Begin a move or resize session on the current selection.
    ///
    /// Any session still active is torn down first, so at most one session
    /// (and one set of document listeners) exists at a time.
    pub fn on_pointer_down<S: SurfaceInspector + ?Sized>(
        &mut self,
        region: HitRegion,
        screen_pt: Point,
        surface: &S,
    ) -> Vec<Action> {
        let Some(selected) = self.selection else {
            return Vec::new();
        };
        if region == HitRegion::Move && self.editing.is_some() {
            return Vec::new();
        }
        if !self.blocks.is_eligible(selected) {
            return Vec::new();
        }

        let mut actions = self.cancel_drag();

        // The move region always drags the whole block, even when the image
        // inside it is the selection.
        let target = match region {
            HitRegion::Move => SelectionTarget::block(selected.block),
            HitRegion::Handle(_) => selected,
        };
        if !surface.is_attached(target) {
            tracing::debug!(block = %target.block, "pointer-down on detached element ignored");
            return actions;
        }

        let scale = surface.current_scale();
        let Some(start) = self.start_geometry(target, surface, scale) else {
            tracing::debug!(block = %target.block, "no start geometry, drag not started");
            return actions;
        };

        self.drag = match region {
            HitRegion::Move => DragState::Moving { target, drag: MoveDrag::begin(screen_pt, start), current: start },
            HitRegion::Handle(handle) => {
                let min = self
                    .blocks
                    .get(&target.block)
                    .map_or(self.config.block_min(), |b| b.min_size(target.part, &self.config));
                DragState::Resizing { target, drag: ResizeDrag::begin(handle, screen_pt, start, min), current: start }
            }
        };
        self.last_session_changed = false;
        self.session_seq += 1;
        tracing::debug!(
            block = %target.block,
            session = self.session_seq,
            kind = ?self.drag.kind(),
            scale,
            "drag session started"
        );

        actions.push(Action::SuppressEmbeddedPointerEvents { block: target.block });
        actions.push(Action::OverlayChanged);
        actions
    }

    /// Advance the active session to `screen_pt`.
    pub fn on_pointer_move<S: SurfaceInspector + ?Sized>(
        &mut self,
        screen_pt: Point,
        modifiers: Modifiers,
        surface: &S,
    ) -> Vec<Action> {
        let Some(target) = self.drag.target() else {
            return Vec::new();
        };
        if !surface.is_attached(target) {
            tracing::debug!(block = %target.block, "element detached mid-drag, cancelling");
            return self.cancel_drag();
        }
        let Some(geometry) = self.step(screen_pt, modifiers, surface) else {
            return Vec::new();
        };
        self.blocks.set_geometry(target, geometry);
        vec![Action::Paint { target, geometry }, Action::OverlayChanged]
    }

    /// End the active session and hand off to reconciliation.
    pub fn on_pointer_up<S: SurfaceInspector + ?Sized>(
        &mut self,
        screen_pt: Point,
        modifiers: Modifiers,
        surface: &S,
    ) -> Vec<Action> {
        let Some(target) = self.drag.target() else {
            return Vec::new();
        };
        if !surface.is_attached(target) {
            tracing::debug!(block = %target.block, "element detached before pointer-up, cancelling");
            return self.cancel_drag();
        }

        let mut actions = Vec::new();
        let start = match &self.drag {
            DragState::Moving { drag, .. } => drag.start,
            DragState::Resizing { drag, .. } => drag.start,
            DragState::Idle => return actions,
        };
        if let Some(geometry) = self.step(screen_pt, modifiers, surface) {
            actions.push(Action::Paint { target, geometry });
        }
        let Some(saved) = self.drag.current() else {
            return actions;
        };
        self.drag = DragState::Idle;
        self.blocks.set_geometry(target, saved);
        self.last_session_changed = saved != start;
        tracing::debug!(block = %target.block, ?saved, "drag session ended");

        actions.push(Action::RestoreEmbeddedPointerEvents { block: target.block });
        self.last_ended.insert(target.block, self.session_seq);
        actions.push(Action::Reconcile(PendingReconcile::capture(surface, self.session_seq, target, saved)));
        actions.push(Action::OverlayChanged);
        actions
    }

    /// Abandon the active session without reconciling. Geometry already
    /// written stays where it is.
    pub fn cancel_drag(&mut self) -> Vec<Action> {
        let Some(target) = self.drag.target() else {
            return Vec::new();
        };
        self.drag = DragState::Idle;
        tracing::debug!(block = %target.block, "drag session cancelled");
        vec![Action::RestoreEmbeddedPointerEvents { block: target.block }, Action::OverlayChanged]
    }

    /// Apply the result of the reconciliation pass started for `session`.
    ///
    /// Skipped when a newer session has touched the same block since, whether
    /// it is still running or has already ended.
    pub fn apply_reconciled(&mut self, session: SessionId, outcome: ReconcileOutcome) -> Vec<Action> {
        let Some((target, geometry)) = outcome.geometry() else {
            return Vec::new();
        };
        if self.drag.target().is_some_and(|t| t.block == target.block) {
            tracing::debug!(block = %target.block, session, "newer drag in progress, dropping reconciliation");
            return Vec::new();
        }
        if self.last_ended.get(&target.block) != Some(&session) {
            tracing::debug!(block = %target.block, session, "superseded by a later drag, dropping reconciliation");
            return Vec::new();
        }
        if !self.blocks.set_geometry(target, geometry) {
            return Vec::new();
        }
        vec![Action::Paint { target, geometry }, Action::OverlayChanged]
    }

    fn step<S: SurfaceInspector + ?Sized>(&mut self, screen_pt: Point, modifiers: Modifiers, surface: &S) -> Option<Geometry> {
        let scale = surface.current_scale();
        let lock = self.config.aspect_locked(modifiers);
        let (next, current) = match &mut self.drag {
            DragState::Idle => return None,
            DragState::Moving { drag, current, .. } => (drag.geometry_at(screen_pt, scale), current),
            DragState::Resizing { drag, current, .. } => (drag.geometry_at(screen_pt, scale, lock), current),
        };
        if next == *current {
            return None;
        }
        *current = next;
        Some(next)
    }

    fn start_geometry<S: SurfaceInspector + ?Sized>(
        &self,
        target: SelectionTarget,
        surface: &S,
        scale: f64,
    ) -> Option<Geometry> {
        let block = self.blocks.get(&target.block)?;
        if let Some(stored) = block.geometry_of(target.part) {
            return Some(stored);
        }
        // No explicit image size: derive it from the rendered rectangle,
        // relative to the containing block.
        let rect = surface.element_rect(target)?;
        let container = surface.element_rect(SelectionTarget::block(target.block))?;
        let geometry = Geometry::from_screen_rect(rect, Point::new(container.left, container.top), scale);
        geometry.is_finite().then_some(geometry)
    }

    // --- Edit mode ---

    /// Double-activation of the move region enters edit mode.
    pub fn on_double_click(&mut self, region: HitRegion) -> Vec<Action> {
        if region != HitRegion::Move || !self.drag.is_idle() || self.editing.is_some() {
            return Vec::new();
        }
        if self.last_session_changed {
            self.last_session_changed = false;
            return Vec::new();
        }
        let Some(target) = self.selection else {
            return Vec::new();
        };
        let Some(block) = self.blocks.get(&target.block) else {
            return Vec::new();
        };
        let mode = if block.kind.is_live_code() { EditMode::LiveCode } else { EditMode::ContentEditable };
        self.editing = Some((block.id, mode));
        tracing::debug!(block = %block.id, ?mode, "entered edit mode");
        vec![Action::EnterEditMode { block: block.id, mode }, Action::OverlayChanged]
    }

    pub fn exit_edit_mode(&mut self) -> Vec<Action> {
        match self.editing.take() {
            Some((block, mode)) => vec![Action::ExitEditMode { block, mode }, Action::OverlayChanged],
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn edit_mode(&self) -> Option<EditMode> {
        self.editing.map(|(_, mode)| mode)
    }

    // --- Layer order ---

    pub fn bring_to_front(&mut self, id: &BlockId) -> Vec<Action> {
        z_change(*id, self.blocks.bring_to_front(id))
    }

    pub fn send_to_back(&mut self, id: &BlockId) -> Vec<Action> {
        // Sending to back may renumber every other block.
        let before = self.z_snapshot();
        if self.blocks.send_to_back(id).is_none() {
            return Vec::new();
        }
        self.z_changes_since(before)
    }

    pub fn bring_forward(&mut self, id: &BlockId) -> Vec<Action> {
        let before = self.z_snapshot();
        if self.blocks.bring_forward(id).is_none() {
            return Vec::new();
        }
        self.z_changes_since(before)
    }

    pub fn send_backward(&mut self, id: &BlockId) -> Vec<Action> {
        let before = self.z_snapshot();
        if self.blocks.send_backward(id).is_none() {
            return Vec::new();
        }
        self.z_changes_since(before)
    }

    fn z_snapshot(&self) -> Vec<(BlockId, i64)> {
        self.blocks.sorted_blocks().iter().map(|b| (b.id, b.z_index)).collect()
    }

    fn z_changes_since(&self, before: Vec<(BlockId, i64)>) -> Vec<Action> {
        before
            .into_iter()
            .filter_map(|(block, old)| {
                let z_index = self.blocks.get(&block)?.z_index;
                (z_index != old).then_some(Action::ZIndexChanged { block, z_index })
            })
            .collect()
    }

    // --- Queries ---

    /// Overlay for the current selection, or `None` when nothing eligible is selected.
    #[must_use]
    pub fn overlay(&self) -> Option<OverlayModel> {
        OverlayModel::build(self.tracker.current(), &self.drag, self.editing.is_some(), self.config.handle_size)
    }

    #[must_use]
    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.get(id)
    }
}

fn z_change(block: BlockId, z: Option<i64>) -> Vec<Action> {
    z.map(|z_index| vec![Action::ZIndexChanged { block, z_index }]).unwrap_or_default()
}

/// Forward the painting side of `actions` to a render sink.
pub fn dispatch<R: RenderSink + ?Sized>(actions: &[Action], sink: &mut R) {
    for action in actions {
        match action {
            Action::Paint { target, geometry } => sink.paint(*target, *geometry),
            Action::SuppressEmbeddedPointerEvents { block } => sink.set_embedded_pointer_events(*block, false),
            Action::RestoreEmbeddedPointerEvents { block } => sink.set_embedded_pointer_events(*block, true),
            _ => {}
        }
    }
}
