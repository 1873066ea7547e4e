//! The wasm export the host page drives.
//!
//! `SlideEditor` owns an `EditorCore` plus the DOM collaborators and turns
//! browser events into core calls. Actions the core returns are carried out
//! here: geometry goes to the `StylePainter`, reconciliation runs on
//! `spawn_local`, and overlay/edit-mode/z-order changes are reported to the
//! host through JSON callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use futures::StreamExt;
use gloo_events::EventListener;
use gloo_render::{AnimationFrame, request_animation_frame};
use js_sys::Function;
use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MouseEvent, PointerEvent};

use super::{BoundsObserver, DomSurface, FrameSettler, StylePainter, WebError};
use crate::block::{Block, BlockId, BlockKind, SelectionTarget};
use crate::bounds::Invalidation;
use crate::config::EditorConfig;
use crate::editor::{Action, EditMode, EditorCore, dispatch};
use crate::geom::Point;
use crate::reconcile::{PendingReconcile, reconcile};
use crate::session::{ListenerSlot, Modifiers};

/// Document-level listeners for one drag session. Dropping detaches both.
struct DragListeners {
    _move: EventListener,
    _up: EventListener,
}

/// Notifications delivered to the host's event callback.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum HostEvent {
    EnterEditMode {
        block: BlockId,
        mode: EditMode,
    },
    ExitEditMode {
        block: BlockId,
        mode: EditMode,
    },
    ZIndexChanged {
        block: BlockId,
        #[serde(rename = "zIndex")]
        z_index: i64,
    },
}

struct Inner {
    core: RefCell<EditorCore>,
    surface: DomSurface,
    settler: FrameSettler,
    painter: RefCell<StylePainter>,
    drag_listeners: RefCell<ListenerSlot<DragListeners>>,
    observer: RefCell<Option<BoundsObserver>>,
    bounds_frame: RefCell<Option<AnimationFrame>>,
    on_overlay: RefCell<Option<Function>>,
    on_event: RefCell<Option<Function>>,
}

#[wasm_bindgen]
pub struct SlideEditor {
    inner: Rc<Inner>,
}

#[wasm_bindgen]
impl SlideEditor {
    /// Bind to a deck.
    ///
    /// `root` contains every block, `scaled` is the element the deck scales
    /// with a CSS transform, `host` is the deck API object (or `undefined`),
    /// and `config` is optional `EditorConfig` JSON.
    #[wasm_bindgen(constructor)]
    pub fn new(root: Element, scaled: Element, host: JsValue, config: Option<String>) -> Result<SlideEditor, JsValue> {
        let config = match config.as_deref() {
            Some(raw) => EditorConfig::from_json(raw).map_err(WebError::from)?,
            None => EditorConfig::default(),
        };
        let settler = FrameSettler::new(config.settle_frames);
        let mut core = EditorCore::new(config);
        let mut bounds = core.tracker.subscribe();

        let inner = Rc::new(Inner {
            core: RefCell::new(core),
            surface: DomSurface::new(root.clone(), scaled, host),
            settler,
            painter: RefCell::new(StylePainter::new(root.clone())),
            drag_listeners: RefCell::new(ListenerSlot::new()),
            observer: RefCell::new(None),
            bounds_frame: RefCell::new(None),
            on_overlay: RefCell::new(None),
            on_event: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let observer = BoundsObserver::attach(
            &root,
            Rc::new(move |cause| {
                if let Some(inner) = weak.upgrade() {
                    inner.invalidate(cause);
                }
            }),
        )?;
        *inner.observer.borrow_mut() = Some(observer);

        let weak = Rc::downgrade(&inner);
        wasm_bindgen_futures::spawn_local(async move {
            while bounds.next().await.is_some() {
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                inner.publish_overlay();
            }
        });

        tracing::info!("slide editor attached");
        Ok(Self { inner })
    }

    // --- Host callbacks ---

    /// Called after every geometry change, before reconciliation waits.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        self.inner.surface.set_on_change(callback);
    }

    /// Receives the overlay model as a JSON string (`null` when hidden).
    #[wasm_bindgen(js_name = setOnOverlay)]
    pub fn set_on_overlay(&self, callback: Option<Function>) {
        *self.inner.on_overlay.borrow_mut() = callback;
        self.inner.publish_overlay();
    }

    /// Receives edit-mode and z-order notifications as JSON strings.
    #[wasm_bindgen(js_name = setOnEvent)]
    pub fn set_on_event(&self, callback: Option<Function>) {
        *self.inner.on_event.borrow_mut() = callback;
    }

    // --- Blocks ---

    #[wasm_bindgen(js_name = registerBlock)]
    pub fn register_block(&self, json: &str) -> Result<(), JsValue> {
        let block: Block = serde_json::from_str(json).map_err(WebError::from)?;
        self.inner.core.borrow_mut().register_block(block);
        Ok(())
    }

    #[wasm_bindgen(js_name = loadSnapshot)]
    pub fn load_snapshot(&self, json: &str) -> Result<(), JsValue> {
        let blocks: Vec<Block> = serde_json::from_str(json).map_err(WebError::from)?;
        let actions = self.inner.core.borrow_mut().load_snapshot(blocks);
        self.inner.process(actions);
        Ok(())
    }

    /// Insert a centered block of `kind` (e.g. `"text"`). Returns its id.
    #[wasm_bindgen(js_name = insertBlock)]
    pub fn insert_block(&self, kind: &str) -> Result<String, JsValue> {
        let kind: BlockKind =
            serde_json::from_value(serde_json::Value::String(kind.to_owned())).map_err(WebError::from)?;
        let (id, actions) = self.inner.core.borrow_mut().insert_block(kind);
        self.inner.process(actions);
        Ok(id.to_string())
    }

    #[wasm_bindgen(js_name = removeBlock)]
    pub fn remove_block(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let actions = self.inner.core.borrow_mut().remove_block(&id);
        self.inner.process(actions);
        Ok(())
    }

    /// Current block state as JSON, or `undefined` if unknown.
    pub fn block(&self, id: &str) -> Result<Option<String>, JsValue> {
        let id = parse_id(id)?;
        let core = self.inner.core.borrow();
        match core.block(&id) {
            Some(block) => Ok(Some(serde_json::to_string(block).map_err(WebError::from)?)),
            None => Ok(None),
        }
    }

    // --- Selection ---

    /// Select a block (or the image inside it), or clear with `undefined`.
    pub fn select(&self, id: Option<String>, image: bool) -> Result<(), JsValue> {
        let target = match id.as_deref() {
            Some(id) => {
                let id = parse_id(id)?;
                Some(if image { SelectionTarget::image(id) } else { SelectionTarget::block(id) })
            }
            None => None,
        };
        let actions = self.inner.core.borrow_mut().select(target, &self.inner.surface);
        self.inner.process(actions);
        Ok(())
    }

    /// Overlay model as JSON (`null` when nothing is selected).
    pub fn overlay(&self) -> Result<String, JsValue> {
        self.inner.overlay_json().map_err(JsValue::from)
    }

    // --- Pointer input ---

    /// Feed a pointer-down from the overlay layer. Returns whether it hit a
    /// handle or the move region and started a session.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, event: PointerEvent) -> Result<bool, JsValue> {
        self.inner.pointer_down(&event).map_err(JsValue::from)
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&self, event: MouseEvent) -> bool {
        let pt = client_point(&event);
        let region = self.inner.core.borrow().overlay().and_then(|o| o.hit(pt));
        let Some(region) = region else {
            return false;
        };
        let actions = self.inner.core.borrow_mut().on_double_click(region);
        let entered = !actions.is_empty();
        self.inner.process(actions);
        entered
    }

    #[wasm_bindgen(js_name = cancelDrag)]
    pub fn cancel_drag(&self) {
        let actions = self.inner.core.borrow_mut().cancel_drag();
        self.inner.drag_listeners.borrow_mut().detach();
        self.inner.process(actions);
    }

    #[wasm_bindgen(js_name = exitEditMode)]
    pub fn exit_edit_mode(&self) {
        let actions = self.inner.core.borrow_mut().exit_edit_mode();
        self.inner.process(actions);
    }

    // --- Layer order ---

    #[wasm_bindgen(js_name = bringToFront)]
    pub fn bring_to_front(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let actions = self.inner.core.borrow_mut().bring_to_front(&id);
        self.inner.process(actions);
        Ok(())
    }

    #[wasm_bindgen(js_name = sendToBack)]
    pub fn send_to_back(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let actions = self.inner.core.borrow_mut().send_to_back(&id);
        self.inner.process(actions);
        Ok(())
    }

    #[wasm_bindgen(js_name = bringForward)]
    pub fn bring_forward(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let actions = self.inner.core.borrow_mut().bring_forward(&id);
        self.inner.process(actions);
        Ok(())
    }

    #[wasm_bindgen(js_name = sendBackward)]
    pub fn send_backward(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let actions = self.inner.core.borrow_mut().send_backward(&id);
        self.inner.process(actions);
        Ok(())
    }
}

impl Inner {
    fn pointer_down(self: &Rc<Self>, event: &PointerEvent) -> Result<bool, WebError> {
        let pt = client_point(event);
        let region = self.core.borrow().overlay().and_then(|o| o.hit(pt));
        let Some(region) = region else {
            return Ok(false);
        };
        event.prevent_default();

        let actions = self.core.borrow_mut().on_pointer_down(region, pt, &self.surface);
        let started = !self.core.borrow().drag.is_idle();
        if started {
            self.attach_drag_listeners()?;
        } else {
            self.drag_listeners.borrow_mut().detach();
        }
        self.process(actions);
        Ok(started)
    }

    fn pointer_move(self: &Rc<Self>, event: &PointerEvent) {
        let actions = self.core.borrow_mut().on_pointer_move(client_point(event), modifiers(event), &self.surface);
        if self.core.borrow().drag.is_idle() {
            self.drag_listeners.borrow_mut().detach();
        }
        self.process(actions);
    }

    fn pointer_up(self: &Rc<Self>, event: &PointerEvent) {
        let actions = self.core.borrow_mut().on_pointer_up(client_point(event), modifiers(event), &self.surface);
        self.drag_listeners.borrow_mut().detach();
        self.process(actions);
    }

    /// Listeners go on the document so releasing anywhere ends the session.
    fn attach_drag_listeners(self: &Rc<Self>) -> Result<(), WebError> {
        let document = super::document()?;
        let on_move = Rc::downgrade(self);
        let on_up = Rc::downgrade(self);
        self.drag_listeners.borrow_mut().attach(|| DragListeners {
            _move: EventListener::new(&document, "pointermove", move |event| {
                if let (Some(inner), Some(event)) = (on_move.upgrade(), event.dyn_ref::<PointerEvent>()) {
                    inner.pointer_move(event);
                }
            }),
            _up: EventListener::new(&document, "pointerup", move |event| {
                if let (Some(inner), Some(event)) = (on_up.upgrade(), event.dyn_ref::<PointerEvent>()) {
                    inner.pointer_up(event);
                }
            }),
        });
        Ok(())
    }

    fn invalidate(self: &Rc<Self>, cause: Invalidation) {
        let wants_frame = self.core.borrow_mut().invalidate_bounds(cause, &self.surface);
        if wants_frame {
            self.schedule_bounds_frame();
        }
    }

    /// Coalesce mutation bursts into one re-measure on the next frame.
    fn schedule_bounds_frame(self: &Rc<Self>) {
        if self.bounds_frame.borrow().is_some() {
            return;
        }
        let weak = Rc::downgrade(self);
        let frame = request_animation_frame(move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.bounds_frame.borrow_mut().take();
            inner.core.borrow_mut().on_animation_frame(&inner.surface);
        });
        *self.bounds_frame.borrow_mut() = Some(frame);
    }

    fn process(self: &Rc<Self>, actions: Vec<Action>) {
        if actions.is_empty() {
            return;
        }
        dispatch(&actions, &mut *self.painter.borrow_mut());

        let mut overlay_changed = false;
        for action in actions {
            match action {
                Action::Reconcile(pending) => self.spawn_reconcile(pending),
                Action::EnterEditMode { block, mode } => {
                    self.painter.borrow_mut().set_edit_mode(block, mode, true);
                    self.emit(&HostEvent::EnterEditMode { block, mode });
                }
                Action::ExitEditMode { block, mode } => {
                    self.painter.borrow_mut().set_edit_mode(block, mode, false);
                    self.emit(&HostEvent::ExitEditMode { block, mode });
                }
                Action::ZIndexChanged { block, z_index } => {
                    self.painter.borrow_mut().set_z_index(block, z_index);
                    self.emit(&HostEvent::ZIndexChanged { block, z_index });
                }
                Action::OverlayChanged => overlay_changed = true,
                Action::Paint { .. }
                | Action::SuppressEmbeddedPointerEvents { .. }
                | Action::RestoreEmbeddedPointerEvents { .. } => {}
            }
        }
        if overlay_changed {
            self.publish_overlay();
        }
    }

    fn spawn_reconcile(self: &Rc<Self>, pending: PendingReconcile) {
        let inner = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = reconcile(pending, &inner.surface, &inner.settler).await;
            tracing::debug!(?outcome, "reconciliation finished");
            let actions = inner.core.borrow_mut().apply_reconciled(pending.session, outcome);
            inner.process(actions);
        });
    }

    fn overlay_json(&self) -> Result<String, WebError> {
        Ok(serde_json::to_string(&self.core.borrow().overlay())?)
    }

    fn publish_overlay(&self) {
        let Some(callback) = self.on_overlay.borrow().clone() else {
            return;
        };
        match self.overlay_json() {
            Ok(json) => call_host(&callback, &json),
            Err(err) => tracing::warn!(%err, "overlay serialization failed"),
        }
    }

    fn emit(&self, event: &HostEvent) {
        let Some(callback) = self.on_event.borrow().clone() else {
            return;
        };
        match serde_json::to_string(event) {
            Ok(json) => call_host(&callback, &json),
            Err(err) => tracing::warn!(%err, "host event serialization failed"),
        }
    }
}

fn call_host(callback: &Function, json: &str) {
    if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(json)) {
        tracing::warn!(?err, "host callback threw");
    }
}

fn parse_id(raw: &str) -> Result<BlockId, WebError> {
    Uuid::parse_str(raw).map_err(|_| WebError::BadId(raw.to_owned()))
}

fn client_point(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn modifiers(event: &MouseEvent) -> Modifiers {
    Modifiers { shift: event.shift_key(), ctrl: event.ctrl_key(), alt: event.alt_key(), meta: event.meta_key() }
}
