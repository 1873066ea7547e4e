//! `SurfaceInspector` over the deck's live DOM.

use std::cell::RefCell;

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::block::{BlockId, SelectionTarget, TargetPart};
use crate::geom::Rect;
use crate::surface::SurfaceInspector;

#[cfg(test)]
#[path = "dom_test.rs"]
mod dom_test;

/// Selector for the slide currently on screen.
const PRESENT_SLIDE: &str = "section.present";

/// Reads scale and offsets from the deck and locates blocks by their
/// `data-block-id` attribute.
pub struct DomSurface {
    /// Presentation root; every block lives somewhere beneath it.
    root: Element,
    /// The container the deck scales with a CSS transform.
    scaled: Element,
    /// Deck API object (`getScale()`, `layout()`), if the host passed one.
    host: JsValue,
    on_change: RefCell<Option<Function>>,
}

impl DomSurface {
    #[must_use]
    pub fn new(root: Element, scaled: Element, host: JsValue) -> Self {
        Self { root, scaled, host, on_change: RefCell::new(None) }
    }

    /// Host callback fired whenever content geometry changed.
    pub fn set_on_change(&self, callback: Option<Function>) {
        *self.on_change.borrow_mut() = callback;
    }

    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    fn host_method(&self, name: &str) -> Option<Function> {
        if !self.host.is_object() {
            return None;
        }
        match Reflect::get(&self.host, &JsValue::from_str(name)) {
            Ok(value) => value.dyn_ref::<Function>().cloned(),
            Err(err) => {
                tracing::trace!(name, ?err, "host method lookup failed");
                None
            }
        }
    }
}

impl SurfaceInspector for DomSurface {
    fn applied_transform(&self) -> Option<String> {
        computed_property(&self.scaled, "transform")
    }

    fn host_scale(&self) -> Option<f64> {
        let get_scale = self.host_method("getScale")?;
        match get_scale.call0(&self.host) {
            Ok(value) => value.as_f64(),
            Err(err) => {
                tracing::trace!(?err, "host getScale() threw");
                None
            }
        }
    }

    fn current_slide_top_offset(&self) -> Option<f64> {
        let slide = query(&self.root, PRESENT_SLIDE)?;
        parse_px(&computed_property(&slide, "top")?)
    }

    fn request_relayout(&self) {
        if let Some(callback) = self.on_change.borrow().as_ref() {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                tracing::warn!(?err, "content-changed callback threw");
            }
        }
        if let Some(layout) = self.host_method("layout") {
            if let Err(err) = layout.call0(&self.host) {
                tracing::warn!(?err, "host layout() threw");
            }
        }
    }

    fn element_rect(&self, target: SelectionTarget) -> Option<Rect> {
        let el = find_target(&self.root, target)?;
        if !el.is_connected() {
            return None;
        }
        let r = el.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()))
    }
}

/// First element under `scope` matching `selector`. Invalid selectors count
/// as no match.
pub(crate) fn query(scope: &Element, selector: &str) -> Option<Element> {
    match scope.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            tracing::trace!(selector, ?err, "query_selector failed");
            None
        }
    }
}

pub(crate) fn block_selector(id: BlockId) -> String {
    format!("[data-block-id=\"{id}\"]")
}

/// Locate the DOM element for `target` beneath `root`.
pub(crate) fn find_target(root: &Element, target: SelectionTarget) -> Option<Element> {
    let block = query(root, &block_selector(target.block))?;
    match target.part {
        TargetPart::Block => Some(block),
        TargetPart::Image => query(&block, "img"),
    }
}

/// Computed value of a CSS property, or `None` if the browser won't say.
pub(crate) fn computed_property(el: &Element, property: &str) -> Option<String> {
    let window = web_sys::window()?;
    let style = match window.get_computed_style(el) {
        Ok(style) => style?,
        Err(err) => {
            tracing::trace!(property, ?err, "getComputedStyle failed");
            return None;
        }
    };
    match style.get_property_value(property) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::trace!(property, ?err, "computed property unreadable");
            None
        }
    }
}

/// Parse a CSS length like `"84px"` or `"-12.5px"`. Bare numbers are accepted.
pub(crate) fn parse_px(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    match number.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}
