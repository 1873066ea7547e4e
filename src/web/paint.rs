//! Inline-style painter for block geometry, z-order and edit mode.

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Element, HtmlElement};

use super::dom::{find_target, query};
use crate::block::{BlockId, SelectionTarget};
use crate::editor::EditMode;
use crate::geom::Geometry;
use crate::surface::RenderSink;

/// Nested content that would otherwise swallow document pointer events.
const EMBEDDED: &str = "iframe, video";
/// Inner element that becomes editable in content-editable mode.
const BLOCK_CONTENT: &str = ".sl-block-content";

/// Writes geometry as inline `px` styles on the block elements.
pub struct StylePainter {
    root: Element,
}

impl StylePainter {
    #[must_use]
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    fn block_element(&self, block: BlockId) -> Option<Element> {
        find_target(&self.root, SelectionTarget::block(block))
    }

    pub fn set_z_index(&mut self, block: BlockId, z_index: i64) {
        if let Some(style) = self.block_element(block).as_ref().and_then(style_of) {
            set_property(&style, "z-index", &z_index.to_string());
        }
    }

    /// Toggle the DOM side of edit mode.
    ///
    /// Content-editable mode makes the block's content editable and focuses
    /// it. Live-code mode instead forces `contenteditable="false"` on the
    /// block and its slide so keystrokes reach the nested editor.
    pub fn set_edit_mode(&mut self, block: BlockId, mode: EditMode, active: bool) {
        let Some(el) = self.block_element(block) else {
            tracing::debug!(%block, "edit mode target missing");
            return;
        };
        match mode {
            EditMode::ContentEditable => {
                let content = query(&el, BLOCK_CONTENT).unwrap_or(el);
                if active {
                    set_attribute(&content, "contenteditable", "true");
                    if let Some(html) = content.dyn_ref::<HtmlElement>() {
                        if let Err(err) = html.focus() {
                            tracing::trace!(?err, "focus failed");
                        }
                    }
                } else {
                    remove_attribute(&content, "contenteditable");
                }
            }
            EditMode::LiveCode => {
                let slide = match el.closest("section") {
                    Ok(slide) => slide,
                    Err(err) => {
                        tracing::trace!(?err, "closest(section) failed");
                        None
                    }
                };
                for target in std::iter::once(&el).chain(slide.as_ref()) {
                    if active {
                        set_attribute(target, "contenteditable", "false");
                    } else {
                        remove_attribute(target, "contenteditable");
                    }
                }
            }
        }
    }
}

impl RenderSink for StylePainter {
    fn paint(&mut self, target: SelectionTarget, geometry: Geometry) {
        let Some(style) = find_target(&self.root, target).as_ref().and_then(style_of) else {
            tracing::trace!(block = %target.block, "paint target missing");
            return;
        };
        set_property(&style, "left", &px(geometry.left));
        set_property(&style, "top", &px(geometry.top));
        set_property(&style, "width", &px(geometry.width));
        set_property(&style, "height", &px(geometry.height));
    }

    fn set_embedded_pointer_events(&mut self, block: BlockId, enabled: bool) {
        let Some(el) = self.block_element(block) else {
            return;
        };
        let nodes = match el.query_selector_all(EMBEDDED) {
            Ok(nodes) => nodes,
            Err(err) => {
                tracing::trace!(?err, "embedded content query failed");
                return;
            }
        };
        for i in 0..nodes.length() {
            let Some(style) = nodes.item(i).as_ref().and_then(|n| n.dyn_ref::<HtmlElement>()).map(HtmlElement::style)
            else {
                continue;
            };
            if enabled {
                if let Err(err) = style.remove_property("pointer-events") {
                    tracing::trace!(?err, "pointer-events reset failed");
                }
            } else {
                set_property(&style, "pointer-events", "none");
            }
        }
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

fn style_of(el: &Element) -> Option<CssStyleDeclaration> {
    el.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

fn set_property(style: &CssStyleDeclaration, name: &str, value: &str) {
    if let Err(err) = style.set_property(name, value) {
        tracing::warn!(name, ?err, "style write failed");
    }
}

fn set_attribute(el: &Element, name: &str, value: &str) {
    if let Err(err) = el.set_attribute(name, value) {
        tracing::warn!(name, ?err, "attribute write failed");
    }
}

fn remove_attribute(el: &Element, name: &str) {
    if let Err(err) = el.remove_attribute(name) {
        tracing::warn!(name, ?err, "attribute removal failed");
    }
}
