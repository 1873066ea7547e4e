//! Browser event sources that invalidate the cached selection bounds.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, MutationObserver, MutationObserverInit};

use super::WebError;
use crate::bounds::Invalidation;

/// Listens for everything that can move the selection on screen.
///
/// Window resizes, scrolls of any ancestor (captured at the document), and
/// DOM mutations beneath the presentation root. Dropping it removes the
/// listeners and disconnects the mutation observer.
pub struct BoundsObserver {
    _resize: EventListener,
    _scroll: EventListener,
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl BoundsObserver {
    pub fn attach(root: &Element, on_invalidate: Rc<dyn Fn(Invalidation)>) -> Result<Self, WebError> {
        let window = super::window()?;
        let document = super::document()?;

        let cb = Rc::clone(&on_invalidate);
        let resize = EventListener::new(&window, "resize", move |_| cb(Invalidation::WindowResize));

        let cb = Rc::clone(&on_invalidate);
        let scroll = EventListener::new_with_options(
            &document,
            "scroll",
            EventListenerOptions { phase: EventListenerPhase::Capture, passive: true },
            move |_| cb(Invalidation::Scroll),
        );

        let cb = on_invalidate;
        let on_mutation = Closure::<dyn FnMut(Array, MutationObserver)>::new(move |_: Array, _: MutationObserver| {
            cb(Invalidation::Mutation);
        });
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        init.set_attributes(true);
        observer.observe_with_options(root, &init)?;

        tracing::debug!("bounds observer attached");
        Ok(Self { _resize: resize, _scroll: scroll, observer, _on_mutation: on_mutation })
    }
}

impl Drop for BoundsObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
