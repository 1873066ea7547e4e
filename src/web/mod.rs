//! Browser bindings.
//!
//! Everything in here touches the DOM through `web-sys` and is only exercised
//! inside a browser. The pieces map one-to-one onto the core's collaborator
//! traits:
//!
//! | Type | Role |
//! |------|------|
//! | [`DomSurface`] | `SurfaceInspector` over the deck's DOM |
//! | [`FrameSettler`] | `LayoutSettler` that awaits animation frames |
//! | [`StylePainter`] | `RenderSink` writing inline px styles |
//! | [`BoundsObserver`] | resize / scroll / mutation listeners feeding the tracker |
//! | [`SlideEditor`] | the `#[wasm_bindgen]` export the host page drives |

mod dom;
mod observer;
mod paint;
mod settle;
mod slide_editor;

pub use dom::DomSurface;
pub use observer::BoundsObserver;
pub use paint::StylePainter;
pub use settle::FrameSettler;
pub use slide_editor::SlideEditor;

use wasm_bindgen::prelude::*;

use crate::config::ConfigError;

/// Error type for DOM binding failures.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("javascript call failed: {0}")]
    Js(String),
    #[error("invalid block id: {0:?}")]
    BadId(String),
    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("logger already installed: {0}")]
    Logger(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub(crate) fn window() -> Result<web_sys::Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

pub(crate) fn document() -> Result<web_sys::Document, WebError> {
    window()?.document().ok_or(WebError::NoDocument)
}

/// Route `tracing`/`log` output to the browser console and install the
/// panic hook. `level` is a `log` level name; unknown names mean `info`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = match level.parse::<log::Level>() {
        Ok(level) => level,
        Err(_) => log::Level::Info,
    };
    console_log::init_with_level(level).map_err(|err| WebError::Logger(err.to_string()))?;
    tracing::info!(%level, "logging initialised");
    Ok(())
}
