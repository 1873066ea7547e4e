//! Layout settling on the browser's animation-frame clock.

use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_render::request_animation_frame;

use crate::surface::LayoutSettler;

/// Treats layout as settled after a fixed number of animation frames.
///
/// One frame lets the host schedule its layout, one lets it run, and one lets
/// any re-render that depends on it flush; hence the default of three.
#[derive(Debug, Clone, Copy)]
pub struct FrameSettler {
    frames: u32,
}

impl FrameSettler {
    #[must_use]
    pub fn new(frames: u32) -> Self {
        Self { frames: frames.max(1) }
    }
}

#[async_trait(?Send)]
impl LayoutSettler for FrameSettler {
    async fn wait_for_layout_settled(&self) {
        for _ in 0..self.frames {
            next_frame().await;
        }
    }
}

async fn next_frame() {
    let (tx, rx) = oneshot::channel::<f64>();
    // Dropping the handle cancels the request, so it must outlive the await.
    let frame = request_animation_frame(move |timestamp| {
        if tx.send(timestamp).is_err() {
            tracing::trace!("frame waiter went away");
        }
    });
    if rx.await.is_err() {
        tracing::trace!("animation frame cancelled");
    }
    drop(frame);
}
