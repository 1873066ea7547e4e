//! Direct-manipulation geometry engine for slide deck content blocks.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to a
//! scaled, auto-recentering presentation surface. It owns the drag lifecycle
//! for absolutely-positioned blocks: converting screen-pixel pointer deltas
//! into the virtual slide coordinate space, resizing from eight handles with
//! optional aspect lock, free movement, and the post-drag correction that
//! cancels the visual jump caused by the host re-centering its slides.
//!
//! All geometry and state lives in [`editor::EditorCore`], which talks to the
//! host only through the traits in [`surface`] and the [`editor::Action`]s it
//! returns. The [`web`] module binds those traits to the DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | Composition root and testable [`editor::EditorCore`] |
//! | [`block`] | Block model, in-memory store, layer ordering |
//! | [`geom`] | Points, rectangles, block geometry |
//! | [`scale`] | Resolving the applied scale of the presentation surface |
//! | [`transform`] | Screen-to-virtual delta conversion |
//! | [`handle`] | The eight resize handles and overlay hit regions |
//! | [`resize`] | Resize gesture math |
//! | [`moving`] | Move gesture math |
//! | [`session`] | Drag state machine and document listener bookkeeping |
//! | [`reconcile`] | Post-drag origin-shift compensation |
//! | [`bounds`] | Selection bounds tracking |
//! | [`overlay`] | Selection overlay view model |
//! | [`surface`] | Host collaborator traits |
//! | [`config`] | Editor configuration |
//! | [`consts`] | Shared numeric constants (minimum sizes, handle size, etc.) |
//! | [`web`] | DOM bindings and the `SlideEditor` wasm export |

pub mod block;
pub mod bounds;
pub mod config;
pub mod consts;
pub mod editor;
pub mod geom;
pub mod handle;
pub mod moving;
pub mod overlay;
pub mod reconcile;
pub mod resize;
pub mod scale;
pub mod session;
pub mod surface;
pub mod transform;
pub mod web;
