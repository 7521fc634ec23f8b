//! 2D rendering
//!
//! `shapes` builds a display list from a frame snapshot; `canvas` replays it
//! on an HTML canvas in the browser build.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{DrawCmd, build_frame, hud_text, overlay_title};
