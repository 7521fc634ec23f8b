//! Canvas 2D renderer
//!
//! Replays the display list from [`super::shapes`] on an HTML canvas.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{DrawCmd, build_frame};
use crate::present::{FrameSnapshot, Renderer};

/// Draws frames onto a `<canvas>` element
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2D context of `canvas`. Returns `None` if the browser
    /// refuses one.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    fn set_glow(&self, color: &str, glow: Option<f32>) {
        match glow {
            Some(blur) => {
                self.ctx.set_shadow_color(color);
                self.ctx.set_shadow_blur(blur as f64);
            }
            None => {
                self.ctx.set_shadow_color("transparent");
                self.ctx.set_shadow_blur(0.0);
            }
        }
    }

    fn execute(&self, cmd: &DrawCmd) {
        let ctx = &self.ctx;
        match cmd {
            DrawCmd::Clear { size } => {
                ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
            }
            DrawCmd::Rect {
                pos,
                size,
                color,
                alpha,
                glow,
            } => {
                self.set_glow(color, *glow);
                ctx.set_global_alpha(*alpha as f64);
                ctx.set_fill_style_str(color);
                ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                ctx.set_global_alpha(1.0);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
                glow,
            } => {
                self.set_glow(color, *glow);
                ctx.begin_path();
                if ctx
                    .arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        std::f64::consts::TAU,
                    )
                    .is_err()
                {
                    log::warn!("Canvas rejected arc with radius {}", radius);
                }
                ctx.set_fill_style_str(color);
                ctx.fill();
                ctx.close_path();
            }
            DrawCmd::Text {
                text,
                pos,
                size,
                color,
            } => {
                self.set_glow(color, Some(10.0));
                ctx.set_font(&format!("{}px \"Courier New\", Courier, monospace", size));
                ctx.set_text_align("center");
                ctx.set_fill_style_str(color);
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
                ctx.set_text_align("left");
            }
        }
        self.set_glow("transparent", None);
    }
}

impl Renderer for CanvasRenderer {
    fn draw_frame(&mut self, frame: &FrameSnapshot<'_>) {
        for cmd in build_frame(frame) {
            self.execute(&cmd);
        }
    }
}
