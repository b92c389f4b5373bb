// Canvas 2D backend for the scene painter
use game::scene::{Color, Composite, Paint, Painter, TextAlign};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Renderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(canvas: HtmlCanvasElement, width: f32, height: f32) -> Result<Self, JsValue> {
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn gradient(&self, paint: &Paint) -> Option<CanvasGradient> {
        let (gradient, start, end) = match paint {
            Paint::Solid(_) => return None,
            Paint::Linear { from, to, start, end } => (
                self.ctx
                    .create_linear_gradient(from.x as f64, from.y as f64, to.x as f64, to.y as f64),
                start,
                end,
            ),
            Paint::Radial {
                inner,
                inner_radius,
                outer,
                outer_radius,
                start,
                end,
            } => (
                self.ctx
                    .create_radial_gradient(
                        inner.x as f64,
                        inner.y as f64,
                        *inner_radius as f64,
                        outer.x as f64,
                        outer.y as f64,
                        *outer_radius as f64,
                    )
                    .ok()?,
                start,
                end,
            ),
        };
        gradient.add_color_stop(0.0, &start.css()).ok()?;
        gradient.add_color_stop(1.0, &end.css()).ok()?;
        Some(gradient)
    }

    #[inline]
    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .ok();
    }
}

impl Painter for Renderer {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_composite(&mut self, mode: Composite) {
        self.ctx.set_global_composite_operation(mode.css()).ok();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.css()),
            _ => {
                if let Some(gradient) = self.gradient(paint) {
                    self.ctx.set_fill_style_canvas_gradient(&gradient);
                }
            }
        }
    }

    fn set_stroke(&mut self, paint: &Paint, width: f32) {
        match paint {
            Paint::Solid(color) => self.ctx.set_stroke_style_str(&color.css()),
            _ => {
                if let Some(gradient) = self.gradient(paint) {
                    self.ctx.set_stroke_style_canvas_gradient(&gradient);
                }
            }
        }
        self.ctx.set_line_width(width as f64);
    }

    fn set_shadow(&mut self, color: Color, blur: f32) {
        self.ctx.set_shadow_color(&color.css());
        self.ctx.set_shadow_blur(blur as f64);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.ctx.translate(x as f64, y as f64).ok();
    }

    fn rotate(&mut self, angle: f32) {
        self.ctx.rotate(angle as f64).ok();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx.fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn round_rect(&mut self, x: f32, y: f32, width: f32, height: f32, radius: f32) {
        let (x, y, w, h) = (x as f64, y as f64, width as f64, height as f64);
        let r = (radius as f64).min(w / 2.0).min(h / 2.0);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r).ok();
        ctx.arc_to(x + w, y + h, x, y + h, r).ok();
        ctx.arc_to(x, y + h, x, y, r).ok();
        ctx.arc_to(x, y, x + w, y, r).ok();
        ctx.fill();
        ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, align: TextAlign) {
        self.ctx.set_font(font);
        self.ctx.set_text_align(align.css());
        self.ctx.fill_text(text, x as f64, y as f64).ok();
    }
}
