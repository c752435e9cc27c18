//! Canvas 2D renderer (browser only)
//!
//! Flat pixel rectangles; snapped to whole pixels for the blocky look.

use web_sys::CanvasRenderingContext2d;

use super::{Frame, RenderSink};
use crate::consts::*;
use crate::sim::Body;

const BACKGROUND: &str = "#7B8D6A";
const WALL: &str = "#5A6B4A";
const FLOOR: &str = "#808080";
const BOX_INNER: &str = "#6B7A55";
const CABLE: &str = "#8b4513";
const CLAW_OUTER: &str = "#c0c0c0";
const CLAW_INNER: &str = "#d3d3d3";
const CLAW_ARM: &str = "#a0a0a0";
const SPIKES: [&str; 3] = ["#FF0000", "#FF8000", "#FFFF00"];

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(x.floor() as f64, y.floor() as f64, w as f64, h as f64);
    }

    fn draw_field(&self, frame: &Frame<'_>) {
        let arena = frame.arena;
        self.ctx
            .clear_rect(0.0, 0.0, arena.width as f64, arena.height as f64);
        self.rect(0.0, 0.0, arena.width, arena.height, BACKGROUND);
        self.rect(0.0, 0.0, 20.0, arena.height, WALL);
        self.rect(arena.width - 20.0, 0.0, 20.0, arena.height, WALL);
        self.rect(0.0, arena.floor_y, arena.width, FLOOR_INSET, FLOOR);

        let b = arena.drop_box;
        self.rect(b.min.x, b.min.y, b.size.x, b.size.y, WALL);
        self.rect(b.min.x + 5.0, b.min.y + 5.0, b.size.x - 10.0, b.size.y - 10.0, BOX_INNER);

        self.ctx.set_fill_style_str("#fff");
        self.ctx.set_font("18px monospace");
        let _ = self
            .ctx
            .fill_text("DROP", (b.min.x + 25.0) as f64, (b.min.y + 30.0) as f64);
        let _ = self
            .ctx
            .fill_text("OFF", (b.min.x + 35.0) as f64, (b.min.y + 55.0) as f64);

        // Collected dinos stacked three per row from the bottom of the box
        for (i, record) in frame.collected.iter().enumerate() {
            let x = b.min.x + 15.0 + (i % 3) as f32 * 30.0;
            let y = b.max().y - 45.0 - (i / 3) as f32 * 30.0;
            self.rect(x + 4.0, y + 4.0, 20.0, 20.0, record.color.hex());
            self.rect(x + 10.0, y + 10.0, 2.0, 2.0, "#000");
            self.rect(x + 16.0, y + 10.0, 2.0, 2.0, "#000");
        }
    }

    fn draw_dino(&self, body: &Body) {
        let (x, y) = (body.pos.x.floor(), body.pos.y.floor());
        let (w, h) = (body.size.x, body.size.y);
        let color = body.color.hex();

        // Head and body
        self.rect(x + 12.0, y + 4.0, w - 24.0, 16.0, color);
        self.rect(x + 8.0, y + 16.0, w - 16.0, h - 24.0, color);
        // Feet
        self.rect(x + 12.0, y + h - 8.0, 6.0, 6.0, color);
        self.rect(x + w - 18.0, y + h - 8.0, 6.0, 6.0, color);
        // Spikes along the back
        for (i, spike) in SPIKES.iter().enumerate() {
            self.rect(x + w - 8.0, y + 14.0 + i as f32 * 8.0, 4.0, 4.0, spike);
        }
        // Eyes
        self.rect(x + 14.0, y + 12.0, 3.0, 3.0, "#000");
        self.rect(x + 22.0, y + 12.0, 3.0, 3.0, "#000");
    }

    fn draw_claw(&self, frame: &Frame<'_>) {
        let claw = frame.claw;
        let (x, y) = (claw.x.floor(), claw.y.floor());

        self.ctx.set_stroke_style_str(CABLE);
        self.ctx.set_line_width(6.0);
        self.ctx.begin_path();
        self.ctx.move_to(x as f64, 0.0);
        self.ctx.line_to(x as f64, y as f64);
        self.ctx.stroke();

        self.rect(x - CLAW_HALF_WIDTH, y - CLAW_ABOVE, CLAW_HALF_WIDTH * 2.0, 60.0, CLAW_OUTER);
        self.rect(x - 36.0, y - 26.0, 72.0, 52.0, CLAW_INNER);

        if claw.jaws_closed() {
            self.rect(x - 30.0, y + 20.0, 16.0, 30.0, CLAW_ARM);
            self.rect(x + 14.0, y + 20.0, 16.0, 30.0, CLAW_ARM);
            self.rect(x - 6.0, y + 40.0, 12.0, 16.0, CLAW_ARM);
        } else {
            self.rect(x - 40.0, y + 20.0, 16.0, 30.0, CLAW_ARM);
            self.rect(x + 24.0, y + 20.0, 16.0, 30.0, CLAW_ARM);
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.draw_field(frame);
        for body in frame.visible_bodies() {
            self.draw_dino(body);
        }
        self.draw_claw(frame);
    }
}
