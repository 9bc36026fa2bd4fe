// Drawing surfaces the particle field can render onto: the 2D canvas on the page,
// and a recording surface that keeps a list of draw commands for inspection.

use crate::color::Color;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn set_size(&mut self, width: u32, height: u32);
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color);
    fn draw_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: Color, width: f64);

    fn clear_all(&mut self) {
        let (width, height) = (self.width() as f64, self.height() as f64);
        self.clear(0.0, 0.0, width, height);
    }
}

pub struct CanvasSurface {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Grabs the 2d context from the canvas. None when the browser won't hand one out.
    pub fn new(canvas: HtmlCanvasElement) -> Option<CanvasSurface> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(CanvasSurface { canvas, context })
    }

    pub fn from_element_id(id: &str) -> Option<CanvasSurface> {
        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        CanvasSurface::new(canvas)
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.clear_rect(x, y, width, height);
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color) {
        self.context.begin_path();
        // arc only fails on a negative radius
        if self.context.arc(x, y, radius, 0.0, PI * 2.0).is_err() {
            return;
        }
        self.context.set_fill_style_str(&fill.to_css());
        self.context.fill();
    }

    fn draw_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: Color, width: f64) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style_str(&stroke.to_css());
        self.context.set_line_width(width);
        self.context.stroke();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        fill: Color,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        stroke: Color,
        width: f64,
    },
}

/// Off-screen surface that records every draw call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            width,
            height,
            commands: Vec::new(),
        }
    }

    // Commands issued since the most recent clear, i.e. the visible frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear { .. }))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.last_frame()
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { x, y, width, height });
    }

    fn draw_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color) {
        self.commands.push(DrawCommand::Circle { x, y, radius, fill });
    }

    fn draw_line(&mut self, from: [f64; 2], to: [f64; 2], stroke: Color, width: f64) {
        self.commands.push(DrawCommand::Line { from, to, stroke, width });
    }
}
