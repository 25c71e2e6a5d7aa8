// Surface implementation that records draw operations
use crate::domain::surface::{Paint, RenderPoint, Surface};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    SetScale {
        scale: f64,
    },
    Clear {
        width: f64,
        height: f64,
    },
    FillPath {
        points: Vec<RenderPoint>,
        paint: Paint,
    },
    StrokePath {
        points: Vec<RenderPoint>,
        color: String,
        line_width: f64,
    },
    FillCircle {
        center: RenderPoint,
        radius: f64,
        color: String,
    },
}

/// A canvas stand-in keeping the operations of the latest frame.
///
/// A `Clear` starts a new frame, so `ops()` always describes what is
/// currently visible rather than the whole drawing history.
#[derive(Debug, Clone, Serialize)]
pub struct RecordingSurface {
    css_width: f64,
    css_height: f64,
    device_pixel_ratio: f64,
    backing: (u32, u32),
    resizes: usize,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(css_width: f64, css_height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            css_width,
            css_height,
            device_pixel_ratio,
            backing: (0, 0),
            resizes: 0,
            ops: Vec::new(),
        }
    }
}

#[cfg(test)]
impl RecordingSurface {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn resize_count(&self) -> usize {
        self.resizes
    }

    /// Change the laid-out size, as a responsive layout would.
    pub fn set_css_size(&mut self, width: f64, height: f64) {
        self.css_width = width;
        self.css_height = height;
    }
}

impl Surface for RecordingSurface {
    fn css_size(&self) -> (f64, f64) {
        (self.css_width, self.css_height)
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        self.resizes += 1;
    }

    fn set_scale(&mut self, scale: f64) {
        self.ops.push(DrawOp::SetScale { scale });
    }

    fn clear(&mut self, width: f64, height: f64) {
        // keep the transform of this frame, drop the previous frame's drawing
        self.ops.retain(|op| matches!(op, DrawOp::SetScale { .. }));
        if self.ops.len() > 1 {
            self.ops.drain(..self.ops.len() - 1);
        }
        self.ops.push(DrawOp::Clear { width, height });
    }

    fn fill_path(&mut self, points: &[RenderPoint], paint: &Paint) {
        self.ops.push(DrawOp::FillPath {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn stroke_path(&mut self, points: &[RenderPoint], color: &str, line_width: f64) {
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            color: color.to_string(),
            line_width,
        });
    }

    fn fill_circle(&mut self, center: RenderPoint, radius: f64, color: &str) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color: color.to_string(),
        });
    }
}
