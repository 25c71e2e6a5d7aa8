// Canvas-like drawing surface the renderer paints onto
use serde::Serialize;

/// A point in logical (CSS) units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
}

impl RenderPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    LinearGradient {
        from: RenderPoint,
        to: RenderPoint,
        stops: Vec<GradientStop>,
    },
}

/// Drawing operations of a 2D canvas context.
///
/// Coordinates are logical units; the backing store is sized in physical
/// pixels and [`Surface::set_scale`] maps one onto the other.
pub trait Surface {
    /// Laid-out size in logical units, before any clamping.
    fn css_size(&self) -> (f64, f64);

    fn device_pixel_ratio(&self) -> f64;

    fn backing_size(&self) -> (u32, u32);

    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, scale: f64);

    fn clear(&mut self, width: f64, height: f64);

    /// Fill the closed polygon through `points`.
    fn fill_path(&mut self, points: &[RenderPoint], paint: &Paint);

    fn stroke_path(&mut self, points: &[RenderPoint], color: &str, line_width: f64);

    fn fill_circle(&mut self, center: RenderPoint, radius: f64, color: &str);
}
