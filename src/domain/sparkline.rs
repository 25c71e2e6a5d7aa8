// Sparkline renderer: samples -> filled line chart on a Surface
use super::color::with_alpha;
use super::surface::{GradientStop, Paint, RenderPoint, Surface};

pub const LINE_WIDTH: f64 = 2.0;
pub const MARKER_RADIUS: f64 = 2.6;
pub const FILL_ALPHA_TOP: f64 = 0.26;

const MIN_EXTENT: f64 = 2.0;
const INSET_X: f64 = 2.0;
const INSET_Y: f64 = 3.0;
const BASELINE_INSET: f64 = 2.0;

/// Logical drawing area established for one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Size the backing store for the display density and scale the transform
/// so every later draw call can use logical units.
pub fn prepare_surface(surface: &mut dyn Surface) -> Viewport {
    let (css_w, css_h) = surface.css_size();
    let width = floor_at_least(css_w, MIN_EXTENT);
    let height = floor_at_least(css_h, MIN_EXTENT);

    let dpr = surface.device_pixel_ratio();
    let dpr = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
    let px_w = floor_at_least(width * dpr, MIN_EXTENT) as u32;
    let px_h = floor_at_least(height * dpr, MIN_EXTENT) as u32;

    if surface.backing_size() != (px_w, px_h) {
        surface.set_backing_size(px_w, px_h);
    }
    surface.set_scale(dpr);

    Viewport { width, height }
}

fn floor_at_least(value: f64, min: f64) -> f64 {
    if value.is_finite() {
        value.floor().max(min)
    } else {
        min
    }
}

/// Map samples into the viewport: x spreads evenly across the width, y is
/// inverted so larger values sit higher.
///
/// Needs at least two samples and a non-zero value range.
pub fn plot_points(values: &[f64], viewport: Viewport) -> Vec<RenderPoint> {
    let Some((min, max)) = bounds(values) else {
        return Vec::new();
    };
    let span = max - min;
    if values.len() < 2 || span == 0.0 {
        return Vec::new();
    }

    let Viewport { width: w, height: h } = viewport;
    let last_index = (values.len() - 1) as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = i as f64 / last_index * (w - 2.0 * INSET_X) + INSET_X;
            let y = h - ((v - min) / span * (h - 2.0 * INSET_Y) + INSET_Y);
            RenderPoint::new(x, y)
        })
        .collect()
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Redraw `values` as a sparkline in `color`.
pub fn render(surface: &mut dyn Surface, values: &[f64], color: &str) {
    let viewport = prepare_surface(surface);
    let Viewport { width: w, height: h } = viewport;
    surface.clear(w, h);

    let Some((min, max)) = bounds(values) else {
        return;
    };

    let centre_line = [
        RenderPoint::new(INSET_X, h / 2.0),
        RenderPoint::new(w - INSET_X, h / 2.0),
    ];

    if values.len() == 1 {
        surface.stroke_path(&centre_line, color, LINE_WIDTH);
        return;
    }

    if max == min {
        surface.stroke_path(&centre_line, color, LINE_WIDTH);
        surface.fill_circle(RenderPoint::new(w - 4.0, h / 2.0), MARKER_RADIUS, color);
        return;
    }

    let points = plot_points(values, viewport);
    let (Some(first), Some(tail)) = (points.first().copied(), points.last().copied()) else {
        return;
    };

    let baseline = h - BASELINE_INSET;
    let mut area = Vec::with_capacity(points.len() + 2);
    area.push(RenderPoint::new(first.x, baseline));
    area.extend_from_slice(&points);
    area.push(RenderPoint::new(tail.x, baseline));
    surface.fill_path(&area, &area_gradient(color, h));

    surface.stroke_path(&points, color, LINE_WIDTH);
    surface.fill_circle(tail, MARKER_RADIUS, color);
}

fn area_gradient(color: &str, height: f64) -> Paint {
    Paint::LinearGradient {
        from: RenderPoint::new(0.0, 0.0),
        to: RenderPoint::new(0.0, height),
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: with_alpha(color, FILL_ALPHA_TOP),
            },
            GradientStop {
                offset: 1.0,
                color: with_alpha(color, 0.0),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::recording_surface::{DrawOp, RecordingSurface};

    const COLOR: &str = "#5eead4";

    fn drawn(surface: &RecordingSurface) -> Vec<&DrawOp> {
        surface
            .ops()
            .iter()
            .filter(|op| !matches!(op, DrawOp::SetScale { .. } | DrawOp::Clear { .. }))
            .collect()
    }

    #[test]
    fn test_empty_series_only_clears() {
        let mut surface = RecordingSurface::new(120.0, 40.0, 1.0);
        render(&mut surface, &[], COLOR);
        assert!(drawn(&surface).is_empty());
        assert!(surface
            .ops()
            .contains(&DrawOp::Clear { width: 120.0, height: 40.0 }));
    }

    #[test]
    fn test_single_sample_draws_centre_line_regardless_of_value() {
        for value in [0.0, 1e-9, 42.0, -7.5e12] {
            let mut surface = RecordingSurface::new(120.0, 40.0, 1.0);
            render(&mut surface, &[value], COLOR);
            assert_eq!(
                drawn(&surface),
                vec![&DrawOp::StrokePath {
                    points: vec![RenderPoint::new(2.0, 20.0), RenderPoint::new(118.0, 20.0)],
                    color: COLOR.to_string(),
                    line_width: 2.0,
                }]
            );
        }
    }

    #[test]
    fn test_constant_series_draws_centre_line_and_marker() {
        let mut surface = RecordingSurface::new(120.0, 40.0, 1.0);
        render(&mut surface, &[7.0; 5], COLOR);
        let ops = drawn(&surface);
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], DrawOp::StrokePath { points, .. } if points.len() == 2));
        assert_eq!(
            ops[1],
            &DrawOp::FillCircle {
                center: RenderPoint::new(116.0, 20.0),
                radius: MARKER_RADIUS,
                color: COLOR.to_string(),
            }
        );
    }

    #[test]
    fn test_plot_points_geometry() {
        let points = plot_points(&[1.0, 2.0, 3.0, 10.0], Viewport { width: 100.0, height: 40.0 });
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], RenderPoint::new(2.0, 37.0));
        assert_eq!(points[3], RenderPoint::new(98.0, 3.0));

        let expected_y = 40.0 - (2.0 / 9.0 * 34.0 + 3.0);
        assert!((points[2].y - expected_y).abs() < 1e-9);
        assert!((points[2].y - 29.44).abs() < 0.01);
        assert!((points[2].x - 66.0).abs() < 1e-9);
    }

    #[test]
    fn test_general_case_fills_before_stroke() {
        let mut surface = RecordingSurface::new(100.0, 40.0, 1.0);
        render(&mut surface, &[1.0, 2.0, 3.0, 10.0], COLOR);
        let ops = drawn(&surface);
        assert_eq!(ops.len(), 3);

        let DrawOp::FillPath { points, paint } = ops[0] else {
            panic!("expected area fill first, got {:?}", ops[0]);
        };
        assert_eq!(points.first(), Some(&RenderPoint::new(2.0, 38.0)));
        assert_eq!(points.last(), Some(&RenderPoint::new(98.0, 38.0)));
        assert_eq!(points.len(), 6);
        let Paint::LinearGradient { from, to, stops } = paint else {
            panic!("expected gradient fill");
        };
        assert_eq!((*from, *to), (RenderPoint::new(0.0, 0.0), RenderPoint::new(0.0, 40.0)));
        assert_eq!(stops[0].color, "rgba(94, 234, 212, 0.26)");
        assert_eq!(stops[1].color, "rgba(94, 234, 212, 0)");

        assert!(matches!(ops[1], DrawOp::StrokePath { points, line_width, color }
            if points.len() == 4 && *line_width == 2.0 && color == COLOR));
        assert!(matches!(ops[2], DrawOp::FillCircle { center, radius, color }
            if *center == RenderPoint::new(98.0, 3.0) && *radius == MARKER_RADIUS && color == COLOR));
    }

    #[test]
    fn test_prepare_scales_for_pixel_density() {
        let mut surface = RecordingSurface::new(120.7, 40.2, 2.0);
        let viewport = prepare_surface(&mut surface);
        assert_eq!(viewport, Viewport { width: 120.0, height: 40.0 });
        assert_eq!(surface.backing_size(), (240, 80));
        assert_eq!(surface.ops(), &[DrawOp::SetScale { scale: 2.0 }]);

        // unchanged size leaves the backing store alone
        prepare_surface(&mut surface);
        assert_eq!(surface.resize_count(), 1);
    }

    #[test]
    fn test_prepare_clamps_tiny_surfaces() {
        let mut surface = RecordingSurface::new(0.0, 1.4, 0.5);
        let viewport = prepare_surface(&mut surface);
        assert_eq!(viewport, Viewport { width: 2.0, height: 2.0 });
        assert_eq!(surface.backing_size(), (2, 2));
        assert_eq!(surface.ops(), &[DrawOp::SetScale { scale: 1.0 }]);
    }
}
