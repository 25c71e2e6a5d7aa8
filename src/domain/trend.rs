// Trend deltas and magnitude-aware number formatting
use serde::Serialize;

pub const PLACEHOLDER: &str = "--";

/// Format with precision that shrinks as the magnitude grows.
pub fn format_magnitude(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // -0.0 would print as "-0.0000"
    let value = if value == 0.0 { 0.0 } else { value };
    let av = value.abs();
    if av >= 10.0 {
        format!("{value:.1}")
    } else if av >= 1.0 {
        format!("{value:.2}")
    } else if av >= 0.1 {
        format!("{value:.3}")
    } else {
        format!("{value:.4}")
    }
}

/// [`format_magnitude`] with the unit suffix; non-finite values drop the unit.
pub fn format_metric(value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{}{}", format_magnitude(value), unit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Up => "meta trend up",
            Self::Down => "meta trend down",
            Self::Flat => "meta trend flat",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub text: String,
}

/// Trend of the two most recent samples; `None` when there is nothing yet.
pub fn compute_trend(values: &[f64], unit: &str) -> Option<Trend> {
    let (&current, rest) = values.split_last()?;

    let Some(&previous) = rest.last() else {
        return Some(Trend {
            direction: TrendDirection::Flat,
            text: format!("Trend: baseline ({}{unit})", format_magnitude(current)),
        });
    };

    let delta = current - previous;
    let (direction, sign) = if delta > 0.0 {
        (TrendDirection::Up, "+")
    } else if delta < 0.0 {
        (TrendDirection::Down, "")
    } else {
        (TrendDirection::Flat, "")
    };

    Some(Trend {
        direction,
        text: format!(
            "Trend: {sign}{}{unit} | now {}{unit}",
            format_magnitude(delta),
            format_magnitude(current)
        ),
    })
}
