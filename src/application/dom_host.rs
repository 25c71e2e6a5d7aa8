// Host document the dashboard writes into
use crate::domain::fields::Row;
use crate::domain::surface::Surface;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    Chart,
    Findings,
}

/// Named elements the dashboard reads from and writes to.
///
/// A host may ignore selectors it has no element for, the way a page
/// without a given widget simply skips it.
pub trait DomHost {
    fn set_text(&mut self, selector: &str, text: &str);

    fn set_class(&mut self, selector: &str, class: &str);

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str);

    fn replace_rows(&mut self, selector: &str, rows: &[Row]);

    fn toggle_body_class(&mut self, class: &str, enabled: bool);

    /// Append the overlay's root to the body. Called once per kind, on first open.
    fn mount_overlay(&mut self, kind: OverlayKind);

    fn set_overlay_hidden(&mut self, kind: OverlayKind, hidden: bool);

    fn surface(&mut self, selector: &str) -> Option<&mut dyn Surface>;
}
