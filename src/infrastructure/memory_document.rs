// In-memory host document backing the headless dashboard
use super::recording_surface::RecordingSurface;
use crate::application::dom_host::{DomHost, OverlayKind};
use crate::application::modal::{MODAL_CANVAS, MODAL_CANVAS_SIZE};
use crate::domain::fields::Row;
use crate::domain::surface::Surface;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub text: String,
    pub class: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayRoot {
    pub hidden: bool,
    pub mounts: usize,
}

/// Elements are created on first write; canvases must be declared up front
/// since they carry layout size.
#[derive(Debug, Clone, Serialize)]
pub struct MemoryDocument {
    device_pixel_ratio: f64,
    elements: BTreeMap<String, Element>,
    body_classes: BTreeSet<String>,
    overlays: BTreeMap<String, OverlayRoot>,
    #[serde(skip)]
    canvases: BTreeMap<String, RecordingSurface>,
}

impl MemoryDocument {
    pub fn new(device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            elements: BTreeMap::new(),
            body_classes: BTreeSet::new(),
            overlays: BTreeMap::new(),
            canvases: BTreeMap::new(),
        }
    }

    pub fn add_canvas(&mut self, selector: &str, width: f64, height: f64) {
        self.canvases.insert(
            selector.to_string(),
            RecordingSurface::new(width, height, self.device_pixel_ratio),
        );
    }

    fn element_mut(&mut self, selector: &str) -> &mut Element {
        self.elements.entry(selector.to_string()).or_default()
    }
}

// Inspection helpers for assertions.
#[cfg(test)]
impl MemoryDocument {
    pub fn with_canvas(mut self, selector: &str, width: f64, height: f64) -> Self {
        self.add_canvas(selector, width, height);
        self
    }

    pub fn element(&self, selector: &str) -> Option<&Element> {
        self.elements.get(selector)
    }

    pub fn text(&self, selector: &str) -> Option<&str> {
        self.element(selector).map(|e| e.text.as_str())
    }

    pub fn class(&self, selector: &str) -> Option<&str> {
        self.element(selector).map(|e| e.class.as_str())
    }

    pub fn attribute(&self, selector: &str, name: &str) -> Option<&str> {
        self.element(selector)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn rows(&self, selector: &str) -> &[Row] {
        self.element(selector)
            .map(|e| e.rows.as_slice())
            .unwrap_or(&[])
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn overlay_visible(&self, kind: OverlayKind) -> bool {
        self.overlays
            .get(overlay_key(kind))
            .is_some_and(|root| !root.hidden)
    }

    pub fn mount_count(&self, kind: OverlayKind) -> usize {
        self.overlays
            .get(overlay_key(kind))
            .map_or(0, |root| root.mounts)
    }

    pub fn recording(&self, selector: &str) -> Option<&RecordingSurface> {
        self.canvases.get(selector)
    }
}

fn overlay_key(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::Chart => "chart",
        OverlayKind::Findings => "findings",
    }
}

impl DomHost for MemoryDocument {
    fn set_text(&mut self, selector: &str, text: &str) {
        self.element_mut(selector).text = text.to_string();
    }

    fn set_class(&mut self, selector: &str, class: &str) {
        self.element_mut(selector).class = class.to_string();
    }

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) {
        self.element_mut(selector)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn replace_rows(&mut self, selector: &str, rows: &[Row]) {
        self.element_mut(selector).rows = rows.to_vec();
    }

    fn toggle_body_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.body_classes.insert(class.to_string());
        } else {
            self.body_classes.remove(class);
        }
    }

    fn mount_overlay(&mut self, kind: OverlayKind) {
        let root = self.overlays.entry(overlay_key(kind).to_string()).or_default();
        root.mounts += 1;
        root.hidden = true;
        if kind == OverlayKind::Chart && !self.canvases.contains_key(MODAL_CANVAS) {
            let (width, height) = MODAL_CANVAS_SIZE;
            self.add_canvas(MODAL_CANVAS, width, height);
        }
    }

    fn set_overlay_hidden(&mut self, kind: OverlayKind, hidden: bool) {
        if let Some(root) = self.overlays.get_mut(overlay_key(kind)) {
            root.hidden = hidden;
        }
    }

    fn surface(&mut self, selector: &str) -> Option<&mut dyn Surface> {
        self.canvases
            .get_mut(selector)
            .map(|canvas| canvas as &mut dyn Surface)
    }
}
