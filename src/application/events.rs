// Pointer and keyboard input delivered by the host
use super::dom_host::OverlayKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Enter => "Enter",
            Key::Space => " ",
            Key::Escape => "Escape",
            Key::Other => "Unidentified",
        }
        .to_string()
    }
}

/// What an event landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Target {
    ChartWidget { metric: String },
    FindingsTable,
    /// A link inside the findings table; follows the link, never expands.
    FindingsLink,
    CloseControl { overlay: OverlayKind },
    /// The overlay root itself, outside its content panel.
    Backdrop { overlay: OverlayKind },
    Panel { overlay: OverlayKind },
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum UiEvent {
    Click { target: Target },
    KeyDown { key: Key, target: Target },
    Navigate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EventOutcome {
    /// The host should suppress its default action (e.g. Space scrolling).
    pub prevent_default: bool,
}
