//! Show focus outlines only for keyboard users.
use crate::page::{ClassList, InputEvent, Key};

/// Which input the detector is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modality {
    /// Pointer navigation, waiting for the first Tab press.
    #[default]
    WatchingForTab,
    /// Keyboard navigation, waiting for a mouse press.
    WatchingForMouseDown,
}

/// Toggles the marker class on the document root between keyboard and
/// pointer navigation.
#[derive(Debug, Clone)]
pub struct ModalityDetector {
    state: Modality,
    marker_class: String,
}

impl ModalityDetector {
    pub fn new(marker_class: impl Into<String>) -> Self {
        Self {
            state: Modality::default(),
            marker_class: marker_class.into(),
        }
    }

    pub fn state(&self) -> Modality {
        self.state
    }

    pub fn dispatch(&mut self, event: &InputEvent, root: &mut ClassList) {
        self.state = match (self.state, event) {
            (Modality::WatchingForTab, InputEvent::KeyDown(Key::Tab)) => {
                root.add(&self.marker_class);
                Modality::WatchingForMouseDown
            }
            (Modality::WatchingForMouseDown, InputEvent::MouseDown) => {
                root.remove(&self.marker_class);
                Modality::WatchingForTab
            }
            (state, _) => state,
        };
    }
}
