//! Back to top button visibility.
use crate::page::ButtonStyle;

/// Shows the button once the page is scrolled past a threshold.
#[derive(Debug, Clone, Copy)]
pub struct ScrollWatcher {
    threshold: f64,
}

impl ScrollWatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Write the button style for the vertical scroll `offset`. Returns
    /// whether the button is shown.
    pub fn on_scroll(&self, offset: f64, button: &mut ButtonStyle) -> bool {
        let shown = offset > self.threshold;
        *button = if shown {
            ButtonStyle::shown()
        } else {
            ButtonStyle::hidden()
        };
        shown
    }
}

impl Default for ScrollWatcher {
    fn default() -> Self {
        Self::new(700.)
    }
}
