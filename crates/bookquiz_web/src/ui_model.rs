//! Presentation models that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! layout styling and labels on the host.

use bookquiz::{BookProgress, LayoutState};

/// Grid styling derived from the layout flags.
///
/// While the sidebar overlays a narrow screen the grid stops scrolling and a
/// dimmed backdrop is raised above the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStyle {
    pub overflow_y: &'static str,
    pub overlay_opacity: u8,
    pub overlay_z_index: i32,
}

impl GridStyle {
    pub fn for_layout(state: &LayoutState) -> Self {
        if state.sidebar_visible && state.is_narrow_screen {
            Self {
                overflow_y: "hidden",
                overlay_opacity: 1,
                overlay_z_index: 10,
            }
        } else {
            Self {
                overflow_y: "scroll",
                overlay_opacity: 0,
                overlay_z_index: -1,
            }
        }
    }

    /// Inline style for the grid element; the backdrop reads the custom properties.
    pub fn to_css(self) -> String {
        format!(
            "overflow-y: {}; --overlay-opacity: {}; --overlay-z: {};",
            self.overflow_y, self.overlay_opacity, self.overlay_z_index
        )
    }
}

pub fn sidebar_class(state: &LayoutState) -> &'static str {
    match (state.sidebar_visible, state.is_narrow_screen) {
        (true, true) => "sidebar open overlay",
        (true, false) => "sidebar open",
        (false, _) => "sidebar",
    }
}

pub fn progress_label(progress: BookProgress) -> String {
    if progress.total == 0 {
        return String::new();
    }
    if progress.is_complete() {
        format!("✓ {}/{}", progress.correct, progress.total)
    } else {
        format!("{}/{}", progress.answered, progress.total)
    }
}
