//! Layout state and its transitions.
//!
//! The state is only ever changed through the methods on `LayoutController`.
//! Nothing here touches storage: `commit_score` updates memory and the caller
//! persists the committed record.

use tracing::debug;

use crate::config::ResizePolicy;
use crate::score::{reconcile, ScoreRecord};
use crate::viewport::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub score: ScoreRecord,
    pub sidebar_visible: bool,
    pub is_narrow_screen: bool,
    pub show_install_button: bool,
    pub show_reset: bool,
}

/// Where a click on the application grid landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The grid itself, including the dimmed backdrop.
    Backdrop,
    Content,
    Sidebar,
}

#[derive(Debug, Clone)]
pub struct LayoutController {
    state: LayoutState,
    policy: ResizePolicy,
}

impl LayoutController {
    pub fn new(viewport: Viewport, default_score: ScoreRecord, policy: ResizePolicy) -> Self {
        let is_narrow_screen = viewport.is_narrow();
        Self {
            state: LayoutState {
                score: default_score,
                sidebar_visible: !is_narrow_screen,
                is_narrow_screen,
                show_install_button: false,
                show_reset: false,
            },
            policy,
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    /// Seeds the score from a persisted record. Runs once, at mount.
    pub fn hydrate(&mut self, persisted: Option<&ScoreRecord>) -> &ScoreRecord {
        self.state.score = reconcile(persisted, &self.state.score);
        debug!(
            keys = self.state.score.len(),
            restored = persisted.is_some(),
            "score hydrated"
        );
        &self.state.score
    }

    pub fn resize(&mut self, viewport: Viewport) {
        let was_narrow = self.state.is_narrow_screen;
        self.state.is_narrow_screen = viewport.is_narrow();

        if self.policy == ResizePolicy::Follow && was_narrow != self.state.is_narrow_screen {
            self.state.sidebar_visible = !self.state.is_narrow_screen;
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.sidebar_visible = !self.state.sidebar_visible;
        debug!(visible = self.state.sidebar_visible, "sidebar toggled");
    }

    pub fn toggle_reset(&mut self) {
        self.state.show_reset = !self.state.show_reset;
    }

    /// Dismisses the overlaid sidebar on narrow screens when the click landed
    /// outside it. Returns whether the sidebar was toggled.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        let s = &self.state;
        if s.is_narrow_screen && s.sidebar_visible && target != ClickTarget::Sidebar {
            self.toggle_sidebar();
            return true;
        }
        false
    }

    pub fn set_install_available(&mut self, available: bool) {
        self.state.show_install_button = available;
    }

    /// Replaces the score. The returned record is what must be persisted.
    pub fn commit_score(&mut self, next: ScoreRecord) -> &ScoreRecord {
        self.state.score = next;
        &self.state.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landscape() -> Viewport {
        Viewport::new(800.0, 400.0)
    }

    fn portrait() -> Viewport {
        Viewport::new(400.0, 800.0)
    }

    fn score(pairs: &[(&str, f64)]) -> ScoreRecord {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn landscape_starts_with_sidebar() {
        let c = LayoutController::new(landscape(), ScoreRecord::new(), ResizePolicy::Sticky);
        assert!(!c.state().is_narrow_screen);
        assert!(c.state().sidebar_visible);
        assert!(!c.state().show_reset);
        assert!(!c.state().show_install_button);
    }

    #[test]
    fn portrait_starts_without_sidebar() {
        let c = LayoutController::new(portrait(), ScoreRecord::new(), ResizePolicy::Sticky);
        assert!(c.state().is_narrow_screen);
        assert!(!c.state().sidebar_visible);
    }

    #[test]
    fn hydrate_prefers_persisted_values() {
        let mut c = LayoutController::new(
            landscape(),
            score(&[("q1", 0.0), ("q2", 0.0)]),
            ResizePolicy::Sticky,
        );
        c.hydrate(Some(&score(&[("q1", 1.0)])));
        assert_eq!(c.state().score, score(&[("q1", 1.0), ("q2", 0.0)]));
    }

    #[test]
    fn toggles_are_involutions() {
        let mut c = LayoutController::new(landscape(), ScoreRecord::new(), ResizePolicy::Sticky);
        let before = c.state().clone();
        c.toggle_sidebar();
        assert_ne!(c.state().sidebar_visible, before.sidebar_visible);
        c.toggle_sidebar();
        c.toggle_reset();
        c.toggle_reset();
        assert_eq!(c.state(), &before);
    }

    #[test]
    fn sticky_resize_only_moves_narrow_flag() {
        let s = score(&[("q1", 2.0)]);
        let mut c = LayoutController::new(landscape(), s.clone(), ResizePolicy::Sticky);
        c.resize(portrait());
        assert!(c.state().is_narrow_screen);
        assert!(c.state().sidebar_visible);
        assert_eq!(c.state().score, s);
    }

    #[test]
    fn follow_resize_resets_sidebar_on_orientation_change() {
        let mut c = LayoutController::new(landscape(), ScoreRecord::new(), ResizePolicy::Follow);
        c.resize(portrait());
        assert!(!c.state().sidebar_visible);

        // Same orientation again keeps a manual choice.
        c.toggle_sidebar();
        c.resize(Viewport::new(300.0, 900.0));
        assert!(c.state().sidebar_visible);

        c.resize(landscape());
        assert!(c.state().sidebar_visible);
    }

    #[test]
    fn click_outside_sidebar_dismisses_on_narrow_screens() {
        let mut c = LayoutController::new(portrait(), ScoreRecord::new(), ResizePolicy::Sticky);
        assert!(!c.click(ClickTarget::Backdrop));

        c.toggle_sidebar();
        assert!(!c.click(ClickTarget::Sidebar));
        assert!(c.state().sidebar_visible);

        assert!(c.click(ClickTarget::Content));
        assert!(!c.state().sidebar_visible);
    }

    #[test]
    fn click_never_dismisses_on_wide_screens() {
        let mut c = LayoutController::new(landscape(), ScoreRecord::new(), ResizePolicy::Sticky);
        assert!(!c.click(ClickTarget::Backdrop));
        assert!(c.state().sidebar_visible);
    }

    #[test]
    fn commit_replaces_whole_record() {
        let mut c = LayoutController::new(landscape(), score(&[("a", 0.0)]), ResizePolicy::Sticky);
        let committed = c.commit_score(score(&[("b", 1.0)])).clone();
        assert_eq!(committed, score(&[("b", 1.0)]));
        assert_eq!(c.state().score.get("a"), None);
    }
}
