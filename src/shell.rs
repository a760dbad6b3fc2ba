//! Application shell: layout controller + score store + resize subscription.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::StoreError;
use crate::layout::{ClickTarget, LayoutController, LayoutState};
use crate::score::ScoreRecord;
use crate::store::ScoreStore;
use crate::viewport::{ResizeEvents, Viewport};

/// Owns the layout controller and performs the write-through to storage.
pub struct AppShell<S: ScoreStore> {
    controller: LayoutController,
    store: S,
    default_score: ScoreRecord,
    hydrated: bool,
}

impl<S: ScoreStore> AppShell<S> {
    pub fn new(config: &ShellConfig, viewport: Viewport, default_score: ScoreRecord, store: S) -> Self {
        Self {
            controller: LayoutController::new(viewport, default_score.clone(), config.resize_policy),
            store,
            default_score,
            hydrated: false,
        }
    }

    pub fn state(&self) -> &LayoutState {
        self.controller.state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Merges the persisted record into the in-memory default. Only the first
    /// call reads storage.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            debug!("score already hydrated");
            return;
        }
        let persisted = self.store.read();
        self.controller.hydrate(persisted.as_ref());
        self.hydrated = true;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.controller.resize(viewport);
    }

    pub fn toggle_sidebar(&mut self) {
        self.controller.toggle_sidebar();
    }

    pub fn toggle_reset(&mut self) {
        self.controller.toggle_reset();
    }

    pub fn click(&mut self, target: ClickTarget) -> bool {
        self.controller.click(target)
    }

    pub fn set_install_available(&mut self, available: bool) {
        self.controller.set_install_available(available);
    }

    /// Commits `next` and writes it through to the store.
    ///
    /// The in-memory score is updated even when the write fails.
    pub fn update_score(&mut self, next: ScoreRecord) -> Result<(), StoreError> {
        let committed = self.controller.commit_score(next);
        self.store.write(committed)
    }

    /// Restores the catalog default and closes the reset dialog.
    pub fn reset_score(&mut self) -> Result<(), StoreError> {
        if self.controller.state().show_reset {
            self.controller.toggle_reset();
        }
        self.update_score(self.default_score.clone())
    }
}

/// An `AppShell` attached to a host for the lifetime of one mount.
///
/// Mounting hydrates the score and subscribes to resize events exactly once.
/// `unmount` (or drop) removes the subscription; a resize delivered
/// afterwards cannot reach the shell. The observer sees the state after
/// every transition.
pub struct MountedShell<S: ScoreStore + 'static, E: ResizeEvents> {
    shell: Rc<RefCell<AppShell<S>>>,
    events: E,
    handle: Option<E::Handle>,
    observer: Rc<dyn Fn(&LayoutState)>,
}

impl<S: ScoreStore + 'static, E: ResizeEvents> MountedShell<S, E> {
    pub fn mount(shell: AppShell<S>, events: E, observer: impl Fn(&LayoutState) + 'static) -> Self {
        let shell = Rc::new(RefCell::new(shell));
        let observer: Rc<dyn Fn(&LayoutState)> = Rc::new(observer);

        shell.borrow_mut().hydrate();

        let handle = {
            let weak = Rc::downgrade(&shell);
            let observer = Rc::clone(&observer);
            events.listen(Box::new(move |viewport: Viewport| {
                let Some(shell) = weak.upgrade() else {
                    return;
                };
                let state = {
                    let mut shell = shell.borrow_mut();
                    shell.resize(viewport);
                    shell.state().clone()
                };
                observer(&state);
            }))
        };
        info!("shell mounted");

        let mounted = Self {
            shell,
            events,
            handle: Some(handle),
            observer,
        };
        mounted.notify();
        mounted
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    pub fn state(&self) -> LayoutState {
        self.shell.borrow().state().clone()
    }

    pub fn with_shell<R>(&self, f: impl FnOnce(&AppShell<S>) -> R) -> R {
        f(&self.shell.borrow())
    }

    pub fn toggle_sidebar(&self) {
        self.apply(AppShell::toggle_sidebar);
    }

    pub fn toggle_reset(&self) {
        self.apply(AppShell::toggle_reset);
    }

    pub fn click(&self, target: ClickTarget) {
        if self.apply(|s| s.click(target)) {
            debug!(?target, "sidebar dismissed");
        }
    }

    pub fn set_install_available(&self, available: bool) {
        self.apply(|s| s.set_install_available(available));
    }

    pub fn update_score(&self, next: ScoreRecord) {
        if let Err(e) = self.apply(|s| s.update_score(next)) {
            warn!("score not persisted: {e}");
        }
    }

    pub fn reset_score(&self) {
        match self.apply(AppShell::reset_score) {
            Ok(()) => info!("score reset"),
            Err(e) => warn!("reset score not persisted: {e}"),
        }
    }

    /// Drops the resize subscription. Calling it again does nothing.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.events.unlisten(handle);
            info!("shell unmounted");
        }
    }

    fn apply<R>(&self, f: impl FnOnce(&mut AppShell<S>) -> R) -> R {
        let (out, state) = {
            let mut shell = self.shell.borrow_mut();
            let out = f(&mut shell);
            (out, shell.state().clone())
        };
        (self.observer)(&state);
        out
    }

    fn notify(&self) {
        let state = self.state();
        (self.observer)(&state);
    }
}

impl<S: ScoreStore + 'static, E: ResizeEvents> Drop for MountedShell<S, E> {
    fn drop(&mut self) {
        self.unmount();
    }
}
