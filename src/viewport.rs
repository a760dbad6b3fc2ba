//! Viewport classification and the host's resize-event boundary.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_narrow(self) -> bool {
        classify(self.height, self.width)
    }
}

/// Portrait orientation counts as narrow. A square viewport does not.
pub fn classify(height: f64, width: f64) -> bool {
    height > width
}

/// A source of viewport resize notifications.
///
/// `listen` is called once per mount and `unlisten` once per unmount; a
/// handle is never reused.
pub trait ResizeEvents {
    type Handle;

    fn current(&self) -> Viewport;

    fn listen(&self, on_resize: Box<dyn Fn(Viewport)>) -> Self::Handle;

    fn unlisten(&self, handle: Self::Handle);
}

type Listener = Rc<dyn Fn(Viewport)>;

struct HubInner {
    current: Viewport,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// In-process resize source for native hosts and tests.
///
/// Clones share the same listener list.
#[derive(Clone)]
pub struct ResizeHub {
    inner: Rc<RefCell<HubInner>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct HubHandle(u64);

impl ResizeHub {
    pub fn new(initial: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                current: initial,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Updates the current viewport and notifies every listener.
    pub fn resize(&self, viewport: Viewport) {
        // Snapshot so listeners may (un)subscribe while being notified.
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = viewport;
            inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };
        for listener in listeners {
            listener(viewport);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl ResizeEvents for ResizeHub {
    type Handle = HubHandle;

    fn current(&self) -> Viewport {
        self.inner.borrow().current
    }

    fn listen(&self, on_resize: Box<dyn Fn(Viewport)>) -> HubHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::from(on_resize)));
        HubHandle(id)
    }

    fn unlisten(&self, handle: HubHandle) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _)| *id != handle.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn classify_is_strictly_portrait() {
        assert!(classify(800.0, 400.0));
        assert!(!classify(400.0, 800.0));
        assert!(!classify(500.0, 500.0));
        assert!(Viewport::new(400.0, 800.0).is_narrow());
    }

    #[test]
    fn hub_delivers_until_unlistened() {
        let hub = ResizeHub::new(Viewport::new(800.0, 400.0));
        let seen = Rc::new(Cell::new(0));

        let handle = {
            let seen = Rc::clone(&seen);
            hub.listen(Box::new(move |_: Viewport| seen.set(seen.get() + 1)))
        };
        hub.resize(Viewport::new(400.0, 800.0));
        assert_eq!(seen.get(), 1);
        assert_eq!(hub.current(), Viewport::new(400.0, 800.0));

        hub.unlisten(handle);
        hub.resize(Viewport::new(800.0, 400.0));
        assert_eq!(seen.get(), 1);
        assert_eq!(hub.listener_count(), 0);
    }
}
