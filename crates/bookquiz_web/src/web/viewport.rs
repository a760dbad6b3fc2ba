use bookquiz::{ResizeEvents, Viewport};
use leptos::ev;
use leptos::prelude::*;

pub(super) fn current_viewport() -> Viewport {
    let Some(window) = web_sys::window() else {
        return Viewport::new(0.0, 0.0);
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(width, height)
}

/// Window `resize` events.
pub(super) struct WindowResize;

impl ResizeEvents for WindowResize {
    type Handle = WindowListenerHandle;

    fn current(&self) -> Viewport {
        current_viewport()
    }

    fn listen(&self, on_resize: Box<dyn Fn(Viewport)>) -> WindowListenerHandle {
        window_event_listener(ev::resize, move |_| on_resize(current_viewport()))
    }

    fn unlisten(&self, handle: WindowListenerHandle) {
        handle.remove();
    }
}
