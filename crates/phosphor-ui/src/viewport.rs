//! Viewport width tracking and the `use_narrow` breakpoint observer.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener = Arc<dyn Fn(u32) + Send + Sync>;

#[derive(Default)]
struct ViewportState {
    width: u32,
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// A resizable viewport that notifies registered listeners.
#[derive(Clone, Default)]
pub struct Viewport {
    state: Arc<Mutex<ViewportState>>,
}

impl fmt::Debug for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Viewport")
            .field("width", &state.width)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl Viewport {
    pub fn new(width: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewportState {
                width,
                ..Default::default()
            })),
        }
    }

    /// Current width in pixels (or columns, for a terminal).
    pub fn width(&self) -> u32 {
        self.lock().width
    }

    /// Change the width and notify every listener.
    pub fn resize(&self, width: u32) {
        let listeners: Vec<Listener> = {
            let mut state = self.lock();
            state.width = width;
            state.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        // Called without the lock held so listeners may query the viewport.
        for listener in listeners {
            listener(width);
        }
    }

    /// Register a resize listener, removed when the returned guard drops.
    pub fn on_resize<F>(&self, listener: F) -> ResizeListener
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.push((id, Arc::new(listener)));

        ResizeListener {
            state: Arc::downgrade(&self.state),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, ViewportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration of a resize listener. Dropping it deregisters the listener.
#[derive(Debug)]
pub struct ResizeListener {
    state: Weak<Mutex<ViewportState>>,
    id: u64,
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
            state.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Tracks whether a viewport is narrower than a threshold.
#[derive(Debug)]
pub struct NarrowObserver {
    narrow: Arc<AtomicBool>,
    threshold: u32,
    _listener: Option<ResizeListener>,
}

impl NarrowObserver {
    /// Whether the viewport is currently narrower than the threshold.
    pub fn get(&self) -> bool {
        self.narrow.load(Ordering::Acquire)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

/// Observe `width < threshold` on `viewport`.
///
/// The value is computed immediately and updated on every resize until the
/// observer drops. Without a viewport (non-interactive rendering) the value
/// is `false` and nothing is registered.
pub fn use_narrow(viewport: Option<&Viewport>, threshold: u32) -> NarrowObserver {
    let Some(viewport) = viewport else {
        return NarrowObserver {
            narrow: Arc::new(AtomicBool::new(false)),
            threshold,
            _listener: None,
        };
    };

    let narrow = Arc::new(AtomicBool::new(viewport.width() < threshold));

    let flag = Arc::clone(&narrow);
    let listener = viewport.on_resize(move |width| {
        flag.store(width < threshold, Ordering::Release);
    });

    NarrowObserver {
        narrow,
        threshold,
        _listener: Some(listener),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_resizes_across_threshold() {
        let viewport = Viewport::new(500);

        let narrow = use_narrow(Some(&viewport), 768);
        assert!(narrow.get());

        viewport.resize(1000);
        assert!(!narrow.get());

        viewport.resize(767);
        assert!(narrow.get());
    }

    #[test]
    fn threshold_width_is_not_narrow() {
        let viewport = Viewport::new(768);

        assert!(!use_narrow(Some(&viewport), 768).get());
    }

    #[test]
    fn without_viewport_is_wide() {
        let narrow = use_narrow(None, 768);

        assert!(!narrow.get());
        assert_eq!(narrow.threshold(), 768);
    }

    #[test]
    fn drop_removes_listener() {
        let viewport = Viewport::new(500);

        let narrow = use_narrow(Some(&viewport), 768);
        assert_eq!(viewport.listener_count(), 1);
        let flag = Arc::clone(&narrow.narrow);

        drop(narrow);
        assert_eq!(viewport.listener_count(), 0);

        viewport.resize(1000);
        assert!(flag.load(Ordering::Acquire));
    }

    #[test]
    fn drop_during_unwind_removes_listener() {
        let viewport = Viewport::new(500);
        let narrow = use_narrow(Some(&viewport), 768);
        let flag = Arc::clone(&narrow.narrow);
        assert_eq!(viewport.listener_count(), 1);

        let result = std::thread::spawn(move || {
            let _held = narrow;
            panic!("layout failed");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(viewport.listener_count(), 0);
        viewport.resize(1000);
        assert!(flag.load(Ordering::Acquire));
    }

    #[test]
    fn listener_outliving_viewport_drops_cleanly() {
        let viewport = Viewport::new(500);
        let narrow = use_narrow(Some(&viewport), 768);

        drop(viewport);

        assert!(narrow.get());
        drop(narrow);
    }

    #[test]
    fn observers_are_independent() {
        let viewport = Viewport::new(900);
        let tablet = use_narrow(Some(&viewport), 768);
        let desktop = use_narrow(Some(&viewport), 1280);

        assert!(!tablet.get());
        assert!(desktop.get());

        drop(desktop);
        viewport.resize(600);

        assert!(tablet.get());
        assert_eq!(viewport.listener_count(), 1);
    }
}
