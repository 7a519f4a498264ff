//! Next-frame scheduling abstraction
//!
//! The engine never talks to a display loop directly. It asks a
//! [`FrameSource`] for the next callback and the host delivers it by calling
//! [`Engine::frame`](crate::Engine::frame). This keeps the scheduler
//! testable without a real display and portable to hosts that have no
//! per-refresh callback at all.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier of a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Build a handle from a source-assigned id.
    pub fn from_raw(id: u64) -> Self {
        FrameHandle(id)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Host primitive that delivers at most one frame callback per request.
///
/// `request_frame` arms the next delivery; the host then invokes the engine's
/// frame pump once. `cancel_frame` revokes a pending request. A source that
/// cannot revoke (winit redraw requests, for instance) may treat cancel as a
/// no-op: a stopped engine ignores stray deliveries.
pub trait FrameSource {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Shared single-threaded sources work as-is; the engine and the host can
/// hold the same underlying source.
impl<S: FrameSource> FrameSource for Rc<RefCell<S>> {
    fn request_frame(&mut self) -> FrameHandle {
        self.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.borrow_mut().cancel_frame(handle)
    }
}

/// Frame source pumped by hand, for tests and headless hosts.
///
/// Requests are recorded rather than scheduled; the host checks
/// [`pending`](ManualFrameSource::pending) and calls the engine's frame pump
/// itself.
pub struct ManualFrameSource {
    next_id: u64,
    pending: Option<FrameHandle>,
    requests: u64,
    cancels: u64,
}

impl Default for ManualFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualFrameSource {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: None,
            requests: 0,
            cancels: 0,
        }
    }

    /// Handle of the frame waiting to be delivered, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Total frames requested so far.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Total cancellations observed.
    pub fn cancels(&self) -> u64 {
        self.cancels
    }
}

impl FrameSource for ManualFrameSource {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::from_raw(self.next_id);
        self.pending = Some(handle);
        self.requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancels += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_produce_distinct_handles() {
        let mut source = ManualFrameSource::new();
        let first = source.request_frame();
        let second = source.request_frame();
        assert_ne!(first, second);
        assert_eq!(source.requests(), 2);
        assert_eq!(source.pending(), Some(second));
    }

    #[test]
    fn cancel_clears_matching_pending() {
        let mut source = ManualFrameSource::new();
        let handle = source.request_frame();
        source.cancel_frame(handle);
        assert_eq!(source.pending(), None);
        assert_eq!(source.cancels(), 1);
    }

    #[test]
    fn cancel_of_stale_handle_leaves_pending() {
        let mut source = ManualFrameSource::new();
        let stale = source.request_frame();
        let current = source.request_frame();
        source.cancel_frame(stale);
        assert_eq!(source.pending(), Some(current));
    }

    #[test]
    fn shared_source_forwards() {
        let source = Rc::new(RefCell::new(ManualFrameSource::new()));
        let mut shared = source.clone();
        let handle = shared.request_frame();
        assert_eq!(source.borrow().pending(), Some(handle));
        shared.cancel_frame(handle);
        assert_eq!(source.borrow().pending(), None);
    }
}
