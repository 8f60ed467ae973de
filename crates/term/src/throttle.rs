use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Skips redraws when nothing visible changed.
///
/// A frame is drawn when its fingerprint differs from the last drawn frame,
/// or when `heartbeat_ms` passed since the last draw.
#[derive(Debug, Clone)]
pub struct FrameThrottle {
    heartbeat_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl FrameThrottle {
    pub fn new(heartbeat_ms: u64) -> Self {
        Self {
            heartbeat_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    pub fn fingerprint(value: &impl Hash) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.heartbeat_ms;
        if changed || stale {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Force the next call to render.
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_renders() {
        let mut t = FrameThrottle::new(1000);
        assert!(t.should_render(0, 7));
    }

    #[test]
    fn unchanged_frames_wait_for_heartbeat() {
        let mut t = FrameThrottle::new(1000);
        assert!(t.should_render(0, 7));
        assert!(!t.should_render(16, 7));
        assert!(!t.should_render(999, 7));
        assert!(t.should_render(1000, 7));
    }

    #[test]
    fn changes_render_immediately() {
        let mut t = FrameThrottle::new(1000);
        assert!(t.should_render(0, 1));
        assert!(t.should_render(16, 2));
        assert!(!t.should_render(32, 2));
        t.invalidate();
        assert!(t.should_render(48, 2));
    }

    #[test]
    fn fingerprint_follows_value() {
        assert_eq!(FrameThrottle::fingerprint(&(1, "a")), FrameThrottle::fingerprint(&(1, "a")));
        assert_ne!(FrameThrottle::fingerprint(&(1, "a")), FrameThrottle::fingerprint(&(2, "a")));
    }
}
