//! Frame pacing for the host loop.
//!
//! The sum-ten board only changes on input or on the 1 Hz countdown, so most
//! loop iterations have nothing new to draw.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to draw a new frame.
    ///
    /// - `is_static=false` (a drag is in flight): always draw.
    /// - `is_static=true`: draw on fingerprint change, otherwise at most once per
    ///   `min_static_interval_ms` so resizes and adapter status still show up.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let due = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if self.has_rendered && is_static && !changed && !due {
            return false;
        }

        self.has_rendered = true;
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }

    /// Force the next call to draw.
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }
}
