//! Frame-driven motion: easing curves, tweens, the back-to-top scroller and
//! the home page stat counters.

use ayur_types::config::SiteConfig;

/// Easing functions. Input `t` is clamped to `[0.0, 1.0]`.
pub mod easing {
    /// Linear easing (no acceleration).
    pub fn linear(t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }

    /// Cubic ease-in-out (smooth start and end).
    pub fn ease_in_out_cubic(t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
        }
    }
}

/// A running animation that interpolates between two values.
#[derive(Debug, Clone)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    pub duration_ms: u32,
    pub elapsed_ms: u32,
    pub easing: fn(f32) -> f32,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_ms: u32, easing: fn(f32) -> f32) -> Self {
        Self {
            start,
            end,
            duration_ms,
            elapsed_ms: 0,
            easing,
        }
    }

    /// Advance by `dt_ms` and return the current interpolated value.
    pub fn tick(&mut self, dt_ms: u32) -> f32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
        self.value()
    }

    /// Linear progress in `[0.0, 1.0]`.
    pub fn progress(&self) -> f32 {
        if self.duration_ms > 0 {
            self.elapsed_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Current value without advancing time.
    pub fn value(&self) -> f32 {
        let eased = (self.easing)(self.progress());
        self.start + (self.end - self.start) * eased
    }
}

// ---------------------------------------------------------------------------
// Back to top
// ---------------------------------------------------------------------------

/// Floating "back to top" button on the home page.
///
/// Shown once the page is scrolled past the threshold. Activating it
/// animates the scroll offset to zero along an ease-in-out-cubic curve.
#[derive(Debug, Clone)]
pub struct BackToTop {
    threshold_px: u32,
    duration_ms: u32,
    visible: bool,
    tween: Option<Tween>,
}

impl BackToTop {
    pub fn new(threshold_px: u32, duration_ms: u32) -> Self {
        Self {
            threshold_px,
            duration_ms,
            visible: false,
            tween: None,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.back_to_top_threshold_px, config.back_to_top_duration_ms)
    }

    /// Scroll listener: update visibility for the new offset.
    pub fn on_scroll(&mut self, scroll_y: u32) {
        self.visible = scroll_y > self.threshold_px;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Begin the scroll from `from_y`. Nothing happens at the top already.
    pub fn start(&mut self, from_y: u32) {
        if from_y == 0 {
            return;
        }
        self.tween = Some(Tween::new(
            from_y as f32,
            0.0,
            self.duration_ms,
            easing::ease_in_out_cubic,
        ));
        log::debug!("Back to top from {from_y}px");
    }

    /// Advance the animation. Returns the offset to scroll to this frame,
    /// or `None` when no animation is running.
    pub fn tick(&mut self, dt_ms: u32) -> Option<u32> {
        let tween = self.tween.as_mut()?;
        let y = tween.tick(dt_ms).round().max(0.0) as u32;
        if tween.is_finished() {
            self.tween = None;
        }
        self.on_scroll(y);
        Some(y)
    }
}

// ---------------------------------------------------------------------------
// Stat counter
// ---------------------------------------------------------------------------

/// Counter that climbs from 0 to its end value once started.
#[derive(Debug, Clone)]
pub struct StatCounter {
    pub end: u32,
    pub suffix: &'static str,
    pub label: &'static str,
    tween: Tween,
    started: bool,
}

impl StatCounter {
    pub fn new(end: u32, suffix: &'static str, label: &'static str, duration_ms: u32) -> Self {
        Self {
            end,
            suffix,
            label,
            tween: Tween::new(0.0, end as f32, duration_ms, easing::linear),
            started: false,
        }
    }

    /// Start counting (the stats row scrolled into view).
    pub fn start(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.started && self.tween.is_finished()
    }

    /// Advance by `dt_ms` and return the displayed value.
    pub fn tick(&mut self, dt_ms: u32) -> u32 {
        if !self.started {
            return 0;
        }
        self.tween.tick(dt_ms);
        self.value()
    }

    /// Displayed value: floored while running, exactly `end` when done.
    pub fn value(&self) -> u32 {
        if !self.started {
            0
        } else if self.tween.is_finished() {
            self.end
        } else {
            (self.tween.progress() * self.end as f32).floor() as u32
        }
    }

    /// Value with its suffix, as shown on the card.
    pub fn display(&self) -> String {
        format!("{}{}", self.value(), self.suffix)
    }
}

/// The three counters in the home page stats row.
pub fn home_stats(config: &SiteConfig) -> [StatCounter; 3] {
    let ms = config.counter_duration_ms;
    [
        StatCounter::new(100, "%", "Product Purity", ms),
        StatCounter::new(458, "+", "Happy Customers", ms),
        StatCounter::new(35, "+", "Years Experience", ms),
    ]
}
