//! Light channels and their linear fades.

use serde::{Deserialize, Serialize};

use crate::id::LightNumber;
use crate::time::Millis;
use crate::unit::Brightness;

/// An in-flight linear fade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub start_brightness: Brightness,
    pub target_brightness: Brightness,
    pub start_time: Millis,
    pub duration_ms: u32,
}

impl Fade {
    /// Brightness at `now`, interpolated over elapsed time clamped to
    /// `[0, duration_ms]`.
    #[must_use]
    pub fn sample(&self, now: Millis) -> Brightness {
        if self.is_complete(now) {
            return self.target_brightness;
        }
        let elapsed = now.saturating_sub(self.start_time);
        #[allow(clippy::cast_precision_loss)]
        let progress = elapsed as f64 / f64::from(self.duration_ms);
        self.start_brightness.lerp(self.target_brightness, progress)
    }

    /// Whether the fade has reached its target at `now`.
    #[must_use]
    pub fn is_complete(&self, now: Millis) -> bool {
        now.saturating_sub(self.start_time) >= u64::from(self.duration_ms)
    }
}

/// One dimmable output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightChannel {
    pub number: LightNumber,
    brightness: Brightness,
    fade: Option<Fade>,
}

impl LightChannel {
    /// A channel that has never been driven.
    #[must_use]
    pub fn off(number: LightNumber) -> Self {
        Self {
            number,
            brightness: Brightness::ZERO,
            fade: None,
        }
    }

    /// Brightness at `now`, following the in-flight fade if any.
    #[must_use]
    pub fn brightness_at(&self, now: Millis) -> Brightness {
        self.fade
            .as_ref()
            .map_or(self.brightness, |fade| fade.sample(now))
    }

    /// The in-flight fade, if one is still running at `now`.
    #[must_use]
    pub fn active_fade(&self, now: Millis) -> Option<&Fade> {
        self.fade.as_ref().filter(|fade| !fade.is_complete(now))
    }

    /// Start a fade to `target` lasting `duration_ms`, preempting any fade
    /// in flight. The new fade starts from the brightness sampled at `now`.
    ///
    /// A zero duration applies `target` immediately.
    pub fn start_fade(&mut self, target: Brightness, duration_ms: u32, now: Millis) {
        let start = self.brightness_at(now);
        if duration_ms == 0 {
            self.brightness = target;
            self.fade = None;
            return;
        }
        self.brightness = start;
        self.fade = Some(Fade {
            start_brightness: start,
            target_brightness: target,
            start_time: now,
            duration_ms,
        });
    }

    /// Fold a completed fade into the stored brightness.
    pub fn settle(&mut self, now: Millis) {
        if let Some(fade) = self.fade {
            if fade.is_complete(now) {
                self.brightness = fade.target_brightness;
                self.fade = None;
            }
        }
    }
}

/// Colour component of an RGB light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    fn suffix(self) -> &'static str {
        match self {
            Self::Red => "r",
            Self::Green => "g",
            Self::Blue => "b",
        }
    }

    /// Channel number carrying this component of `light` (e.g. `L1:r`).
    #[must_use]
    pub fn channel_of(self, light: &LightNumber) -> LightNumber {
        // never blank: `light` itself is non-blank
        LightNumber::new(format!("{light}:{}", self.suffix()))
            .unwrap_or_else(|_| light.clone())
    }
}
