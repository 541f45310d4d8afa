//! Light fade engine — per-channel linear fades sampled against a clock.
//!
//! A fade is stored, not ticked. Brightness is computed on read from the
//! fade's start point and the clock, so no background task is needed.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use pinhub_domain::id::LightNumber;
use pinhub_domain::light::{Color, LightChannel};
use pinhub_domain::rpc::{FadeRgb, FadeSingleColor, LightFade, LightState};
use pinhub_domain::unit::Brightness;

use crate::ports::Clock;

/// Owner of every light channel's brightness and in-flight fade.
pub struct LightFadeEngine<C> {
    clock: C,
    channels: Mutex<HashMap<LightNumber, LightChannel>>,
}

impl<C: Clock> LightFadeEngine<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Start the same-duration fade on every listed channel.
    ///
    /// All channels share one start time and are updated under one lock.
    pub fn fade_channels(&self, fade: &LightFade) {
        self.start(
            fade.targets
                .iter()
                .map(|(light, target)| (light.clone(), *target)),
            fade.fade_ms,
        );
    }

    /// Fade the three colour channels of an RGB light together.
    pub fn fade_rgb(&self, fade: &FadeRgb) {
        self.start(
            Color::ALL
                .into_iter()
                .zip(fade.rgb)
                .map(|(color, target)| (color.channel_of(&fade.light), target)),
            fade.fade_ms,
        );
    }

    pub fn fade_single_color(&self, fade: &FadeSingleColor) {
        self.start(std::iter::once((fade.light.clone(), fade.target)), fade.fade_ms);
    }

    /// Brightness of `light` right now. Unknown channels are off.
    #[must_use]
    pub fn brightness(&self, light: &LightNumber) -> Brightness {
        self.state(light).brightness
    }

    /// Sampled state of `light`, including the target of a running fade.
    #[must_use]
    pub fn state(&self, light: &LightNumber) -> LightState {
        let now = self.clock.now_ms();
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let (brightness, fading_to) = match channels.get_mut(light) {
            Some(channel) => {
                channel.settle(now);
                (
                    channel.brightness_at(now),
                    channel.active_fade(now).map(|fade| fade.target_brightness),
                )
            }
            None => (Brightness::ZERO, None),
        };
        LightState {
            light_number: light.clone(),
            brightness,
            fading_to,
        }
    }

    /// Cancel every fade and switch every channel off.
    ///
    /// Returns how many channels were forgotten.
    pub fn reset(&self) -> usize {
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        let count = channels.len();
        channels.clear();
        count
    }

    fn start(&self, targets: impl Iterator<Item = (LightNumber, Brightness)>, fade_ms: u32) {
        let now = self.clock.now_ms();
        let mut channels = self.channels.lock().unwrap_or_else(PoisonError::into_inner);
        for (light, target) in targets {
            tracing::trace!(light = %light, target = target.value(), fade_ms, "starting fade");
            channels
                .entry(light.clone())
                .or_insert_with(|| LightChannel::off(light))
                .start_fade(target, fade_ms, now);
        }
    }
}
