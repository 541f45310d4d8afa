//! Wire messages of the platform protocol.
//!
//! Requests arrive with raw primitives exactly as a client sent them.
//! Each request validates into a typed command before any component sees
//! it, so a rejected request never has a partial effect.

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind, normalize};
use crate::error::{PinHubError, RangeError, ValidationError};
use crate::id::{CoilNumber, LightNumber, SwitchNumber};
use crate::rule::{HardwareRule, RuleKey};
use crate::time::Millis;
use crate::unit::{Brightness, Power};

fn duration_ms(field: &'static str, value: i64) -> Result<u32, RangeError> {
    if value < 0 {
        return Err(RangeError::Negative { field, value });
    }
    u32::try_from(value).map_err(|_| RangeError::TooLarge {
        field,
        value,
        max: i64::from(u32::MAX),
    })
}

fn timestamp(value: i64) -> Result<Millis, RangeError> {
    Millis::try_from(value).map_err(|_| RangeError::Negative {
        field: "timestamp",
        value,
    })
}

// ---------------------------------------------------------------------------
// Switches
// ---------------------------------------------------------------------------

/// A transition reported by the switch source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchTransitionRequest {
    pub switch_number: String,
    pub is_active: bool,
    pub timestamp: i64,
}

/// Validated [`SwitchTransitionRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchTransition {
    pub switch_number: SwitchNumber,
    pub is_active: bool,
    pub timestamp: Millis,
}

impl SwitchTransitionRequest {
    /// # Errors
    ///
    /// Returns a validation or range error for a blank number or negative timestamp.
    pub fn validate(self) -> Result<SwitchTransition, PinHubError> {
        Ok(SwitchTransition {
            switch_number: SwitchNumber::new(self.switch_number)?,
            is_active: self.is_active,
            timestamp: timestamp(self.timestamp)?,
        })
    }
}

/// Outcome of a reported transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    /// `false` when the report repeated the current state.
    pub changed: bool,
}

// ---------------------------------------------------------------------------
// Coils
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoilPulseRequest {
    pub coil_number: String,
    pub pulse_ms: i64,
    pub pulse_power: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoilPulse {
    pub coil: CoilNumber,
    pub pulse_ms: u32,
    pub pulse_power: Power,
}

impl CoilPulseRequest {
    /// # Errors
    ///
    /// Returns a validation or range error for any invalid field.
    pub fn validate(self) -> Result<CoilPulse, PinHubError> {
        Ok(CoilPulse {
            coil: CoilNumber::new(self.coil_number)?,
            pulse_ms: duration_ms("pulse_ms", self.pulse_ms)?,
            pulse_power: Power::for_field("pulse_power", self.pulse_power)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoilEnableRequest {
    pub coil_number: String,
    pub pulse_ms: i64,
    pub pulse_power: f64,
    pub hold_power: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoilEnable {
    pub coil: CoilNumber,
    pub pulse_ms: u32,
    pub pulse_power: Power,
    pub hold_power: Power,
}

impl CoilEnableRequest {
    /// # Errors
    ///
    /// Returns a validation or range error for any invalid field.
    pub fn validate(self) -> Result<CoilEnable, PinHubError> {
        Ok(CoilEnable {
            coil: CoilNumber::new(self.coil_number)?,
            pulse_ms: duration_ms("pulse_ms", self.pulse_ms)?,
            pulse_power: Power::for_field("pulse_power", self.pulse_power)?,
            hold_power: Power::for_field("hold_power", self.hold_power)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoilDisableRequest {
    pub coil_number: String,
}

impl CoilDisableRequest {
    /// # Errors
    ///
    /// Returns a validation error for a blank coil number.
    pub fn validate(self) -> Result<CoilNumber, PinHubError> {
        Ok(CoilNumber::new(self.coil_number)?)
    }
}

// ---------------------------------------------------------------------------
// Hardware rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigureHardwareRuleRequest {
    pub coil_number: String,
    pub switch_number: String,
    pub pulse_ms: i64,
    pub pulse_power: f64,
    pub hold_power: f64,
}

impl ConfigureHardwareRuleRequest {
    /// # Errors
    ///
    /// Returns a validation or range error for any invalid field.
    pub fn validate(self) -> Result<HardwareRule, PinHubError> {
        Ok(HardwareRule {
            switch_number: SwitchNumber::new(self.switch_number)?,
            coil_number: CoilNumber::new(self.coil_number)?,
            pulse_ms: duration_ms("pulse_ms", self.pulse_ms)?,
            pulse_power: Power::for_field("pulse_power", self.pulse_power)?,
            hold_power: Power::for_field("hold_power", self.hold_power)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveHardwareRuleRequest {
    pub coil_number: String,
    pub switch_number: String,
}

impl RemoveHardwareRuleRequest {
    /// # Errors
    ///
    /// Returns a validation error for a blank number.
    pub fn validate(self) -> Result<RuleKey, PinHubError> {
        Ok(RuleKey {
            switch_number: SwitchNumber::new(self.switch_number)?,
            coil_number: CoilNumber::new(self.coil_number)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Lights
// ---------------------------------------------------------------------------

/// One channel of a [`LightFadeRequest`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeTarget {
    pub light_number: String,
    pub target_brightness: f64,
}

/// `LightFade`: one duration shared by every listed channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightFadeRequest {
    pub common_fade_ms: i64,
    pub fades: Vec<FadeTarget>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightFade {
    pub fade_ms: u32,
    pub targets: Vec<(LightNumber, Brightness)>,
}

impl LightFadeRequest {
    /// # Errors
    ///
    /// Returns [`ValidationError::NoFadeTargets`] for an empty list, or a
    /// validation or range error for the first invalid field.
    pub fn validate(self) -> Result<LightFade, PinHubError> {
        if self.fades.is_empty() {
            return Err(ValidationError::NoFadeTargets.into());
        }
        let fade_ms = duration_ms("common_fade_ms", self.common_fade_ms)?;
        let targets = self
            .fades
            .into_iter()
            .map(|t| -> Result<_, PinHubError> {
                Ok((
                    LightNumber::new(t.light_number)?,
                    Brightness::for_field("target_brightness", t.target_brightness)?,
                ))
            })
            .collect::<Result<Vec<_>, PinHubError>>()?;
        Ok(LightFade { fade_ms, targets })
    }
}

/// `FadeRGB`: three component fades sharing one duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeRgbRequest {
    pub light_number: String,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub fade_ms: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FadeRgb {
    pub light: LightNumber,
    pub rgb: [Brightness; 3],
    pub fade_ms: u32,
}

impl FadeRgbRequest {
    /// # Errors
    ///
    /// Returns a validation or range error for any invalid field.
    pub fn validate(self) -> Result<FadeRgb, PinHubError> {
        Ok(FadeRgb {
            light: LightNumber::new(self.light_number)?,
            rgb: [
                Brightness::for_field("r", self.r)?,
                Brightness::for_field("g", self.g)?,
                Brightness::for_field("b", self.b)?,
            ],
            fade_ms: duration_ms("fade_ms", self.fade_ms)?,
        })
    }
}

/// `FadeSingleColor`: one channel, one target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FadeSingleColorRequest {
    pub light_number: String,
    pub target_brightness: f64,
    pub fade_ms: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FadeSingleColor {
    pub light: LightNumber,
    pub target: Brightness,
    pub fade_ms: u32,
}

impl FadeSingleColorRequest {
    /// # Errors
    ///
    /// Returns a validation or range error for any invalid field.
    pub fn validate(self) -> Result<FadeSingleColor, PinHubError> {
        Ok(FadeSingleColor {
            light: LightNumber::new(self.light_number)?,
            target: Brightness::for_field("target_brightness", self.target_brightness)?,
            fade_ms: duration_ms("fade_ms", self.fade_ms)?,
        })
    }
}

/// Sampled brightness of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub light_number: LightNumber,
    pub brightness: Brightness,
    /// Target of the fade still running, if any.
    pub fading_to: Option<Brightness>,
}

// ---------------------------------------------------------------------------
// Devices
// ---------------------------------------------------------------------------

/// Declares a named device, from the config file or a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDeviceRequest {
    pub kind: DeviceKind,
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RegisterDeviceRequest {
    /// Normalise the name and tags and check the number for the kind.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or number.
    pub fn validate(self) -> Result<Device, PinHubError> {
        let name = normalize(&self.name);
        if name.is_empty() {
            return Err(ValidationError::EmptyName {
                kind: self.kind.as_str(),
            }
            .into());
        }
        let number = match self.kind {
            DeviceKind::Switch => String::from(SwitchNumber::new(self.number)?),
            DeviceKind::Coil => String::from(CoilNumber::new(self.number)?),
            DeviceKind::Light => String::from(LightNumber::new(self.number)?),
        };
        Ok(Device {
            kind: self.kind,
            name,
            number,
            label: self.label.filter(|label| !label.trim().is_empty()),
            tags: self
                .tags
                .iter()
                .map(|tag| normalize(tag))
                .filter(|tag| !tag.is_empty())
                .collect(),
        })
    }
}

/// Filters for listing devices. Every filter present must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceQuery {
    #[serde(default)]
    pub kind: Option<DeviceKind>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
}

/// Disable every coil, or only the coil devices carrying `tag`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisableCoilsRequest {
    #[serde(default)]
    pub tag: Option<String>,
}
