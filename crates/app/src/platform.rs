//! Platform facade — the service surface offered to the game controller.
//!
//! Each operation validates its wire request into typed domain values
//! before any component is touched, then dispatches to the owning
//! component. A rejected request therefore never has a partial effect.

use std::collections::BTreeSet;
use std::sync::Arc;

use pinhub_domain::coil::Coil;
use pinhub_domain::device::{Device, DeviceKind};
use pinhub_domain::error::{NotFoundError, PinHubError};
use pinhub_domain::id::{CoilNumber, LightNumber, SwitchNumber};
use pinhub_domain::platform::{CommandPolicy, PlatformDetails};
use pinhub_domain::rpc::{
    CoilDisableRequest, CoilEnableRequest, CoilPulseRequest, ConfigureHardwareRuleRequest,
    DeviceQuery, DisableCoilsRequest, FadeRgbRequest, FadeSingleColorRequest, LightFadeRequest,
    LightState, RegisterDeviceRequest, RemoveHardwareRuleRequest, SwitchTransitionRequest,
    TransitionResponse,
};
use pinhub_domain::rule::HardwareRule;
use pinhub_domain::switch::Switch;
use pinhub_domain::time::now;

use crate::coil_controller::CoilController;
use crate::device_inventory::DeviceInventory;
use crate::hardware_rules::HardwareRuleTable;
use crate::light_fade::LightFadeEngine;
use crate::ports::{Actuator, Clock};
use crate::switch_registry::SwitchRegistry;
use crate::switch_stream::{Subscription, SwitchChangeStream};

/// Default per-subscriber buffer of the change stream.
pub const DEFAULT_STREAM_CAPACITY: usize = 256;

/// Settings the facade is built from.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    pub name: String,
    pub command_policy: CommandPolicy,
    pub stream_capacity: usize,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            name: "pinhub".to_string(),
            command_policy: CommandPolicy::default(),
            stream_capacity: DEFAULT_STREAM_CAPACITY,
        }
    }
}

/// Composition of every hardware component behind one API.
pub struct Platform<A, C> {
    details: PlatformDetails,
    rules: Arc<HardwareRuleTable>,
    coils: Arc<CoilController<A>>,
    devices: DeviceInventory,
    lights: LightFadeEngine<C>,
    stream: Arc<SwitchChangeStream>,
    switches: SwitchRegistry<A>,
}

impl<A, C> Platform<A, C>
where
    A: Actuator + Send + Sync,
    C: Clock + Send + Sync,
{
    pub fn new(config: PlatformConfig, actuator: A, clock: C) -> Self {
        let stream = Arc::new(SwitchChangeStream::new(config.stream_capacity));
        let details = PlatformDetails {
            name: config.name,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: now(),
            capabilities: actuator.capabilities(),
            command_policy: config.command_policy,
            stream_capacity: stream.capacity(),
        };
        let rules = Arc::new(HardwareRuleTable::new());
        let coils = Arc::new(CoilController::new(actuator, config.command_policy));
        let switches = SwitchRegistry::new(
            Arc::clone(&rules),
            Arc::clone(&coils),
            Arc::clone(&stream),
        );
        Self {
            details,
            rules,
            coils,
            devices: DeviceInventory::new(),
            lights: LightFadeEngine::new(clock),
            stream,
            switches,
        }
    }

    // ── Platform ───────────────────────────────────────────────────

    #[must_use]
    pub fn get_platform_details(&self) -> PlatformDetails {
        self.details.clone()
    }

    /// Open a subscription to switch changes published from now on.
    #[must_use]
    pub fn get_switch_changes(&self) -> Subscription {
        self.stream.subscribe()
    }

    /// Close every change subscription. Commands keep working.
    pub fn shutdown(&self) {
        self.stream.shutdown();
    }

    /// Return the playfield to rest: every fade cancelled with its channel
    /// off, then every coil disabled. Switch state and rules are kept.
    ///
    /// # Errors
    ///
    /// Returns the first coil failure, as for
    /// [`disable_coils`](Self::disable_coils).
    #[tracing::instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), PinHubError> {
        let lights = self.lights.reset();
        let coils = self.disable_coils(DisableCoilsRequest::default()).await?;
        tracing::info!(lights, coils = coils.len(), "platform reset");
        Ok(())
    }

    // ── Switches ───────────────────────────────────────────────────

    /// Feed a transition from the switch source.
    ///
    /// # Errors
    ///
    /// Returns a validation or range error for a malformed request, or
    /// [`PinHubError::StaleEvent`] for an out-of-order timestamp.
    #[tracing::instrument(skip(self))]
    pub async fn report_transition(
        &self,
        request: SwitchTransitionRequest,
    ) -> Result<TransitionResponse, PinHubError> {
        let transition = request.validate()?;
        let changed = self.switches.report_transition(&transition).await?;
        Ok(TransitionResponse { changed })
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank switch number.
    pub async fn switch_state(&self, number: &str) -> Result<Switch, PinHubError> {
        let number = SwitchNumber::new(number)?;
        Ok(self.switches.state(&number).await)
    }

    pub async fn switches(&self) -> Vec<Switch> {
        self.switches.snapshot().await
    }

    // ── Coils ──────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns a validation or range error for a malformed request,
    /// [`PinHubError::Busy`] under the reject policy, or
    /// [`PinHubError::Unavailable`] when the actuator fails.
    #[tracing::instrument(skip(self))]
    pub async fn coil_pulse(&self, request: CoilPulseRequest) -> Result<Coil, PinHubError> {
        let cmd = request.validate()?;
        self.coils.pulse(&cmd).await
    }

    /// # Errors
    ///
    /// Same as [`coil_pulse`](Self::coil_pulse).
    #[tracing::instrument(skip(self))]
    pub async fn coil_enable(&self, request: CoilEnableRequest) -> Result<Coil, PinHubError> {
        let cmd = request.validate()?;
        self.coils.enable(&cmd).await
    }

    /// # Errors
    ///
    /// Same as [`coil_pulse`](Self::coil_pulse).
    #[tracing::instrument(skip(self))]
    pub async fn coil_disable(&self, request: CoilDisableRequest) -> Result<Coil, PinHubError> {
        let coil = request.validate()?;
        self.coils.disable(&coil).await
    }

    /// Disable every known coil, or only the coil devices tagged `tag`.
    ///
    /// Every targeted coil is attempted even when one fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`PinHubError::Busy`] or
    /// [`PinHubError::Unavailable`] met along the way.
    #[tracing::instrument(skip(self))]
    pub async fn disable_coils(&self, request: DisableCoilsRequest) -> Result<Vec<Coil>, PinHubError> {
        let targets: BTreeSet<CoilNumber> = match request.tag.as_deref() {
            Some(tag) => self
                .devices
                .tagged(DeviceKind::Coil, tag)
                .iter()
                .filter_map(Device::coil_number)
                .collect(),
            None => self
                .coils
                .known()
                .into_iter()
                .chain(
                    self.devices
                        .query(&DeviceQuery {
                            kind: Some(DeviceKind::Coil),
                            ..DeviceQuery::default()
                        })
                        .iter()
                        .filter_map(Device::coil_number),
                )
                .collect(),
        };

        let mut disabled = Vec::with_capacity(targets.len());
        let mut first_error = None;
        for number in targets {
            match self.coils.disable(&number).await {
                Ok(coil) => disabled.push(coil),
                Err(err) => {
                    tracing::error!(coil = %number, error = %err, "failed to disable coil");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(disabled),
        }
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank coil number.
    pub async fn coil_state(&self, number: &str) -> Result<Coil, PinHubError> {
        let number = CoilNumber::new(number)?;
        Ok(self.coils.state(&number).await)
    }

    // ── Hardware rules ─────────────────────────────────────────────

    /// Install or replace the rule for a (switch, coil) pair.
    ///
    /// # Errors
    ///
    /// Returns a validation or range error for a malformed request.
    #[tracing::instrument(skip(self))]
    pub fn configure_hardware_rule(
        &self,
        request: ConfigureHardwareRuleRequest,
    ) -> Result<HardwareRule, PinHubError> {
        let rule = request.validate()?;
        self.switches.touch(&rule.switch_number);
        if let Some(previous) = self.rules.configure(rule.clone()) {
            tracing::debug!(rule = %previous.key(), "replaced hardware rule");
        } else {
            tracing::info!(rule = %rule.key(), "configured hardware rule");
        }
        Ok(rule)
    }

    /// Remove a rule. Removing an absent rule succeeds.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank number.
    #[tracing::instrument(skip(self))]
    pub fn remove_hardware_rule(
        &self,
        request: RemoveHardwareRuleRequest,
    ) -> Result<(), PinHubError> {
        let key = request.validate()?;
        match self.rules.remove(&key) {
            Ok(_) => tracing::info!(rule = %key, "removed hardware rule"),
            Err(err) => tracing::debug!(error = %err, "nothing to remove"),
        }
        Ok(())
    }

    #[must_use]
    pub fn hardware_rules(&self) -> Vec<HardwareRule> {
        self.rules.list()
    }

    // ── Lights ─────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns a validation or range error if any target is invalid; no
    /// channel changes in that case.
    #[tracing::instrument(skip(self))]
    pub fn light_fade(&self, request: LightFadeRequest) -> Result<(), PinHubError> {
        let fade = request.validate()?;
        self.lights.fade_channels(&fade);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a validation or range error for a malformed request.
    #[tracing::instrument(skip(self))]
    pub fn fade_rgb(&self, request: FadeRgbRequest) -> Result<(), PinHubError> {
        let fade = request.validate()?;
        self.lights.fade_rgb(&fade);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a validation or range error for a malformed request.
    #[tracing::instrument(skip(self))]
    pub fn fade_single_color(&self, request: FadeSingleColorRequest) -> Result<(), PinHubError> {
        let fade = request.validate()?;
        self.lights.fade_single_color(&fade);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a validation error for a blank light number.
    pub fn light_state(&self, number: &str) -> Result<LightState, PinHubError> {
        let number = LightNumber::new(number)?;
        Ok(self.lights.state(&number))
    }

    // ── Devices ────────────────────────────────────────────────────

    /// Declare a named device, replacing any device of the same kind and
    /// name. A switch device is registered with the switch registry.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name or number.
    #[tracing::instrument(skip(self))]
    pub fn register_device(&self, request: RegisterDeviceRequest) -> Result<Device, PinHubError> {
        let device = request.validate()?;
        if let Some(number) = device.switch_number() {
            self.switches.touch(&number);
        }
        match self.devices.register(device.clone()) {
            Some(previous) => tracing::debug!(
                kind = %previous.kind,
                name = %previous.name,
                number = %previous.number,
                "replaced device"
            ),
            None => tracing::info!(
                kind = %device.kind,
                name = %device.name,
                number = %device.number,
                "registered device"
            ),
        }
        Ok(device)
    }

    /// # Errors
    ///
    /// Returns [`PinHubError::NotFound`] if no device of `kind` is named `name`.
    pub fn device(&self, kind: DeviceKind, name: &str) -> Result<Device, PinHubError> {
        self.devices.get(kind, name).ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: format!("{kind}/{name}"),
            }
            .into()
        })
    }

    #[must_use]
    pub fn devices(&self, query: &DeviceQuery) -> Vec<Device> {
        self.devices.query(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use pinhub_domain::coil::Actuation;
    use pinhub_domain::error::UnavailableError;
    use pinhub_domain::event::StreamItem;
    use pinhub_domain::platform::Capabilities;
    use pinhub_domain::unit::{Brightness, Power};
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    // ── Spy actuator ───────────────────────────────────────────────

    #[derive(Default)]
    struct SpyActuator {
        calls: Mutex<Vec<Actuation>>,
        offline: AtomicBool,
    }

    impl SpyActuator {
        fn calls(&self) -> Vec<Actuation> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Actuator for SpyActuator {
        fn actuate(
            &self,
            actuation: &Actuation,
        ) -> impl Future<Output = Result<(), PinHubError>> + Send {
            let result = if self.offline.load(Ordering::SeqCst) {
                Err(UnavailableError {
                    coil: actuation.coil.clone(),
                    reason: "offline",
                }
                .into())
            } else {
                self.calls.lock().unwrap().push(actuation.clone());
                Ok(())
            };
            async { result }
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities { hold_power: false }
        }
    }

    type TestPlatform = Platform<Arc<SpyActuator>, Arc<ManualClock>>;

    fn platform() -> (Arc<SpyActuator>, Arc<ManualClock>, TestPlatform) {
        let actuator = Arc::new(SpyActuator::default());
        let clock = Arc::new(ManualClock::default());
        let platform = Platform::new(
            PlatformConfig::default(),
            Arc::clone(&actuator),
            Arc::clone(&clock),
        );
        (actuator, clock, platform)
    }

    fn transition(switch: &str, is_active: bool, timestamp: i64) -> SwitchTransitionRequest {
        SwitchTransitionRequest {
            switch_number: switch.to_string(),
            is_active,
            timestamp,
        }
    }

    fn s1_c1_rule() -> ConfigureHardwareRuleRequest {
        ConfigureHardwareRuleRequest {
            coil_number: "C1".to_string(),
            switch_number: "S1".to_string(),
            pulse_ms: 25,
            pulse_power: 0.8,
            hold_power: 0.0,
        }
    }

    fn single(light: &str, target: f64, fade_ms: i64) -> FadeSingleColorRequest {
        FadeSingleColorRequest {
            light_number: light.to_string(),
            target_brightness: target,
            fade_ms,
        }
    }

    fn enable_request(coil: &str) -> CoilEnableRequest {
        CoilEnableRequest {
            coil_number: coil.to_string(),
            pulse_ms: 10,
            pulse_power: 1.0,
            hold_power: 0.25,
        }
    }

    fn device(kind: DeviceKind, name: &str, number: &str, tags: &[&str]) -> RegisterDeviceRequest {
        RegisterDeviceRequest {
            kind,
            name: name.to_string(),
            number: number.to_string(),
            label: None,
            tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
        }
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[test]
    fn should_describe_platform() {
        let (_, _, platform) = platform();
        let details = platform.get_platform_details();
        assert_eq!(details.name, "pinhub");
        assert_eq!(details.command_policy, CommandPolicy::Queue);
        assert_eq!(details.stream_capacity, DEFAULT_STREAM_CAPACITY);
        assert!(!details.capabilities.hold_power);
    }

    #[test]
    fn should_describe_effective_stream_capacity() {
        let platform = Platform::new(
            PlatformConfig {
                stream_capacity: 3,
                ..PlatformConfig::default()
            },
            Arc::new(SpyActuator::default()),
            Arc::new(ManualClock::default()),
        );
        assert_eq!(platform.get_platform_details().stream_capacity, 4);
    }

    #[tokio::test]
    async fn should_fire_rule_once_on_activation_and_never_on_release() {
        let (actuator, _, platform) = platform();
        platform.configure_hardware_rule(s1_c1_rule()).unwrap();
        let mut sub = platform.get_switch_changes();

        platform
            .report_transition(transition("S1", true, 0))
            .await
            .unwrap();

        let expected = Actuation::enable(
            CoilNumber::new("C1").unwrap(),
            25,
            Power::new(0.8).unwrap(),
            Power::ZERO,
        );
        // the actuation is recorded before the event can be received
        assert_eq!(actuator.calls(), vec![expected]);
        let event = sub.recv().await.unwrap();
        let event = event.as_change().unwrap();
        assert_eq!(event.switch_number.as_str(), "S1");
        assert!(event.is_active);
        assert_eq!(event.timestamp, 0);

        platform
            .report_transition(transition("S1", false, 10))
            .await
            .unwrap();

        assert_eq!(actuator.calls().len(), 1);
        let event = sub.recv().await.unwrap();
        let event = event.as_change().unwrap();
        assert!(!event.is_active);
        assert_eq!(event.timestamp, 10);
    }

    #[tokio::test]
    async fn should_reflect_last_report_in_switch_state() {
        let (_, _, platform) = platform();
        for (t, active) in [(1, true), (2, false), (2, true), (9, true)] {
            platform
                .report_transition(transition("S1", active, t))
                .await
                .unwrap();
        }
        assert!(platform.switch_state("S1").await.unwrap().is_active);
    }

    #[tokio::test]
    async fn should_reject_stale_report_without_event() {
        let (_, _, platform) = platform();
        platform
            .report_transition(transition("S1", true, 100))
            .await
            .unwrap();
        let mut sub = platform.get_switch_changes();

        let result = platform.report_transition(transition("S1", false, 99)).await;

        assert!(matches!(result, Err(PinHubError::StaleEvent(_))));
        assert!(platform.switch_state("S1").await.unwrap().is_active);
        platform.shutdown();
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn should_reject_negative_timestamp_before_touching_state() {
        let (_, _, platform) = platform();
        let result = platform.report_transition(transition("S1", true, -1)).await;
        assert!(matches!(result, Err(PinHubError::InvalidRange(_))));
        assert!(platform.switches().await.is_empty());
    }

    #[test]
    fn should_read_full_brightness_immediately_after_instant_fade() {
        let (_, _, platform) = platform();
        platform.fade_single_color(single("L1", 1.0, 0)).unwrap();
        assert_eq!(
            platform.light_state("L1").unwrap().brightness,
            Brightness::FULL
        );
    }

    #[test]
    fn should_restart_overlapping_fade_from_sampled_brightness() {
        let (_, clock, platform) = platform();
        let fade = |target| LightFadeRequest {
            common_fade_ms: 100,
            fades: vec![pinhub_domain::rpc::FadeTarget {
                light_number: "L1".to_string(),
                target_brightness: target,
            }],
        };

        platform.light_fade(fade(1.0)).unwrap();
        clock.advance(40);
        platform.light_fade(fade(0.0)).unwrap();
        clock.advance(50);

        let brightness = platform.light_state("L1").unwrap().brightness.value();
        assert!((brightness - 0.2).abs() < 1e-9, "got {brightness}");
        clock.advance(50);
        assert_eq!(
            platform.light_state("L1").unwrap().brightness,
            Brightness::ZERO
        );
    }

    #[test]
    fn should_leave_every_channel_untouched_when_one_target_invalid() {
        let (_, _, platform) = platform();
        let request = LightFadeRequest {
            common_fade_ms: 0,
            fades: vec![
                pinhub_domain::rpc::FadeTarget {
                    light_number: "L1".to_string(),
                    target_brightness: 1.0,
                },
                pinhub_domain::rpc::FadeTarget {
                    light_number: "L2".to_string(),
                    target_brightness: 1.5,
                },
            ],
        };

        let result = platform.light_fade(request);

        assert!(matches!(result, Err(PinHubError::InvalidRange(_))));
        assert_eq!(
            platform.light_state("L1").unwrap().brightness,
            Brightness::ZERO
        );
    }

    #[tokio::test]
    async fn should_end_disabled_after_pulse_on_enabled_coil() {
        let (_, _, platform) = platform();
        platform
            .coil_enable(CoilEnableRequest {
                coil_number: "C1".to_string(),
                pulse_ms: 10,
                pulse_power: 1.0,
                hold_power: 0.3,
            })
            .await
            .unwrap();

        let coil = platform
            .coil_pulse(CoilPulseRequest {
                coil_number: "C1".to_string(),
                pulse_ms: 1,
                pulse_power: 0.5,
            })
            .await
            .unwrap();

        assert!(!coil.enabled);
        assert!(!platform.coil_state("C1").await.unwrap().enabled);
    }

    #[tokio::test]
    async fn should_leave_coil_state_unchanged_when_actuator_offline() {
        let (actuator, _, platform) = platform();
        actuator.offline.store(true, Ordering::SeqCst);

        let result = platform
            .coil_enable(CoilEnableRequest {
                coil_number: "C1".to_string(),
                pulse_ms: 10,
                pulse_power: 1.0,
                hold_power: 0.3,
            })
            .await;

        assert!(matches!(result, Err(PinHubError::Unavailable(_))));
        assert!(!platform.coil_state("C1").await.unwrap().enabled);
    }

    #[test]
    fn should_treat_removal_of_absent_rule_as_success() {
        let (_, _, platform) = platform();
        let result = platform.remove_hardware_rule(RemoveHardwareRuleRequest {
            coil_number: "C1".to_string(),
            switch_number: "S1".to_string(),
        });
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_stop_firing_after_rule_removed() {
        let (actuator, _, platform) = platform();
        platform.configure_hardware_rule(s1_c1_rule()).unwrap();
        platform
            .remove_hardware_rule(RemoveHardwareRuleRequest {
                coil_number: "C1".to_string(),
                switch_number: "S1".to_string(),
            })
            .unwrap();

        platform
            .report_transition(transition("S1", true, 0))
            .await
            .unwrap();

        assert!(actuator.calls().is_empty());
        assert!(platform.hardware_rules().is_empty());
    }

    #[tokio::test]
    async fn should_list_switch_referenced_by_rule() {
        let (_, _, platform) = platform();
        platform.configure_hardware_rule(s1_c1_rule()).unwrap();

        let switches = platform.switches().await;

        assert_eq!(switches.len(), 1);
        assert!(!switches[0].is_active);
    }

    #[tokio::test]
    async fn should_list_switch_after_state_query() {
        let (_, _, platform) = platform();

        platform.switch_state("S9").await.unwrap();

        let switches = platform.switches().await;
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].number.to_string(), "S9");
    }

    #[tokio::test]
    async fn should_report_gap_to_subscriber_that_falls_behind() {
        let actuator = Arc::new(SpyActuator::default());
        let platform = Platform::new(
            PlatformConfig {
                stream_capacity: 1,
                ..PlatformConfig::default()
            },
            actuator,
            Arc::new(ManualClock::default()),
        );
        let mut sub = platform.get_switch_changes();

        for t in 0..3 {
            platform
                .report_transition(transition("S1", t % 2 == 0, t))
                .await
                .unwrap();
        }

        assert_eq!(sub.recv().await, Some(StreamItem::Gap { missed: 2 }));
        assert_eq!(sub.recv().await.unwrap().as_change().unwrap().sequence, 3);
    }

    #[test]
    fn should_reject_blank_light_number() {
        let (_, _, platform) = platform();
        assert!(matches!(
            platform.light_state("  "),
            Err(PinHubError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn should_disable_only_coils_with_tag() {
        let (_, _, platform) = platform();
        platform.register_device(device(DeviceKind::Coil, "left_flipper", "C1", &["flipper"])).unwrap();
        platform.register_device(device(DeviceKind::Coil, "right_flipper", "C2", &["Flipper"])).unwrap();
        platform.register_device(device(DeviceKind::Coil, "trough_eject", "C3", &[])).unwrap();
        for coil in ["C1", "C2", "C3"] {
            platform.coil_enable(enable_request(coil)).await.unwrap();
        }

        let disabled = platform
            .disable_coils(DisableCoilsRequest {
                tag: Some("flipper".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(disabled.len(), 2);
        assert!(!platform.coil_state("C1").await.unwrap().enabled);
        assert!(!platform.coil_state("C2").await.unwrap().enabled);
        assert!(platform.coil_state("C3").await.unwrap().enabled);
    }

    #[tokio::test]
    async fn should_disable_every_known_coil_without_tag() {
        let (actuator, _, platform) = platform();
        platform.register_device(device(DeviceKind::Coil, "magnet", "C9", &[])).unwrap();
        platform.coil_enable(enable_request("C1")).await.unwrap();
        platform.coil_enable(enable_request("C2")).await.unwrap();

        let disabled = platform
            .disable_coils(DisableCoilsRequest::default())
            .await
            .unwrap();

        // C9 was never enabled, so only two disables reach the hardware
        assert_eq!(disabled.len(), 3);
        assert_eq!(actuator.calls().iter().filter(|a| a.is_disable()).count(), 2);
    }

    #[tokio::test]
    async fn should_reset_coils_and_lights() {
        let (actuator, clock, platform) = platform();
        platform.coil_enable(enable_request("C1")).await.unwrap();
        platform.fade_single_color(single("L1", 1.0, 1_000)).unwrap();
        clock.advance(200);

        platform.reset().await.unwrap();

        assert!(!platform.coil_state("C1").await.unwrap().enabled);
        assert!(actuator.calls()[1].is_disable());
        let light = platform.light_state("L1").unwrap();
        assert_eq!(light.brightness, Brightness::ZERO);
        assert_eq!(light.fading_to, None);
    }

    #[tokio::test]
    async fn should_reset_lights_even_when_coils_cannot_be_disabled() {
        let (actuator, _, platform) = platform();
        platform.coil_enable(enable_request("C1")).await.unwrap();
        platform.fade_single_color(single("L1", 1.0, 0)).unwrap();
        actuator.offline.store(true, Ordering::SeqCst);

        let result = platform.reset().await;

        assert!(matches!(result, Err(PinHubError::Unavailable(_))));
        assert!(platform.coil_state("C1").await.unwrap().enabled);
        assert_eq!(platform.light_state("L1").unwrap().brightness, Brightness::ZERO);
    }

    #[test]
    fn should_look_up_registered_device_by_name() {
        let (_, _, platform) = platform();
        platform
            .register_device(device(DeviceKind::Light, "Shoot_Again", "L7", &["insert"]))
            .unwrap();

        let found = platform.device(DeviceKind::Light, "shoot_again").unwrap();
        assert_eq!(found.number, "L7");
        let missing = platform.device(DeviceKind::Coil, "shoot_again");
        assert!(matches!(missing, Err(PinHubError::NotFound(_))));
        let by_number = platform.devices(&DeviceQuery {
            number: Some("L7".to_string()),
            ..DeviceQuery::default()
        });
        assert_eq!(by_number, vec![found]);
    }

    #[tokio::test]
    async fn should_list_registered_switch_device_in_snapshot() {
        let (_, _, platform) = platform();
        platform
            .register_device(device(DeviceKind::Switch, "outlane_left", "S4", &[]))
            .unwrap();

        let switches = platform.switches().await;
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].number.to_string(), "S4");
    }

    #[test]
    fn should_reject_device_with_blank_number() {
        let (_, _, platform) = platform();
        let result = platform.register_device(device(DeviceKind::Coil, "magnet", " ", &[]));
        assert!(matches!(result, Err(PinHubError::Validation(_))));
        assert!(platform.devices(&DeviceQuery::default()).is_empty());
    }
}
