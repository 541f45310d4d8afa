//! Coil controller — sequencing and conflict arbitration for coil commands.
//!
//! Each coil has its own async mutex. A command holds it from the first
//! actuation to the last, so two commands on one coil never interleave.
//! Commands on different coils proceed independently.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};

use pinhub_domain::coil::{Actuation, Coil};
use pinhub_domain::error::{BusyError, PinHubError};
use pinhub_domain::id::CoilNumber;
use pinhub_domain::platform::CommandPolicy;
use pinhub_domain::rpc::{CoilEnable, CoilPulse};
use pinhub_domain::rule::HardwareRule;

use crate::ports::Actuator;

/// Owner of every coil's commanded state.
pub struct CoilController<A> {
    actuator: A,
    policy: CommandPolicy,
    coils: std::sync::Mutex<HashMap<CoilNumber, Arc<Mutex<Coil>>>>,
}

impl<A> CoilController<A>
where
    A: Actuator + Send + Sync,
{
    pub fn new(actuator: A, policy: CommandPolicy) -> Self {
        Self {
            actuator,
            policy,
            coils: std::sync::Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    #[must_use]
    pub fn policy(&self) -> CommandPolicy {
        self.policy
    }

    /// Fire a pulse. A coil that was enabled is disabled once the pulse
    /// has had `pulse_ms` to complete; the coil always ends disabled.
    ///
    /// # Errors
    ///
    /// Returns [`PinHubError::Busy`] under [`CommandPolicy::Reject`] when
    /// another command is running, or [`PinHubError::Unavailable`] when the
    /// actuator fails. A failed pulse leaves the recorded state unchanged.
    /// Once the pulse has fired it is recorded, even if the follow-up
    /// disable then fails.
    pub async fn pulse(&self, cmd: &CoilPulse) -> Result<Coil, PinHubError> {
        let mut coil = self.acquire(&cmd.coil).await?;
        let was_enabled = coil.enabled;

        self.actuator
            .actuate(&Actuation::pulse(cmd.coil.clone(), cmd.pulse_ms, cmd.pulse_power))
            .await?;
        coil.record_pulse(cmd.pulse_ms, cmd.pulse_power);

        if was_enabled {
            tokio::time::sleep(Duration::from_millis(u64::from(cmd.pulse_ms))).await;
            self.actuator
                .actuate(&Actuation::disable(cmd.coil.clone()))
                .await
                .inspect_err(|err| {
                    tracing::error!(coil = %cmd.coil, error = %err, "failed to disable coil after pulse");
                })?;
            tracing::debug!(coil = %cmd.coil, "disabled previously enabled coil after pulse");
        }

        Ok(coil.clone())
    }

    /// Enable a coil, re-arming it with new parameters if already enabled.
    ///
    /// # Errors
    ///
    /// Returns [`PinHubError::Busy`] or [`PinHubError::Unavailable`] as for
    /// [`pulse`](Self::pulse).
    pub async fn enable(&self, cmd: &CoilEnable) -> Result<Coil, PinHubError> {
        let mut coil = self.acquire(&cmd.coil).await?;

        let actuation = Actuation::enable(
            cmd.coil.clone(),
            cmd.pulse_ms,
            cmd.pulse_power,
            cmd.hold_power,
        );
        if actuation.holds() && !self.actuator.capabilities().hold_power {
            tracing::debug!(coil = %cmd.coil, "actuator does not support hold power, it may be ignored");
        }
        self.actuator.actuate(&actuation).await?;

        coil.record_enable(cmd.pulse_ms, cmd.pulse_power, cmd.hold_power);
        Ok(coil.clone())
    }

    /// Disable a coil. Already-disabled coils are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`PinHubError::Busy`] or [`PinHubError::Unavailable`] as for
    /// [`pulse`](Self::pulse).
    pub async fn disable(&self, number: &CoilNumber) -> Result<Coil, PinHubError> {
        let mut coil = self.acquire(number).await?;
        if !coil.enabled {
            return Ok(coil.clone());
        }

        self.actuator
            .actuate(&Actuation::disable(number.clone()))
            .await?;

        coil.record_disable();
        Ok(coil.clone())
    }

    /// Fire a hardware rule's actuation on its coil.
    ///
    /// Waits for the coil's running command regardless of policy and leaves
    /// the commanded state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PinHubError::Unavailable`] when the actuator fails.
    pub async fn fire_rule(&self, rule: &HardwareRule) -> Result<(), PinHubError> {
        let _coil = self.slot(&rule.coil_number).lock_owned().await;
        self.actuator.actuate(&rule.actuation()).await
    }

    /// Commanded state of a coil; unknown coils are disabled.
    pub async fn state(&self, number: &CoilNumber) -> Coil {
        let slot = self.existing_slot(number);
        match slot {
            Some(slot) => slot.lock().await.clone(),
            None => Coil::disabled(number.clone()),
        }
    }

    /// Every coil that has been commanded or fired, ordered by number.
    #[must_use]
    pub fn known(&self) -> Vec<CoilNumber> {
        let coils = self.coils.lock().unwrap_or_else(PoisonError::into_inner);
        let mut numbers: Vec<_> = coils.keys().cloned().collect();
        numbers.sort();
        numbers
    }

    async fn acquire(&self, number: &CoilNumber) -> Result<OwnedMutexGuard<Coil>, PinHubError> {
        let slot = self.slot(number);
        match self.policy {
            CommandPolicy::Queue => Ok(slot.lock_owned().await),
            CommandPolicy::Reject => slot.try_lock_owned().map_err(|_| {
                tracing::debug!(coil = %number, "rejecting command for busy coil");
                BusyError {
                    coil: number.clone(),
                }
                .into()
            }),
        }
    }

    fn slot(&self, number: &CoilNumber) -> Arc<Mutex<Coil>> {
        let mut coils = self.coils.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            coils
                .entry(number.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Coil::disabled(number.clone())))),
        )
    }

    fn existing_slot(&self, number: &CoilNumber) -> Option<Arc<Mutex<Coil>>> {
        let coils = self.coils.lock().unwrap_or_else(PoisonError::into_inner);
        coils.get(number).map(Arc::clone)
    }
}
