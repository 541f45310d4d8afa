//! Switch registry — last known state of every switch.
//!
//! Accepting a transition is the hot path: update the switch, fire its
//! hardware rules, then publish the change. Reports for one switch hold
//! that switch's lock across all three steps, so its events come out in
//! report order. Reports for different switches never wait on each other.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError};

use tokio::sync::Mutex;

use pinhub_domain::error::PinHubError;
use pinhub_domain::id::SwitchNumber;
use pinhub_domain::rpc::SwitchTransition;
use pinhub_domain::switch::Switch;

use crate::coil_controller::CoilController;
use crate::hardware_rules::HardwareRuleTable;
use crate::ports::Actuator;
use crate::switch_stream::SwitchChangeStream;

pub struct SwitchRegistry<A> {
    switches: std::sync::Mutex<BTreeMap<SwitchNumber, Arc<Mutex<Switch>>>>,
    rules: Arc<HardwareRuleTable>,
    coils: Arc<CoilController<A>>,
    stream: Arc<SwitchChangeStream>,
}

impl<A> SwitchRegistry<A>
where
    A: Actuator + Send + Sync,
{
    pub fn new(
        rules: Arc<HardwareRuleTable>,
        coils: Arc<CoilController<A>>,
        stream: Arc<SwitchChangeStream>,
    ) -> Self {
        Self {
            switches: std::sync::Mutex::new(BTreeMap::new()),
            rules,
            coils,
            stream,
        }
    }

    /// Accept a transition reported by the switch source.
    ///
    /// Returns whether the switch actually changed. A repeat of the current
    /// state records the timestamp and does nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`PinHubError::StaleEvent`] when the timestamp is older than
    /// the last accepted report for the switch.
    pub async fn report_transition(
        &self,
        transition: &SwitchTransition,
    ) -> Result<bool, PinHubError> {
        let slot = self.slot(&transition.switch_number);
        let mut switch = slot.lock().await;

        let changed = switch
            .apply(transition.is_active, transition.timestamp)
            .inspect_err(|err| {
                tracing::warn!(
                    switch = %err.switch,
                    timestamp = err.timestamp,
                    last_accepted = err.last_accepted,
                    "dropping stale switch report"
                );
            })?;
        if !changed {
            tracing::trace!(switch = %transition.switch_number, "repeated switch state ignored");
            return Ok(false);
        }

        for rule in self
            .rules
            .evaluate(&transition.switch_number, transition.is_active)
        {
            if let Err(err) = self.coils.fire_rule(&rule).await {
                tracing::error!(rule = %rule.key(), error = %err, "hardware rule failed to fire");
            }
        }

        let event = self.stream.publish(
            transition.switch_number.clone(),
            transition.is_active,
            transition.timestamp,
        );
        tracing::debug!(
            switch = %event.switch_number,
            is_active = event.is_active,
            sequence = event.sequence,
            "switch changed"
        );
        Ok(true)
    }

    /// Last known state of `number`. Querying an unknown switch registers
    /// it as inactive.
    pub async fn state(&self, number: &SwitchNumber) -> Switch {
        self.slot(number).lock().await.clone()
    }

    /// Make sure `number` has an entry, without reporting anything.
    pub fn touch(&self, number: &SwitchNumber) {
        let _ = self.slot(number);
    }

    /// Every known switch, ordered by number.
    pub async fn snapshot(&self) -> Vec<Switch> {
        let slots: Vec<_> = {
            let switches = self.switches.lock().unwrap_or_else(PoisonError::into_inner);
            switches.values().map(Arc::clone).collect()
        };
        let mut snapshot = Vec::with_capacity(slots.len());
        for slot in slots {
            snapshot.push(slot.lock().await.clone());
        }
        snapshot
    }

    fn slot(&self, number: &SwitchNumber) -> Arc<Mutex<Switch>> {
        let mut switches = self.switches.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            switches
                .entry(number.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Switch::inactive(number.clone())))),
        )
    }
}
