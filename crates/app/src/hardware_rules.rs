//! Hardware rule table — switch → coil bindings evaluated on the switch fast path.
//!
//! The table has its own lock and shares nothing with the coil controller,
//! so evaluating rules never waits on a slow coil command.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use pinhub_domain::error::NotFoundError;
use pinhub_domain::id::{CoilNumber, SwitchNumber};
use pinhub_domain::rule::{HardwareRule, RuleKey};

/// Active hardware rules, indexed by switch then coil.
#[derive(Default)]
pub struct HardwareRuleTable {
    rules: RwLock<BTreeMap<SwitchNumber, BTreeMap<CoilNumber, HardwareRule>>>,
}

impl HardwareRuleTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rule for its (switch, coil) pair.
    ///
    /// Replacement happens under one write lock, so an evaluation sees
    /// either the old rule or the new one, never both.
    /// Returns the rule it replaced, if any.
    pub fn configure(&self, rule: HardwareRule) -> Option<HardwareRule> {
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        rules
            .entry(rule.switch_number.clone())
            .or_default()
            .insert(rule.coil_number.clone(), rule)
    }

    /// Delete the rule for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] if no such rule exists.
    pub fn remove(&self, key: &RuleKey) -> Result<HardwareRule, NotFoundError> {
        let mut rules = self.rules.write().unwrap_or_else(PoisonError::into_inner);
        let per_switch = rules.get_mut(&key.switch_number);
        let removed = per_switch.and_then(|coils| coils.remove(&key.coil_number));
        if rules
            .get(&key.switch_number)
            .is_some_and(BTreeMap::is_empty)
        {
            rules.remove(&key.switch_number);
        }
        removed.ok_or_else(|| NotFoundError {
            entity: "HardwareRule",
            id: key.to_string(),
        })
    }

    /// Rules to fire for a transition of `switch` to `is_active`.
    ///
    /// Empty for releases and for switches without rules. Ordered by coil.
    #[must_use]
    pub fn evaluate(&self, switch: &SwitchNumber, is_active: bool) -> Vec<HardwareRule> {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        rules
            .get(switch)
            .map(|coils| {
                coils
                    .values()
                    .filter(|rule| rule.fires_on(is_active))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every configured rule, ordered by (switch, coil).
    #[must_use]
    pub fn list(&self) -> Vec<HardwareRule> {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        rules.values().flat_map(BTreeMap::values).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let rules = self.rules.read().unwrap_or_else(PoisonError::into_inner);
        rules.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
