//! Device inventory — the machine's named hardware, grouped by kind.
//!
//! Devices are declared up front from configuration or at runtime through
//! the facade. Registering a name that already exists replaces it.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use pinhub_domain::device::{Device, DeviceKind, normalize};
use pinhub_domain::rpc::DeviceQuery;

/// Named devices, indexed by kind then name.
#[derive(Default)]
pub struct DeviceInventory {
    devices: RwLock<BTreeMap<DeviceKind, BTreeMap<String, Device>>>,
}

impl DeviceInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the device with the same kind and name.
    ///
    /// Returns the device it replaced, if any.
    pub fn register(&self, device: Device) -> Option<Device> {
        let mut devices = self.devices.write().unwrap_or_else(PoisonError::into_inner);
        devices
            .entry(device.kind)
            .or_default()
            .insert(device.name.clone(), device)
    }

    /// Look a device up by name, ignoring case.
    #[must_use]
    pub fn get(&self, kind: DeviceKind, name: &str) -> Option<Device> {
        let devices = self.devices.read().unwrap_or_else(PoisonError::into_inner);
        devices
            .get(&kind)
            .and_then(|named| named.get(&normalize(name)))
            .cloned()
    }

    /// First device of `kind`, by name order, bound to `number`.
    #[must_use]
    pub fn find_by_number(&self, kind: DeviceKind, number: &str) -> Option<Device> {
        let devices = self.devices.read().unwrap_or_else(PoisonError::into_inner);
        devices
            .get(&kind)
            .and_then(|named| named.values().find(|device| device.number == number))
            .cloned()
    }

    /// Devices of `kind` carrying `tag`, ordered by name.
    #[must_use]
    pub fn tagged(&self, kind: DeviceKind, tag: &str) -> Vec<Device> {
        self.query(&DeviceQuery {
            kind: Some(kind),
            tag: Some(tag.to_string()),
            number: None,
        })
    }

    /// Devices matching every filter in `query`, ordered by kind then name.
    #[must_use]
    pub fn query(&self, query: &DeviceQuery) -> Vec<Device> {
        let devices = self.devices.read().unwrap_or_else(PoisonError::into_inner);
        devices
            .iter()
            .filter(|(kind, _)| query.kind.is_none_or(|wanted| wanted == **kind))
            .flat_map(|(_, named)| named.values())
            .filter(|device| query.tag.as_deref().is_none_or(|tag| device.has_tag(tag)))
            .filter(|device| {
                query
                    .number
                    .as_deref()
                    .is_none_or(|number| device.number == number)
            })
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        let devices = self.devices.read().unwrap_or_else(PoisonError::into_inner);
        devices.values().map(BTreeMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
