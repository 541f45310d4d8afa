//! # pinhub-app
//!
//! Application layer — the core hardware-control components and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Actuator` — fires coils on the physical or simulated playfield
//!   - `Clock` — monotonic milliseconds for fades
//! - Provide the core components:
//!   - `SwitchRegistry` — debounced switch state, rule evaluation, change events
//!   - `HardwareRuleTable` — switch → coil auto-fire rules
//!   - `CoilController` — per-coil command serialization
//!   - `LightFadeEngine` — per-channel linear fades
//!   - `SwitchChangeStream` — fan-out of change events to subscribers
//!   - `DeviceInventory` — named, tagged hardware with lookups by name, number and tag
//! - Compose them behind the `Platform` facade (driving/inbound port)
//!
//! ## Dependency rule
//! Depends on `pinhub-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod clock;
pub mod coil_controller;
pub mod device_inventory;
pub mod hardware_rules;
pub mod light_fade;
pub mod platform;
pub mod ports;
pub mod switch_registry;
pub mod switch_stream;
