//! # pinhub-domain
//!
//! Pure domain model for the pinhub pinball hardware-control platform.
//!
//! ## Responsibilities
//! - Foundational types: hardware numbers, unit-interval values, timestamps,
//!   error conventions
//! - Define **Switches** (binary sensors with timestamped transitions)
//! - Define **Coils** (solenoids driven by pulse/hold power)
//! - Define **Hardware rules** (switch → coil bindings fired locally)
//! - Define **Light channels** and their linear fades
//! - Define **Devices** (named, tagged handles onto hardware numbers)
//! - Define **Change events** streamed to subscribers
//! - Define the **wire messages** of the platform protocol and their validation
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;
pub mod unit;

pub mod coil;
pub mod device;
pub mod event;
pub mod light;
pub mod platform;
pub mod rpc;
pub mod rule;
pub mod switch;
