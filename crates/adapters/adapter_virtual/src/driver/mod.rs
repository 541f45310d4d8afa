//! Simulated coil driver outputs.

mod coil;

pub use coil::{CoilDriver, DriverOutput};
