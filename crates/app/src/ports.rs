//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the core components and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod actuator;
pub mod clock;

pub use actuator::Actuator;
pub use clock::Clock;
