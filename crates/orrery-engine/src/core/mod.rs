pub mod clock;
pub mod integrator;
pub mod rng;

pub use clock::{ClockSnapshot, ControlError, SimulationClock};
pub use integrator::{advance, advance_rate, wrap_angle, Calibration, Period};
pub use rng::{RandomSource, Rng};
