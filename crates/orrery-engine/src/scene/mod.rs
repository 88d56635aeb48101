pub mod belt;
pub mod bodies;
pub mod guides;
pub mod sun;
pub mod system;

pub use belt::{AsteroidField, AsteroidParticle};
pub use bodies::{BodyState, MoonState, RingState};
pub use guides::GuideBuffer;
pub use system::SolarSystem;
