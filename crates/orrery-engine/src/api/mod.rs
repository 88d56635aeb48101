pub mod config;
pub mod sim;
pub mod types;

pub use config::EngineConfig;
pub use sim::{FrameContext, SceneResources, SimEvent, Simulation};
pub use types::{EntityId, IdAllocator};
