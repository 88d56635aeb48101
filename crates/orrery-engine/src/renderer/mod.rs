pub mod instance;

pub use instance::{InstanceBuffer, InstanceKind, SceneInstance};
