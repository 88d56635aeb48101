pub mod picking;
pub mod queue;
pub mod selection;

pub use picking::{pick_nearest, PickSphere, Ray};
pub use queue::{ControlEvent, ControlQueue};
pub use selection::{BodyRef, MoonRef, Selection, SelectionController, SelectionRecord};
