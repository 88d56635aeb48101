use crate::input::picking::Ray;

/// Control input the UI layer can send. All setters are synchronous; they
/// are queued between frames and applied at the start of the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SetTimeScale(f64),
    SetPaused(bool),
    TogglePause,
    ShowOrbits(bool),
    /// Clear the selection and ask the camera to return home.
    ResetView,
    SelectBody(String),
    SelectMoon { moon: String, parent: String },
    /// Close the info panel.
    ClearSelection,
    /// Pointer click, already unprojected into a world-space ray.
    Pick(Ray),
}

/// A queue of control events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct ControlQueue {
    events: Vec<ControlEvent>,
}

impl ControlQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for ControlQueue {
    fn default() -> Self {
        Self::new()
    }
}
