//! Selection state: nothing, one body, or one moon. Never both.

use serde::Serialize;

use crate::catalog::{Catalog, CelestialBody, Moon};

/// Index of a body in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyRef(pub usize);

/// A moon, addressed by its parent's catalog index and its own position
/// in the parent's moon list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoonRef {
    pub body: usize,
    pub moon: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Body(BodyRef),
    Moon(MoonRef),
}

/// What the info panel receives on every selection change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum SelectionRecord {
    Idle,
    Body { body: CelestialBody },
    Moon { moon: Moon, parent: CelestialBody },
}

/// Owns the current selection and remembers whether it changed since the
/// last `take_change`.
#[derive(Debug, Default)]
pub struct SelectionController {
    current: Selection,
    changed: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Selection {
        self.current
    }

    /// Select a body by id. Unknown ids fall back to `Idle`.
    pub fn select_body(&mut self, catalog: &Catalog, id: &str) -> Selection {
        match catalog.find_body(id) {
            Some((index, _)) => self.select(Selection::Body(BodyRef(index))),
            None => {
                log::warn!("selection: unknown body {:?}", id);
                self.clear()
            }
        }
    }

    /// Select a moon under a named parent. A moon id that does not belong
    /// to that parent falls back to `Idle`.
    pub fn select_moon(&mut self, catalog: &Catalog, moon_id: &str, parent_id: &str) -> Selection {
        match catalog.find_moon(parent_id, moon_id) {
            Some((body, moon)) => self.select(Selection::Moon(MoonRef { body, moon })),
            None => {
                log::warn!("selection: unknown moon {:?} under {:?}", moon_id, parent_id);
                self.clear()
            }
        }
    }

    pub fn select(&mut self, selection: Selection) -> Selection {
        if self.current != selection {
            log::debug!("selection: {:?} -> {:?}", self.current, selection);
            self.current = selection;
            self.changed = true;
        }
        self.current
    }

    pub fn clear(&mut self) -> Selection {
        self.select(Selection::Idle)
    }

    /// True once after each actual change.
    pub fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn is_selected_body(&self, index: usize) -> bool {
        self.current == Selection::Body(BodyRef(index))
    }

    pub fn is_selected_moon(&self, body: usize, moon: usize) -> bool {
        self.current == Selection::Moon(MoonRef { body, moon })
    }

    /// Resolve the current selection into full catalog records.
    pub fn record(&self, catalog: &Catalog) -> SelectionRecord {
        match self.current {
            Selection::Idle => SelectionRecord::Idle,
            Selection::Body(BodyRef(index)) => match catalog.body(index) {
                Some(body) => SelectionRecord::Body { body: body.clone() },
                None => SelectionRecord::Idle,
            },
            Selection::Moon(MoonRef { body, moon }) => {
                match (catalog.body(body), catalog.moon(body, moon)) {
                    (Some(parent), Some(moon)) => SelectionRecord::Moon {
                        moon: moon.clone(),
                        parent: parent.clone(),
                    },
                    _ => SelectionRecord::Idle,
                }
            }
        }
    }
}
