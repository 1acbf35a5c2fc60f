use serde::{Deserialize, Serialize};

/// Gameplay input the runner understands.
/// The host maps keys, buttons or swipes onto these before pushing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InputEvent {
    /// Move one lane towards index 0.
    ShiftLeft,
    /// Move one lane towards the last index.
    ShiftRight,
    Jump,
    /// Debug control: add `delta` to the run speed.
    NudgeSpeed { delta: f32 },
}

/// A queue of input events.
/// The host pushes edge-triggered events; the game reads them each tick and
/// the runner drains the queue after the update.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
