//! Input accumulation between ticks
//!
//! Hosts deliver pointer and key events whenever they arrive. `InputState`
//! folds them into the per-tick [`TickInput`]: held state persists, edge
//! events ("pressed this frame") are cleared once a tick has consumed them.

use glam::Vec2;

use crate::sim::{Key, TickInput};

#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: TickInput,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.current.pointer = Some(pos);
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.current.pointer = Some(pos);
        self.current.pointer_down = true;
        self.current.pointer_pressed = true;
    }

    pub fn pointer_up(&mut self) {
        self.current.pointer_down = false;
    }

    pub fn key_down(&mut self, key: Key) {
        // Ignore auto-repeat
        if !self.current.held(key) {
            self.current.keys_pressed.push(key);
            self.current.keys_held.push(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.current.keys_held.retain(|k| *k != key);
    }

    /// Input for the next tick; edge events are consumed
    pub fn take(&mut self) -> TickInput {
        let input = self.current.clone();
        self.current.pointer_pressed = false;
        self.current.keys_pressed.clear();
        input
    }

    /// Drop everything (focus lost)
    pub fn clear(&mut self) {
        let pointer = self.current.pointer;
        self.current = TickInput {
            pointer,
            ..Default::default()
        };
    }
}
