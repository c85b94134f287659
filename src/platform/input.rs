//! Keyboard state capture
//!
//! Key events arrive whenever the host delivers them; the frame loop asks for
//! one [`TickInput`] per simulation tick. Held actions are read from the set
//! of keys currently down. Jump is latched on the press and handed out once.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Logical actions the game understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    /// Start a new run (only meaningful once the run is over)
    Restart,
}

/// Key name to action mapping
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(String, Action)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: Vec::new(),
        };
        bindings.bind("a", Action::MoveLeft);
        bindings.bind("arrowleft", Action::MoveLeft);
        bindings.bind("d", Action::MoveRight);
        bindings.bind("arrowright", Action::MoveRight);
        bindings.bind("w", Action::Jump);
        bindings.bind(" ", Action::Jump);
        bindings.bind("arrowup", Action::Jump);
        bindings.bind("shift", Action::Dash);
        bindings.bind("enter", Action::Restart);
        bindings
    }
}

impl KeyBindings {
    /// Add a binding; key names are case-insensitive
    pub fn bind(&mut self, key: &str, action: Action) {
        self.bindings.push((key.to_lowercase(), action));
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        let key = key.to_lowercase();
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, action)| *action)
    }
}

/// Live keyboard state for one player
#[derive(Debug, Clone, Default)]
pub struct InputState {
    bindings: KeyBindings,
    /// Lower-cased names of keys currently down
    pressed: HashSet<String>,
    jump_latched: bool,
    restart_latched: bool,
}

impl InputState {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    /// Record a key press. Returns the bound action so the caller can
    /// suppress the browser's default handling for game keys.
    pub fn key_down(&mut self, key: &str, repeat: bool) -> Option<Action> {
        let action = self.bindings.action_for(key)?;
        self.pressed.insert(key.to_lowercase());

        if !repeat {
            match action {
                Action::Jump => self.jump_latched = true,
                Action::Restart => self.restart_latched = true,
                _ => {}
            }
        }
        Some(action)
    }

    pub fn key_up(&mut self, key: &str) {
        self.pressed.remove(&key.to_lowercase());
    }

    /// Forget everything (window lost focus, so key-ups may never arrive)
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.jump_latched = false;
        self.restart_latched = false;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.pressed
            .iter()
            .any(|key| self.bindings.action_for(key) == Some(action))
    }

    /// Input for the next tick. Consumes a pending jump press.
    pub fn snapshot(&mut self) -> TickInput {
        TickInput {
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
            jump: std::mem::take(&mut self.jump_latched),
            dash: self.is_held(Action::Dash),
        }
    }

    /// Consume a pending restart press
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_latched)
    }
}
