// Key binding table and key event translation

use super::action::{default_bindings, Action};
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps physical keys to runner actions
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Mapping from keys to actions
    bindings: HashMap<KeyCode, Action>,

    /// Reverse mapping for quick lookups (action -> all keys)
    action_to_keys: HashMap<Action, Vec<KeyCode>>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Create a configuration from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::new();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Bind a key to an action, replacing the key's previous action
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.unbind_key(key);
        self.bindings.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.bindings.remove(&key) {
            if let Some(keys) = self.action_to_keys.get_mut(&action) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.action_to_keys.remove(&action);
                }
            }
        }
    }

    /// Get the action bound to a key
    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Get all keys bound to an action
    pub fn get_keys(&self, action: Action) -> Vec<KeyCode> {
        self.action_to_keys
            .get(&action)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.action_to_keys.contains_key(&action)
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::from_bindings(default_bindings());
    }

    /// Translate a raw key transition into an action.
    ///
    /// Only fresh key-down events count; releases, auto-repeats and
    /// unmapped keys yield `None`.
    pub fn translate(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> Option<Action> {
        if state != ElementState::Pressed || repeat {
            return None;
        }
        match key {
            PhysicalKey::Code(code) => self.get_action(code),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Translate a winit keyboard event into an action
    pub fn process_keyboard_event(&self, event: &KeyEvent) -> Option<Action> {
        self.translate(event.physical_key, event.state, event.repeat)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
