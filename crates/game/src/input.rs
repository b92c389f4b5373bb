//! Keyboard input state.

use std::collections::HashSet;

/// Directions held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Held keys, keyed by lower-cased `KeyboardEvent.key` values.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a keydown (`down = true`) or keyup.
    pub fn set(&mut self, key: &str, down: bool) {
        let key = key.to_lowercase();
        if down {
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }

    /// Forget every held key (window blur, teardown).
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// WASD and arrow keys.
    pub fn controls(&self) -> Controls {
        Controls {
            up: self.is_held("w") || self.is_held("arrowup"),
            down: self.is_held("s") || self.is_held("arrowdown"),
            left: self.is_held("a") || self.is_held("arrowleft"),
            right: self.is_held("d") || self.is_held("arrowright"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows() {
        let mut keys = KeyState::new();
        keys.set("W", true);
        keys.set("ArrowLeft", true);
        let controls = keys.controls();
        assert!(controls.up && controls.left);
        assert!(!controls.down && !controls.right);
    }

    #[test]
    fn test_keyup_releases() {
        let mut keys = KeyState::new();
        keys.set("d", true);
        keys.set("D", false);
        assert_eq!(keys.controls(), Controls::default());
    }

    #[test]
    fn test_release_all() {
        let mut keys = KeyState::new();
        keys.set("s", true);
        keys.set("arrowright", true);
        keys.release_all();
        assert_eq!(keys.controls(), Controls::default());
    }
}
