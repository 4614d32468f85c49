//! Latched keyboard state.
//!
//! The latch records which keys are physically down right now; screens query
//! it with `is_held` from inside their fixed update step. Press/release
//! events may arrive at any point between frames, but queries only happen on
//! the single loop thread, so a key can never change state mid-update.

use std::collections::HashSet;

use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    C,
    Digit1,
    Digit2,
}

impl Key {
    /// Keys whose default behavior a host embedding (browser, terminal)
    /// should suppress while the game owns the keyboard. The winit driver
    /// has no default behavior to cancel, so it ignores this.
    pub fn suppresses_host_default(self) -> bool {
        matches!(
            self,
            Key::Space | Key::Enter | Key::Left | Key::Right | Key::Up | Key::Down
        )
    }
}

/// Maps a physical key position to the latch's key set. Keys the screens
/// never consume map to `None` and are dropped at the event boundary.
pub fn key_from_physical(key: PhysicalKey) -> Option<Key> {
    match key {
        PhysicalKey::Code(KeyCode::Space) => Some(Key::Space),
        PhysicalKey::Code(KeyCode::Enter) => Some(Key::Enter),
        PhysicalKey::Code(KeyCode::Escape) => Some(Key::Escape),
        PhysicalKey::Code(KeyCode::ArrowLeft) => Some(Key::Left),
        PhysicalKey::Code(KeyCode::ArrowRight) => Some(Key::Right),
        PhysicalKey::Code(KeyCode::ArrowUp) => Some(Key::Up),
        PhysicalKey::Code(KeyCode::ArrowDown) => Some(Key::Down),
        PhysicalKey::Code(KeyCode::KeyW) => Some(Key::W),
        PhysicalKey::Code(KeyCode::KeyA) => Some(Key::A),
        PhysicalKey::Code(KeyCode::KeyS) => Some(Key::S),
        PhysicalKey::Code(KeyCode::KeyD) => Some(Key::D),
        PhysicalKey::Code(KeyCode::KeyC) => Some(Key::C),
        PhysicalKey::Code(KeyCode::Digit1) => Some(Key::Digit1),
        PhysicalKey::Code(KeyCode::Digit2) => Some(Key::Digit2),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct InputLatch {
    held: HashSet<Key>,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key` as held. Idempotent; repeat events from key auto-repeat
    /// collapse into the existing entry.
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    /// Clears `key`. Releasing a key that was never pressed is a no-op.
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drops every held entry. Used when the window loses focus, since the
    /// matching release events will never arrive.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}
