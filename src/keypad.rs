//! Shared 16-key keypad state, decayed by the interpreter and written by the
//! blocking reader thread.
//!
//! A freshly pressed key is given a decay counter of [`DECAY_TICKS`] rather than
//! a simple boolean. Ticking it down once per instruction cycle turns a
//! transient key-down byte from an unbuffered raw terminal into a "held" signal
//! that survives many interpreter cycles (~100ms at the 500Hz default clock),
//! papering over the key-up events raw terminals never deliver. The exact
//! value `DECAY_TICKS` doubles as the "freshly pressed, not yet consumed"
//! sentinel that `Fx0A` looks for.

use std::sync::Mutex;

pub const NUM_KEYS: usize = 16;
pub const DECAY_TICKS: u8 = 50;

pub struct Keypad {
    keys: Mutex<[u8; NUM_KEYS]>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys: Mutex::new([0; NUM_KEYS]),
        }
    }

    /// Mark `idx` as freshly pressed. Called by the reader thread.
    pub fn set_pressed(&self, idx: u8) {
        let idx = (idx & 0x0F) as usize;
        let mut keys = self.keys.lock().unwrap();
        keys[idx] = DECAY_TICKS;
    }

    /// Decrement every positive slot by one. Called exactly once per
    /// instruction cycle by the Cycle Driver.
    pub fn tick_decay(&self) {
        let mut keys = self.keys.lock().unwrap();
        for key in keys.iter_mut() {
            if *key > 0 {
                *key -= 1;
            }
        }
    }

    pub fn is_pressed(&self, idx: u8) -> bool {
        let idx = (idx & 0x0F) as usize;
        self.keys.lock().unwrap()[idx] > 0
    }

    pub fn is_not_pressed(&self, idx: u8) -> bool {
        !self.is_pressed(idx)
    }

    /// Returns the lowest key index whose decay counter is still exactly
    /// `DECAY_TICKS` — i.e. pressed this very tick and not yet observed by a
    /// "wait for key" instruction.
    pub fn consume_newly_pressed(&self) -> Option<u8> {
        let keys = self.keys.lock().unwrap();
        keys.iter()
            .position(|&v| v == DECAY_TICKS)
            .map(|idx| idx as u8)
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_press_is_visible_and_consumable() {
        let kp = Keypad::new();
        assert!(kp.is_not_pressed(5));
        kp.set_pressed(5);
        assert!(kp.is_pressed(5));
        assert_eq!(kp.consume_newly_pressed(), Some(5));
    }

    #[test]
    fn decay_eventually_releases_the_key() {
        let kp = Keypad::new();
        kp.set_pressed(0xA);
        for _ in 0..DECAY_TICKS {
            kp.tick_decay();
        }
        assert!(kp.is_not_pressed(0xA));
    }

    #[test]
    fn consume_newly_pressed_only_matches_the_fresh_tick() {
        let kp = Keypad::new();
        kp.set_pressed(3);
        kp.tick_decay();
        // No longer exactly DECAY_TICKS, so it reads as "held" but not "fresh".
        assert!(kp.is_pressed(3));
        assert_eq!(kp.consume_newly_pressed(), None);
    }

    #[test]
    fn lowest_index_wins_when_several_keys_are_fresh() {
        let kp = Keypad::new();
        kp.set_pressed(7);
        kp.set_pressed(2);
        assert_eq!(kp.consume_newly_pressed(), Some(2));
    }

    #[test]
    fn out_of_range_index_is_masked_to_four_bits() {
        let kp = Keypad::new();
        kp.set_pressed(0xFF);
        assert!(kp.is_pressed(0x0F));
    }
}
