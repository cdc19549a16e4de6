//! The keyboard state and the stop request, both are shared between the
//! thread running the chip and the callers.
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use parking_lot::{Condvar, Mutex};

use crate::{definitions::keyboard, InputError};

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Debug, Default)]
struct Keys {
    pressed: [bool; keyboard::SIZE],
    /// The last key that was pressed
    last: Option<u8>,
    /// Counts all the key presses, used to detect a press
    /// that happened after a wait started.
    presses: u64,
}

#[derive(Debug, Default)]
struct Shared {
    keys: Mutex<Keys>,
    key_event: Condvar,
    stopped: AtomicBool,
}

/// A cheap to clone handle to the keyboard and the stop request.
#[derive(Debug, Clone, Default)]
pub struct Input {
    shared: Arc<Shared>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Will mark the key as down and wake up a pending wait for a key press.
    pub fn key_pressed(&self, key: u8) -> Result<(), InputError> {
        let index = Self::check(key)?;
        let mut keys = self.shared.keys.lock();
        keys.pressed[index] = true;
        keys.last = Some(key);
        keys.presses = keys.presses.wrapping_add(1);
        self.shared.key_event.notify_all();
        Ok(())
    }

    /// Will mark the key as up.
    pub fn key_released(&self, key: u8) -> Result<(), InputError> {
        let index = Self::check(key)?;
        self.shared.keys.lock().pressed[index] = false;
        Ok(())
    }

    /// Checks if the key is currently down, keys outside of `0x0-0xF` are never down.
    pub fn is_pressed(&self, key: u8) -> bool {
        let keys = self.shared.keys.lock();
        keys.pressed
            .get(key as usize)
            .copied()
            .unwrap_or(false)
    }

    /// The last key that was pressed
    pub fn last_pressed(&self) -> Option<u8> {
        self.shared.keys.lock().last
    }

    /// Will block until a key is pressed after this call started, and return that key.
    ///
    /// Returns `None` if a stop was requested before (or while) waiting.
    pub fn wait_for_key(&self) -> Option<u8> {
        let mut keys = self.shared.keys.lock();
        let start = keys.presses;
        loop {
            if self.is_stop_requested() {
                return None;
            }
            if keys.presses != start {
                return keys.last;
            }
            self.shared.key_event.wait(&mut keys);
        }
    }

    /// Will request the execution to stop, this will wake up a pending wait for a key press.
    pub fn request_stop(&self) {
        self.shared.stopped.store(true, Ordering::SeqCst);
        // the lock makes sure that a waiter is either before its stop check or
        // already waiting, so it can not miss this notification
        let _keys = self.shared.keys.lock();
        self.shared.key_event.notify_all();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.shared.stopped.load(Ordering::SeqCst)
    }

    fn check(key: u8) -> Result<usize, InputError> {
        let index = key as usize;
        if index < keyboard::SIZE {
            Ok(index)
        } else {
            Err(InputError::InvalidKey(key))
        }
    }
}
