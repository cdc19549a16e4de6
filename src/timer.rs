//! The delay and sound timers together with the worker that counts them down.
use {
    crate::devices::{NoSound, SoundCommands},
    parking_lot::Mutex,
    std::{
        sync::{
            mpsc::{self, RecvTimeoutError, SyncSender},
            Arc,
        },
        thread::{self, JoinHandle},
        time::{Duration, Instant},
    },
};

struct TimerState {
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    delay: u8,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    sound: u8,
    /// Gets told when the beeping has to start and stop.
    sound_commands: Box<dyn SoundCommands>,
}

/// Represents the two timers inside of the chip infrastructure, they count
/// down to zero from what ever number given at 60Hz.
///
/// Both the chip and the timer worker hold a handle, all the access is
/// behind a single lock so that a tick can never get lost.
#[derive(Clone)]
pub struct Timers {
    state: Arc<Mutex<TimerState>>,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new(NoSound)
    }
}

impl std::fmt::Debug for Timers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Timers")
            .field("delay", &state.delay)
            .field("sound", &state.sound)
            .finish()
    }
}

impl Timers {
    /// Will create the timers, both starting at zero.
    pub fn new<S: SoundCommands + 'static>(sound_commands: S) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState {
                delay: 0,
                sound: 0,
                sound_commands: Box::new(sound_commands),
            })),
        }
    }

    /// Will replace the receiver of the sound commands.
    pub fn set_sound_commands<S: SoundCommands + 'static>(&self, sound_commands: S) {
        self.state.lock().sound_commands = Box::new(sound_commands);
    }

    pub fn delay(&self) -> u8 {
        self.state.lock().delay
    }

    pub fn set_delay(&self, value: u8) {
        self.state.lock().delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.state.lock().sound
    }

    /// Will set the sound timer and start or stop the tone, if the timer
    /// changed between zero and non zero.
    pub fn set_sound(&self, value: u8) {
        let mut state = self.state.lock();
        let before = state.sound;
        state.sound = value;
        match (before, value) {
            (0, 0) => {}
            (0, _) => {
                log::debug!("starting tone");
                state.sound_commands.start_tone();
            }
            (_, 0) => {
                log::debug!("stopping tone");
                state.sound_commands.stop_tone();
            }
            _ => {}
        }
    }

    /// Will count both timers down by one, if they are not at zero already.
    pub fn tick(&self) {
        let mut state = self.state.lock();
        state.delay = state.delay.saturating_sub(1);
        if state.sound > 0 {
            state.sound -= 1;
            if state.sound == 0 {
                log::debug!("stopping tone");
                state.sound_commands.stop_tone();
            }
        }
    }
}

/// A worker that will call a callback in a fixed interval on an other thread (or what ever the
/// platform offers).
pub trait TimedWorker {
    fn new() -> Self;
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;
    fn stop(&mut self);
    fn is_alive(&self) -> bool;
}

/// Is the internal worker, that exists on the
/// second thread.
pub struct Worker {
    /// Contains the actuall thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefull shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the actuall threads used (this is never more then 2, but
    /// is simple to use.) It uses an ```()``` so that it doesn't use
    /// up too much memory.
    alive: Arc<()>,
}

impl TimedWorker for Worker {
    /// Will initialize the new worker.
    fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }

    /// Will start the worker that will run the callback function
    /// all duration.
    /// Attention the timer assumes the callback will finish
    /// calculation faster then the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // only a single thread per worker
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            // this is to count the references, as it will not actually
            // be used ```_``` is used in front of the name.
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        // run the callback function
                        callback();

                        // make sure there the system will at most wait the interval
                        timeout = interval.saturating_sub(start.elapsed());
                    }
                    Ok(_) | Err(_) => break, // shutdown
                }
            }
        });

        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    /// Will stop the worker.
    fn stop(&mut self) {
        // Will stop the worker, in two steps one by sending an empty message
        // and second by droping the only sender for the given receiver.
        if let Some(sender) = self.shutdown.take() {
            // the thread might be gone already, then there is nobody to tell
            let _ = sender.try_send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The timer worker thread panicked.");
            }
        }
    }

    /// Checks if the thread is alive.
    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    /// Will drop the worker
    fn drop(&mut self) {
        self.stop();
    }
}
