use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use crate::{
    chip8::ChipSet,
    definitions::{cpu, timer},
    input::Input,
    timer::{TimedWorker, Timers, Worker},
    InputError, ProcessError,
};

/// The runtime configuration of the [`Chip8`] runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// The minimum time a single opcode takes, `None` runs as fast as possible.
    pub cpu_interval: Option<Duration>,
    /// The time between two timer ticks.
    pub timer_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cpu_interval: Some(Duration::from_millis(cpu::INTERVAL)),
            timer_interval: Duration::from_nanos(timer::INTERVAL),
        }
    }
}

impl Config {
    /// The opcodes run as fast as possible, the timers keep their rate.
    pub fn unthrottled() -> Self {
        Self {
            cpu_interval: None,
            ..Default::default()
        }
    }
}

/// Why the instruction loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// [`Chip8::stop`] (or [`Input::request_stop`]) was called.
    Requested,
    /// The program counter left the memory, this is how a program ends.
    ProgramCounterOutOfRange { pc: usize },
    /// An opcode could not be executed.
    Fault(ProcessError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Created but not started yet.
    Ready,
    Running,
    /// The instruction loop has ended, this is final.
    Stopped,
}

type RunHandle = JoinHandle<(ChipSet, StopReason)>;

/// Runs a [`ChipSet`] on its own thread, while a [`TimedWorker`] counts the timers down.
///
/// ```rust,no_run
/// # use chip::{chip8::ChipSet, devices::FrameBuffer, Chip8, StopReason};
/// let mut chipset = ChipSet::new(|frame: &FrameBuffer| println!("{:?}", frame));
/// // clear the screen and jump back to the start
/// chipset.load_program(&[0x00, 0xE0, 0x12, 0x00]).unwrap();
///
/// let mut chip = Chip8::new(chipset);
/// chip.start();
/// chip.key_pressed(0x4).unwrap();
/// chip.stop();
/// assert_eq!(chip.join(), Some(StopReason::Requested));
/// ```
pub struct Chip8<W: TimedWorker = Worker> {
    /// The chipset, it is only here while the instruction loop is not running.
    chipset: Option<ChipSet>,
    config: Config,
    input: Input,
    timers: Timers,
    /// Counts the timers down.
    worker: W,
    thread: Option<RunHandle>,
    reason: Option<StopReason>,
}

impl Chip8 {
    /// Will create a new runner, with the default configuration.
    pub fn new(chipset: ChipSet) -> Self {
        Self::with_config(chipset, Config::default())
    }

    pub fn with_config(chipset: ChipSet, config: Config) -> Self {
        Self::with_worker(chipset, config, Worker::new())
    }
}

impl<W: TimedWorker> Chip8<W> {
    /// Will create a new runner, using the given worker for the timers.
    pub fn with_worker(chipset: ChipSet, config: Config, worker: W) -> Self {
        Self {
            input: chipset.input().clone(),
            timers: chipset.timers().clone(),
            chipset: Some(chipset),
            config,
            worker,
            thread: None,
            reason: None,
        }
    }

    /// Will start the instruction loop and the timers, this does nothing if
    /// the chip was started already.
    pub fn start(&mut self) {
        let mut chipset = match self.chipset.take() {
            Some(chipset) if self.reason.is_none() => chipset,
            chipset => {
                self.chipset = chipset;
                log::debug!("The chip was started already.");
                return;
            }
        };

        log::info!("Starting the chip.");

        let timers = self.timers.clone();
        let input = self.input.clone();
        self.worker.start(
            move || {
                if !input.is_stop_requested() {
                    timers.tick();
                }
            },
            self.config.timer_interval,
        );

        let config = self.config;
        let input = self.input.clone();
        let timers = self.timers.clone();
        self.thread = Some(thread::spawn(move || {
            let reason = chipset.run(&config);
            log::info!("The chip stopped: {:?}", reason);
            // also stops the timers
            input.request_stop();
            // the timers no longer tick, so a running tone has to end here
            timers.set_sound(0);
            (chipset, reason)
        }));
    }

    /// Will request the instruction loop to stop, a pending wait for a key press included.
    pub fn stop(&mut self) {
        if self.state() != EngineState::Running {
            log::debug!("The chip is not running, nothing to stop.");
            return;
        }
        log::info!("Stopping the chip.");
        self.input.request_stop();
    }

    /// Will wait until the instruction loop ended and return why it did. Returns `None`
    /// if the chip was never started.
    ///
    /// # Panics
    /// If the instruction loop panicked, the panic is passed on.
    pub fn join(&mut self) -> Option<StopReason> {
        if let Some(thread) = self.thread.take() {
            match thread.join() {
                Ok((chipset, reason)) => {
                    self.chipset = Some(chipset);
                    self.reason = Some(reason);
                }
                Err(err) => {
                    self.worker.stop();
                    std::panic::resume_unwind(err);
                }
            }
            self.worker.stop();
        }
        self.reason.clone()
    }

    pub fn state(&self) -> EngineState {
        match (&self.thread, &self.reason) {
            (_, Some(_)) => EngineState::Stopped,
            (Some(thread), None) if thread.is_finished() => EngineState::Stopped,
            (Some(_), None) => EngineState::Running,
            (None, None) => EngineState::Ready,
        }
    }

    /// The chipset, this is only available before the start and after the join.
    pub fn chipset(&self) -> Option<&ChipSet> {
        self.chipset.as_ref()
    }

    /// A handle to the keyboard, so that the keys can be set from anywhere.
    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn key_pressed(&self, key: u8) -> Result<(), InputError> {
        self.input.key_pressed(key)
    }

    pub fn key_released(&self, key: u8) -> Result<(), InputError> {
        self.input.key_released(key)
    }

    /// will return the delay timer
    pub fn delay_timer(&self) -> u8 {
        self.timers.delay()
    }

    /// will return the sound timer
    pub fn sound_timer(&self) -> u8 {
        self.timers.sound()
    }
}

impl<W: TimedWorker> Drop for Chip8<W> {
    fn drop(&mut self) {
        self.input.request_stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The chip thread panicked.");
            }
        }
        self.worker.stop();
    }
}
