//! The interfaces to the outside world, the display and the sound.
use std::fmt;

use crate::definitions::display;

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. This is stored as rows of pixels that are either on or off.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    rows: [[bool; display::WIDTH]; display::HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            rows: [[false; display::WIDTH]; display::HEIGHT],
        }
    }
}

impl FrameBuffer {
    /// Will create an empty (all off) frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Will return the pixel in column `x` and row `y`.
    ///
    /// # Panics
    /// If the coordinates are outside of the display.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows[y][x]
    }

    /// Will flip the given pixel and return `true` if it was on before.
    pub(crate) fn toggle(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.rows[y][x];
        let was_set = *pixel;
        *pixel = !was_set;
        was_set
    }

    /// All the rows from top to bottom
    pub fn rows(&self) -> &[[bool; display::WIDTH]] {
        &self.rows
    }

    /// Checks if there is no pixel set
    pub fn is_clear(&self) -> bool {
        self.rows.iter().flatten().all(|pixel| !pixel)
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "FrameBuffer {{")?;
        for row in self.rows.iter() {
            let line: String = row
                .iter()
                .map(|pixel| if *pixel { '#' } else { '.' })
                .collect();
            writeln!(f, "\t{}", line)?;
        }
        write!(f, "}}")
    }
}

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands: Send {
    /// Will be called with the current frame every time the frame changed
    /// (draw or clear). The call should return quickly, as it holds up
    /// the execution of the following opcodes.
    fn display(&mut self, frame: &FrameBuffer);
}

impl<F> DisplayCommands for F
where
    F: FnMut(&FrameBuffer) + Send,
{
    fn display(&mut self, frame: &FrameBuffer) {
        self(frame)
    }
}

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the sound, the chip only tells when the
/// tone has to start and when it has to stop.
pub trait SoundCommands: Send {
    /// The sound timer went from zero to a value above zero.
    fn start_tone(&mut self);
    /// The sound timer went back to zero.
    fn stop_tone(&mut self);
}

/// Will ignore all the sound commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSound;

impl SoundCommands for NoSound {
    fn start_tone(&mut self) {}

    fn stop_tone(&mut self) {}
}
