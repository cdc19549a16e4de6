//! The source of the random bytes used by the `CXNN` opcode.
use rand::{rngs::OsRng, RngCore};

#[cfg_attr(test, mockall::automock)]
/// Produces one random byte per call, the chip only depends on this capability
/// so that it can be replaced for deterministic runs.
pub trait RandomSource: Send {
    fn next_byte(&mut self) -> u8;
}

/// Adapts any [`RngCore`] to a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: RngCore + Send> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl Default for RngSource<OsRng> {
    fn default() -> Self {
        Self(OsRng)
    }
}

impl<R: RngCore + Send> RandomSource for RngSource<R> {
    fn next_byte(&mut self) -> u8 {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.0.fill_bytes(&mut rand);
        rand[0]
    }
}
