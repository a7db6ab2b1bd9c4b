//! Out-of-core collaborator interfaces.
//!
//! The decoder and cycle driver never touch a terminal, a window, or an audio
//! device directly — they call through these traits, so the interpreter core
//! stays free of blocking I/O and allocation (a `FrameOverrun` invariant) and
//! tests can substitute fakes. Concrete implementations (`termion`, `minifb`,
//! `rodio`, `ansiterm`) live in sibling modules.

pub mod ansiterm;
pub mod minifb;
pub mod rodio;
pub mod termion;

pub use crate::timers::BeepSink;

/// Presents a freshly rendered 64x32 1bpp framebuffer. Called by the Cycle
/// Driver only on the cycles where the Decoder reports the display changed
/// (`00E0`/`Dxyn`), not on every cycle.
pub trait DisplaySink {
    fn display_present(&mut self, framebuffer: &[u8; 256]);
}

/// Produces a uniform random byte for the `Cxkk` instruction. Seeding is the
/// collaborator's concern; the default `FastrandSource` seeds from the
/// process-global `fastrand` generator.
pub trait RandomSource {
    fn random_byte(&mut self) -> u8;
}

/// Yields a CHIP-8 key index in `[0, 16)` when a mapped physical key arrives.
/// Blocking is expected: this is consumed exclusively by the dedicated
/// reader thread, never by the interpreter thread.
pub trait KeyReader {
    fn read_mapped_key(&mut self) -> Option<u8>;
}

/// Default `RandomSource` backed by the process-global `fastrand` generator.
#[derive(Default)]
pub struct FastrandSource;

impl RandomSource for FastrandSource {
    fn random_byte(&mut self) -> u8 {
        fastrand::u8(..)
    }
}

/// A sink that discards everything; used for headless tests.
#[derive(Default)]
pub struct NullSink;

impl DisplaySink for NullSink {
    fn display_present(&mut self, _framebuffer: &[u8; 256]) {}
}

impl BeepSink for NullSink {
    fn beep_request(&mut self, _active: bool) {}
}

impl KeyReader for NullSink {
    fn read_mapped_key(&mut self) -> Option<u8> {
        None
    }
}
