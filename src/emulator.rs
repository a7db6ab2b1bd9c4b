//! Assembles the machine, the shared keypad/quit flag, and a frontend's
//! collaborators into a running Cycle Driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use log::{error, info};

use crate::chip8::Chip8;
use crate::clock::Clock;
use crate::cycle_driver::CycleDriver;
use crate::driver::minifb::Minifb;
use crate::driver::{BeepSink, DisplaySink, FastrandSource, KeyReader};
use crate::error::{EmulatorError, EmulatorResult};
use crate::keypad::Keypad;

pub fn load_rom(path: &str) -> EmulatorResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| EmulatorError::RomIo {
        path: path.to_string(),
        source,
    })
}

/// Runs the two-thread model: a blocking reader thread feeds the shared
/// keypad while the interpreter thread drives the Cycle Driver. This is the
/// TUI frontend's path, and any other frontend whose `KeyReader` genuinely
/// blocks on I/O.
pub fn run_threaded(
    rom: &[u8],
    cycle_ns: u64,
    mut reader: impl KeyReader + Send + 'static,
    mut display: impl DisplaySink,
    mut beep: impl BeepSink,
) -> EmulatorResult<()> {
    let mut chip8 = Chip8::boot(rom)?;
    let keypad = Arc::new(Keypad::new());
    let quit = Arc::new(AtomicBool::new(false));
    let clock = Clock::new()?;
    let mut rng = FastrandSource;

    let reader_keypad = Arc::clone(&keypad);
    let reader_quit = Arc::clone(&quit);
    // Blocks on stdin reads; only checks `reader_quit` between keys, so a
    // fatal error on the interpreter side may leave this thread parked until
    // the user presses one more key. `read_mapped_key` returning `None`
    // (Esc/Ctrl-C/EOF) is the normal way this thread asks to quit.
    let reader_handle = thread::spawn(move || loop {
        if reader_quit.load(Ordering::Acquire) {
            return;
        }
        match reader.read_mapped_key() {
            Some(key) => reader_keypad.set_pressed(key),
            None => {
                reader_quit.store(true, Ordering::Release);
                return;
            }
        }
    });

    info!("booted ROM ({} bytes), entering cycle driver", rom.len());
    let mut driver = CycleDriver::new(cycle_ns);
    let result = driver.run(
        &mut chip8, &keypad, &quit, &clock, &mut rng, &mut display, &mut beep,
    );

    quit.store(true, Ordering::Release);
    let _ = reader_handle.join();

    match &result {
        Ok(()) => info!("shut down cleanly"),
        Err(err) => error!("fatal: {err}"),
    }
    result
}

/// Runs the single-threaded model used by the GUI frontend. `minifb::Window`
/// must be created, polled, and drawn from the thread that created it, so
/// there is no dedicated reader thread here: the window's own event pump and
/// key polling are interleaved directly with [`CycleDriver::tick`] instead of
/// the reader thread `run_threaded` hands that cadence off to. The pacing,
/// overrun check, and timer/keypad ticking are the same Cycle Driver code
/// `run_threaded` uses — only the outer polling differs.
pub fn run_gui(
    rom: &[u8],
    cycle_ns: u64,
    window: &mut Minifb,
    mut beep: impl BeepSink,
) -> EmulatorResult<()> {
    let mut chip8 = Chip8::boot(rom)?;
    let keypad = Keypad::new();
    let clock = Clock::new()?;
    let mut rng = FastrandSource;
    let mut driver = CycleDriver::new(cycle_ns);
    driver.start(&clock);

    info!("booted ROM ({} bytes), entering GUI cycle loop", rom.len());

    let result = loop {
        if !window.pump() {
            break Ok(());
        }
        for key in window.pressed_keys() {
            keypad.set_pressed(key);
        }

        if let Err(err) = driver.tick(&mut chip8, &keypad, &clock, &mut rng, window, &mut beep) {
            break Err(err);
        }
    };

    match &result {
        Ok(()) => info!("shut down cleanly"),
        Err(err) => error!("fatal: {err}"),
    }
    result
}
