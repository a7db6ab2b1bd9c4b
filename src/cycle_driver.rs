//! Drift-corrected real-time loop driving one decoded instruction per tick.
//!
//! The deadline is kept as an absolute monotonic nanosecond value rather than
//! recomputed from a sleep duration each iteration, so OS scheduling jitter
//! never accumulates into long-run phase drift — only a missed-tick resync
//! (step 6) ever moves the deadline forward by more than one period.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, warn};

use crate::chip8::{Chip8, StepEffect};
use crate::clock::Clock;
use crate::driver::{BeepSink, DisplaySink, RandomSource};
use crate::error::{EmulatorError, EmulatorResult};
use crate::keypad::Keypad;

/// Default instruction clock: 500 Hz, i.e. one cycle every 2 ms.
pub const DEFAULT_CYCLE_NS: u64 = 2_000_000;

pub fn cycle_ns_for_hz(hz: u32) -> u64 {
    1_000_000_000 / hz as u64
}

/// Drives exactly one instruction cycle per [`CycleDriver::tick`] call, so
/// callers that need to interleave their own polling (a GUI event pump, a
/// reader thread's quit check) can drive the schedule without re-deriving
/// the overrun check, timer/keypad ticking, or missed-tick resync — there is
/// exactly one place that logic lives.
pub struct CycleDriver {
    cycle_ns: u64,
    next_deadline: u64,
}

impl CycleDriver {
    pub fn new(cycle_ns: u64) -> Self {
        CycleDriver {
            cycle_ns,
            next_deadline: 0,
        }
    }

    /// Arms the absolute-deadline schedule against `clock`. Must be called
    /// once before the first [`tick`](Self::tick); [`run`](Self::run) does
    /// this itself.
    pub fn start(&mut self, clock: &Clock) {
        self.next_deadline = clock.now_ns() + self.cycle_ns;
    }

    /// Executes one fetch-decode-execute cycle, checks the per-cycle time
    /// budget, presents a frame if the instruction touched the display,
    /// advances timers and keypad decay, then paces to the next absolute
    /// deadline (or absorbs a missed tick). [`start`](Self::start) must have
    /// been called first.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        chip8: &mut Chip8,
        keypad: &Keypad,
        clock: &Clock,
        rng: &mut dyn RandomSource,
        display: &mut dyn DisplaySink,
        beep: &mut dyn BeepSink,
    ) -> EmulatorResult<()> {
        let cycle_start = clock.now_ns();
        let effect = chip8.step(keypad, rng)?;
        let cycle_end = clock.now_ns();

        let took_ns = cycle_end - cycle_start;
        if took_ns > self.cycle_ns {
            error!(
                "instruction at pc={:#06x} took {}ns, exceeding the {}ns cycle budget",
                chip8.pc(),
                took_ns,
                self.cycle_ns
            );
            return Err(EmulatorError::FrameOverrun {
                pc: chip8.pc(),
                took_ns,
                budget_ns: self.cycle_ns,
            });
        }

        if let StepEffect::DisplayDirty = effect {
            display.display_present(chip8.display());
        }

        chip8.tick_timers(self.cycle_ns, beep);
        keypad.tick_decay();

        self.next_deadline += self.cycle_ns;

        let now = clock.now_ns();
        if now >= self.next_deadline {
            let missed = (now - self.next_deadline) / self.cycle_ns + 1;
            warn!("missed {missed} cycle(s), absorbing lost time");
            self.next_deadline += missed * self.cycle_ns;
        } else {
            clock.wait_until(self.next_deadline);
        }

        Ok(())
    }

    /// Run until `quit` is observed set or a fatal error is produced.
    #[allow(clippy::too_many_arguments)]
    pub fn run(
        &mut self,
        chip8: &mut Chip8,
        keypad: &Keypad,
        quit: &AtomicBool,
        clock: &Clock,
        rng: &mut dyn RandomSource,
        display: &mut dyn DisplaySink,
        beep: &mut dyn BeepSink,
    ) -> EmulatorResult<()> {
        self.start(clock);

        loop {
            if quit.load(Ordering::Acquire) {
                return Ok(());
            }

            self.tick(chip8, keypad, clock, rng, display, beep)?;
        }
    }
}
