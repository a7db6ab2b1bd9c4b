//! 60Hz delay/sound timer decrement, decoupled from the instruction clock by
//! a nanosecond accumulator.
//!
//! Grounded in the same accumulator idiom as the reference implementation's
//! `update_timers`: add the elapsed delta, then drain whole 60Hz periods one
//! at a time. A driver that misses several periods catches all of them up in
//! a single `advance` call instead of losing them.

pub const TIMER_PERIOD_NS: u64 = 16_666_667;

pub trait BeepSink {
    fn beep_request(&mut self, active: bool);
}

pub struct Timers {
    accumulator_ns: u64,
    delay_timer: u8,
    sound_timer: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers {
            accumulator_ns: 0,
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    pub fn delay(&self) -> u8 {
        self.delay_timer
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay_timer = value;
    }

    pub fn sound(&self) -> u8 {
        self.sound_timer
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound_timer = value;
    }

    pub fn should_beep(&self) -> bool {
        self.sound_timer > 0
    }

    /// Advance the accumulator by `dt_ns` and drain every whole 60Hz period
    /// it now covers, reporting the resulting beep state through `sink` for
    /// each period in which the sound timer was audible.
    pub fn advance(&mut self, dt_ns: u64, sink: &mut dyn BeepSink) {
        self.accumulator_ns += dt_ns;

        while self.accumulator_ns >= TIMER_PERIOD_NS {
            let was_sounding = self.sound_timer > 0;

            if self.delay_timer > 0 {
                self.delay_timer -= 1;
            }
            if self.sound_timer > 0 {
                self.sound_timer -= 1;
            }

            let now_sounding = self.sound_timer > 0;
            if was_sounding || now_sounding {
                sink.beep_request(now_sounding);
            }

            self.accumulator_ns -= TIMER_PERIOD_NS;
        }
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<bool>,
    }

    impl BeepSink for RecordingSink {
        fn beep_request(&mut self, active: bool) {
            self.calls.push(active);
        }
    }

    #[test]
    fn sub_period_advances_do_not_change_timers() {
        let mut timers = Timers::new();
        timers.set_delay(10);
        let mut sink = RecordingSink::default();
        timers.advance(TIMER_PERIOD_NS - 1, &mut sink);
        assert_eq!(timers.delay(), 10);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn k_periods_decrement_by_min_current_k() {
        let mut timers = Timers::new();
        timers.set_delay(3);
        let mut sink = RecordingSink::default();
        timers.advance(TIMER_PERIOD_NS * 5, &mut sink);
        assert_eq!(timers.delay(), 0);
    }

    #[test]
    fn catches_up_several_missed_periods_in_one_call() {
        let mut timers = Timers::new();
        timers.set_delay(100);
        timers.set_sound(100);
        let mut sink = RecordingSink::default();
        timers.advance(TIMER_PERIOD_NS * 10, &mut sink);
        assert_eq!(timers.delay(), 90);
        assert_eq!(timers.sound(), 90);
        assert_eq!(sink.calls.len(), 10);
        assert!(sink.calls.iter().all(|&active| active));
    }

    #[test]
    fn beep_stops_being_requested_once_sound_hits_zero() {
        let mut timers = Timers::new();
        timers.set_sound(1);
        let mut sink = RecordingSink::default();
        timers.advance(TIMER_PERIOD_NS * 3, &mut sink);
        // One period to go from 1 -> 0 (reported), then nothing further.
        assert_eq!(sink.calls, vec![false]);
    }

    #[test]
    fn half_a_second_of_cycles_drains_a_thirty_tick_delay_timer() {
        let mut timers = Timers::new();
        timers.set_delay(30);
        timers.set_sound(0);
        let mut sink = RecordingSink::default();
        const CYCLE_NS: u64 = 2_000_000;
        for _ in 0..250 {
            timers.advance(CYCLE_NS, &mut sink);
        }
        assert_eq!(timers.delay(), 0);
        assert_eq!(timers.sound(), 0);
        assert!(sink.calls.is_empty());
    }
}
