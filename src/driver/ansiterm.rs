use crate::driver::BeepSink;

/// BEL-only fallback for terminals without a native audio backend.
pub struct AnsiTerm;

impl BeepSink for AnsiTerm {
    fn beep_request(&mut self, active: bool) {
        if active {
            println!("\x07");
        }
    }
}
