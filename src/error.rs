//! Unified error taxonomy for every fatal condition the interpreter can hit.
//!
//! Every component below the CLI layer returns `Result<_, EmulatorError>` rather
//! than panicking, so a single `match` at the top level can log the fault and
//! translate it into a process exit code.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmulatorError {
    #[error("monotonic time source unavailable")]
    TimeSource,

    #[error("instruction at {pc:#06x} took {took_ns}ns, exceeding the {budget_ns}ns cycle budget")]
    FrameOverrun {
        pc: u16,
        took_ns: u64,
        budget_ns: u64,
    },

    #[error("unsupported opcode {opcode:#06x} at {pc:#06x}")]
    UnsupportedOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: CALL at {pc:#06x} with sp already at capacity")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: RET at {pc:#06x} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is {size} bytes, exceeding the {max_size} byte budget")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("ROM is empty")]
    RomEmpty,

    #[error("failed to read ROM from {path}: {source}")]
    RomIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl EmulatorError {
    /// The numeric process exit code this error taxon maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            EmulatorError::TimeSource => 1,
            EmulatorError::FrameOverrun { .. } => 2,
            EmulatorError::UnsupportedOpcode { .. } => 3,
            EmulatorError::StackOverflow { .. } => 4,
            EmulatorError::StackUnderflow { .. } => 5,
            EmulatorError::RomTooLarge { .. } => 6,
            EmulatorError::RomEmpty => 7,
            EmulatorError::RomIo { .. } => 8,
        }
    }
}

pub type EmulatorResult<T> = Result<T, EmulatorError>;
