//! Reference machine
//!
//! The oracle every generated program is checked against:
//! - [`op`]: opcodes and the source token map
//! - [`program`]: source → folded instruction list with resolved jumps
//! - [`engine`]: the machine state and its run loop
//! - [`errors`]: failure modes of a run
//!
//! # Model
//!
//! 65536 cells of 8 bits, all starting at 0. The data pointer is 16 bits.
//! Both wrap. Two ways to run a program:
//! - [`Machine::run`] holds the folded program apart from the tape, so
//!   programs longer than the tape (the self-hosted interpreter among them)
//!   run unchanged.
//! - [`Machine::run_on_tape`] stores the opcodes on the tape ahead of the
//!   data, exactly as the self-hosted interpreter lays out its memory.

pub mod engine;
pub mod errors;
pub mod op;
pub mod program;

pub use engine::{Machine, MachineConfig};
pub use errors::MachineError;
pub use op::{tokenize, Op};
pub use program::Program;

/// Run `source` on a fresh machine with `input` and return its output
pub fn run_source(source: &str, input: &[u8]) -> Result<Vec<u8>, MachineError> {
    Machine::default().run_to_vec(&Program::parse(source), input)
}

/// Like [`run_source`], with the program stored on the tape ahead of its data
pub fn run_source_on_tape(source: &str, input: &[u8]) -> Result<Vec<u8>, MachineError> {
    let ops: Vec<Op> = tokenize(source).collect();
    let mut output = Vec::new();
    Machine::default().run_on_tape(&ops, input, &mut output)?;
    Ok(output)
}
