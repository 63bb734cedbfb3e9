//! # Introduction
//!
//! tapeforge writes a program for the eight-instruction tape machine
//! (`+ - < > , . [ ]`) that is itself an interpreter for that machine. The
//! target has no arithmetic beyond ±1, no addressing beyond one relative
//! step, and no control flow beyond "repeat while nonzero", so every
//! construct the interpreter needs is synthesised from those.
//!
//! ## Generation pipeline
//!
//! ```text
//! Emitter → primitives → transfers → branches → 16-bit counters
//!         → indexed array → load/dispatch loop → wrapped text
//! ```
//!
//! 1. [`codegen`]: the generator. [`codegen::Emitter`] tracks where the
//!    tape pointer will be; each layer adds methods returning a
//!    [`codegen::Fragment`].
//! 2. [`machine`]: the reference machine used as an oracle: 65536 wrapping
//!    8-bit cells, a 16-bit data pointer, end of input reads as 0.
//! 3. [`format`]: fixed-width line layout of the final text.
//!
//! ## Running the result
//!
//! Feed the generated interpreter the source program, a NUL byte, then the
//! program's own input (see [`codegen::self_hosted_input`]). Its output is
//! byte-for-byte what the source program would print when run directly.

pub mod codegen;
pub mod format;
pub mod machine;

use codegen::constants::LINE_WIDTH;

/// The self-hosted interpreter as wrapped text, ready to print
pub fn generate_program_text() -> String {
    format::wrap_lines(codegen::generate_interpreter().as_str(), LINE_WIDTH)
}
