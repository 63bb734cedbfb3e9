//! Code generator for the tape machine
//!
//! Layers, lowest first:
//! - [`emitter`]: the [`Emitter`] (tracked pointer position + cell allocator)
//!   and the [`Fragment`] text type
//! - [`primitives`]: navigate, zero, inc/dec, add/sub/set, input/output
//! - [`transfer`]: destructive move and non-destructive assign
//! - [`control`]: `repeat_while`, `if_nonzero`, `if_else`
//! - [`arith16`]: 16-bit increment, decrement and zero test
//! - [`array`]: runtime-indexed reads and writes
//! - [`assembler`]: the self-hosted interpreter
//!
//! Every layer is a set of `impl Emitter` methods returning a [`Fragment`].
//! The emitter is the only mutable state; fragments are plain text.

pub mod arith16;
pub mod array;
pub mod assembler;
pub mod constants;
pub mod control;
pub mod emitter;
pub mod layout;
pub mod primitives;
pub mod transfer;

pub use assembler::{generate_interpreter, self_hosted_input};
pub use emitter::{Cell, Emitter, Fragment};
pub use layout::RegisterLayout;
