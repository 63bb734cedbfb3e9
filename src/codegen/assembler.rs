//! Top-level assembly of the self-hosted interpreter
//!
//! The generated program runs in two phases:
//!
//! 1. **Load**: read source bytes until a NUL byte (or end of input), turn
//!    each instruction character into its opcode and append it to memory.
//!    An opcode 0 terminates the program; the emulated data tape starts in
//!    the cell right after it.
//! 2. **Execute**: fetch the opcode under the code pointer, dispatch it,
//!    advance the code pointer, and stop at opcode 0.
//!
//! Both phases select a case with a cascade of nested two-branch
//! conditionals, one level per opcode, since the target has no branch table.

use crate::codegen::constants::PROGRAM_TERMINATOR;
use crate::codegen::control::nothing;
use crate::codegen::emitter::{Emitter, Fragment};
use crate::codegen::layout::RegisterLayout;
use crate::machine::op::Op;
use log::debug;

/// Emit the complete self-hosted interpreter
pub fn generate_interpreter() -> Fragment {
    let mut emitter = Emitter::new();
    let layout = RegisterLayout::allocate(&mut emitter);
    debug!("register layout: {:?}", layout);
    Assembler { r: layout }.assemble(&mut emitter)
}

/// Byte stream to feed the generated interpreter so that it runs `program`
/// on `input`.
pub fn self_hosted_input(program: &[u8], input: &[u8]) -> Vec<u8> {
    let mut stream = Vec::with_capacity(program.len() + 1 + input.len());
    stream.extend(program.iter().copied().filter(|&b| b != PROGRAM_TERMINATOR));
    stream.push(PROGRAM_TERMINATOR);
    stream.extend_from_slice(input);
    stream
}

/// Which way a bracket scan walks the code pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy)]
struct Assembler {
    r: RegisterLayout,
}

impl Assembler {
    fn assemble(self, e: &mut Emitter) -> Fragment {
        let mut program = e.zero16(self.r.code_pointer);
        program += e.zero16(self.r.data_pointer);

        let load = self.load_phase(e);
        debug!("load phase: {} tokens", load.len());
        program += load;

        let execute = self.execute_phase(e);
        debug!("execute phase: {} tokens", execute.len());
        program += execute;

        program
    }

    fn load_phase(self, e: &mut Emitter) -> Fragment {
        let buffer = self.r.buffer;
        let mut f = e.repeat_while(
            move |e: &mut Emitter| e.input(buffer),
            move |e: &mut Emitter| self.classify(e, 0, 0),
        );
        f += e.zero(buffer);
        f += self.append(e);
        f
    }

    /// Compare the buffer against the token of `Op::ALL[index]`.
    ///
    /// The buffer already has `previous` subtracted, so each level only
    /// subtracts the gap to the next token. Bytes matching nothing fall
    /// through the last level and are dropped.
    fn classify(self, e: &mut Emitter, index: usize, previous: u8) -> Fragment {
        let Some(&op) = Op::ALL.get(index) else {
            return Fragment::new();
        };
        let buffer = self.r.buffer;
        let mut f = e.sub(buffer, op.token() - previous);
        f += e.if_else(
            buffer,
            self.r.scratch,
            move |e: &mut Emitter| self.classify(e, index + 1, op.token()),
            move |e: &mut Emitter| e.set(buffer, op.code()) + self.append(e),
        );
        f
    }

    /// memory[data_pointer] = buffer; data_pointer += 1
    fn append(self, e: &mut Emitter) -> Fragment {
        e.write_array16(self.r.memory, self.r.data_pointer, self.r.buffer)
            + e.inc16(self.r.data_pointer, self.r.scratch)
    }

    fn execute_phase(self, e: &mut Emitter) -> Fragment {
        let r = self.r;
        e.repeat_while(
            move |e: &mut Emitter| {
                e.read_array16(r.memory, r.code_pointer, r.buffer) + e.navigate(r.buffer)
            },
            move |e: &mut Emitter| self.dispatch(e, 0) + e.inc16(r.code_pointer, r.scratch),
        )
    }

    /// Count the opcode in the buffer down to zero, one level per opcode
    fn dispatch(self, e: &mut Emitter, index: usize) -> Fragment {
        let Some(&op) = Op::ALL.get(index) else {
            return Fragment::new();
        };
        let mut f = e.dec(self.r.buffer);
        f += e.if_else(
            self.r.buffer,
            self.r.scratch,
            move |e: &mut Emitter| self.dispatch(e, index + 1),
            move |e: &mut Emitter| self.execute(e, op),
        );
        f
    }

    fn execute(self, e: &mut Emitter, op: Op) -> Fragment {
        let r = self.r;
        match op {
            Op::Add => self.load_cell(e) + e.inc(r.buffer) + self.store_cell(e),
            Op::Input => e.input(r.buffer) + self.store_cell(e),
            Op::Sub => self.load_cell(e) + e.dec(r.buffer) + self.store_cell(e),
            Op::Output => self.load_cell(e) + e.output(r.buffer),
            Op::Left => e.dec16(r.data_pointer, r.scratch),
            Op::Right => e.inc16(r.data_pointer, r.scratch),
            Op::Begin => {
                let mut f = self.load_cell(e);
                f += e.if_else(r.buffer, r.scratch, nothing, move |e: &mut Emitter| {
                    self.scan(e, Direction::Forward)
                });
                f
            }
            Op::End => {
                let mut f = self.load_cell(e);
                f += e.if_else(
                    r.buffer,
                    r.scratch,
                    move |e: &mut Emitter| self.scan(e, Direction::Backward),
                    nothing,
                );
                f
            }
        }
    }

    /// buffer = memory[data_pointer]
    fn load_cell(self, e: &mut Emitter) -> Fragment {
        e.read_array16(self.r.memory, self.r.data_pointer, self.r.buffer)
    }

    /// memory[data_pointer] = buffer
    fn store_cell(self, e: &mut Emitter) -> Fragment {
        e.write_array16(self.r.memory, self.r.data_pointer, self.r.buffer)
    }

    /// Move the code pointer to the matching bracket.
    ///
    /// The caller's final `inc16` then steps past it.
    fn scan(self, e: &mut Emitter, direction: Direction) -> Fragment {
        let r = self.r;
        let mut f = e.set(r.level, 1);
        f += e.repeat_while(
            move |e: &mut Emitter| e.navigate(r.level),
            move |e: &mut Emitter| {
                let mut f = match direction {
                    Direction::Forward => e.inc16(r.code_pointer, r.scratch),
                    Direction::Backward => e.dec16(r.code_pointer, r.scratch),
                };
                f += e.read_array16(r.memory, r.code_pointer, r.buffer);
                // 0 now means BEGIN, 1 means END
                f += e.sub(r.buffer, Op::Begin.code());
                f += e.if_else(
                    r.buffer,
                    r.scratch,
                    move |e: &mut Emitter| {
                        e.dec(r.buffer)
                            + e.if_else(r.buffer, r.scratch, nothing, move |e: &mut Emitter| {
                                self.nest(e, direction, Op::End)
                            })
                    },
                    move |e: &mut Emitter| self.nest(e, direction, Op::Begin),
                );
                f
            },
        );
        f
    }

    /// Adjust the nesting level for a bracket met during a scan
    fn nest(self, e: &mut Emitter, direction: Direction, bracket: Op) -> Fragment {
        match (direction, bracket) {
            (Direction::Forward, Op::Begin) | (Direction::Backward, Op::End) => e.inc(self.r.level),
            _ => e.dec(self.r.level),
        }
    }
}
