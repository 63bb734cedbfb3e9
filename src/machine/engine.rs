// Execution engine for the reference machine

use crate::codegen::constants::{PROGRAM_TERMINATOR, TAPE_SIZE};
use crate::machine::errors::MachineError;
use crate::machine::op::Op;
use crate::machine::program::{Instr, Program};
use log::warn;
use std::io::{Bytes, Read, Write};
use std::num::Wrapping;

/// Run-time settings for a [`Machine`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineConfig {
    /// Give up after this many executed instructions
    pub step_limit: Option<u64>,
}

/// Tape, data pointer and step counter of one run.
///
/// Cells wrap modulo 256 and the data pointer wraps modulo 65536, so the
/// pointer can never leave the tape.
pub struct Machine {
    tape: Box<[Wrapping<u8>]>,
    data_pointer: Wrapping<u16>,
    steps: u64,
    config: MachineConfig,
}

impl Machine {
    pub fn new(config: MachineConfig) -> Self {
        Machine {
            tape: vec![Wrapping(0); TAPE_SIZE].into_boxed_slice(),
            data_pointer: Wrapping(0),
            steps: 0,
            config,
        }
    }

    /// Clear the tape and rewind the data pointer
    pub fn reset(&mut self) {
        self.tape.fill(Wrapping(0));
        self.data_pointer = Wrapping(0);
        self.steps = 0;
    }

    /// Run `program` to completion.
    ///
    /// Reading past the end of `input` stores 0 in the current cell. The
    /// tape is left as the program left it, so several programs can run
    /// back to back on the same machine.
    pub fn run<R: Read, W: Write>(
        &mut self,
        program: &Program,
        input: R,
        mut output: W,
    ) -> Result<(), MachineError> {
        let mut input = input.bytes();
        let instrs = program.instrs();
        let mut pc = 0;

        while let Some(&instr) = instrs.get(pc) {
            self.tick(pc)?;

            match instr {
                Instr::Add(delta) => *self.current_mut() += delta,
                Instr::Shift(delta) => self.data_pointer += delta,
                Instr::Input => *self.current_mut() = Wrapping(next_input(&mut input)?),
                Instr::Output => self.write_current(&mut output)?,
                Instr::JumpIfZero(target) => {
                    if self.current().0 == 0 {
                        pc = target;
                        continue;
                    }
                }
                Instr::JumpIfNonzero(target) => {
                    if self.current().0 != 0 {
                        pc = target;
                        continue;
                    }
                }
            }
            pc += 1;
        }

        output
            .flush()
            .map_err(|source| MachineError::Output { source })
    }

    /// Run `ops` with the program stored on the tape.
    ///
    /// The opcodes occupy cells `0..ops.len()`, a 0 terminator follows, and
    /// the data pointer starts on the cell after it. Every step fetches its
    /// opcode from the tape, so a program that moves left of its first data
    /// cell reads (and may rewrite) its own code. Brackets are matched by
    /// scanning the tape with a nesting counter. Cell values above 8 do
    /// nothing and the run ends on a 0 cell under the code pointer. Same
    /// memory model as the self-hosted interpreter.
    pub fn run_on_tape<R: Read, W: Write>(
        &mut self,
        ops: &[Op],
        input: R,
        mut output: W,
    ) -> Result<(), MachineError> {
        let mut input = input.bytes();
        for (cell, op) in self.tape.iter_mut().zip(ops) {
            *cell = Wrapping(op.code());
        }
        // 16-bit like the generated interpreter's pointers
        let terminator = Wrapping(ops.len() as u16);
        self.tape[usize::from(terminator.0)] = Wrapping(PROGRAM_TERMINATOR);
        self.data_pointer = terminator + Wrapping(1);

        let mut code_pointer = Wrapping(0u16);
        loop {
            let code = self.tape[usize::from(code_pointer.0)].0;
            if code == PROGRAM_TERMINATOR {
                break;
            }
            self.tick(usize::from(code_pointer.0))?;

            match Op::from_code(code) {
                Some(Op::Add) => *self.current_mut() += Wrapping(1),
                Some(Op::Sub) => *self.current_mut() -= Wrapping(1),
                Some(Op::Left) => self.data_pointer -= Wrapping(1),
                Some(Op::Right) => self.data_pointer += Wrapping(1),
                Some(Op::Input) => *self.current_mut() = Wrapping(next_input(&mut input)?),
                Some(Op::Output) => self.write_current(&mut output)?,
                Some(Op::Begin) if self.current().0 == 0 => {
                    code_pointer = self.scan(code_pointer, Wrapping(1))?;
                }
                Some(Op::End) if self.current().0 != 0 => {
                    code_pointer = self.scan(code_pointer, Wrapping(u16::MAX))?;
                }
                _ => {}
            }
            code_pointer += Wrapping(1);
        }

        output
            .flush()
            .map_err(|source| MachineError::Output { source })
    }

    /// Run with in-memory input and collect the output
    pub fn run_to_vec(&mut self, program: &Program, input: &[u8]) -> Result<Vec<u8>, MachineError> {
        let mut output = Vec::new();
        self.run(program, input, &mut output)?;
        Ok(output)
    }

    pub fn cell(&self, address: u16) -> u8 {
        self.tape[usize::from(address)].0
    }

    pub fn data_pointer(&self) -> u16 {
        self.data_pointer.0
    }

    /// Instructions executed since creation or the last reset
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Walk the code pointer by `step` until the bracket that balances the
    /// one under it. The nesting counter is a byte, like the generated
    /// interpreter's.
    fn scan(
        &mut self,
        mut code_pointer: Wrapping<u16>,
        step: Wrapping<u16>,
    ) -> Result<Wrapping<u16>, MachineError> {
        let (deeper, shallower) = if step.0 == 1 {
            (Op::Begin, Op::End)
        } else {
            (Op::End, Op::Begin)
        };
        let mut level = Wrapping(1u8);
        while level.0 != 0 {
            code_pointer += step;
            self.tick(usize::from(code_pointer.0))?;
            let code = self.tape[usize::from(code_pointer.0)].0;
            if code == deeper.code() {
                level += Wrapping(1);
            } else if code == shallower.code() {
                level -= Wrapping(1);
            }
        }
        Ok(code_pointer)
    }

    /// Count one step against the configured limit
    fn tick(&mut self, position: usize) -> Result<(), MachineError> {
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                warn!("step limit {} reached at instruction {}", limit, position);
                return Err(MachineError::StepLimitExceeded { limit, position });
            }
        }
        self.steps += 1;
        Ok(())
    }

    fn write_current<W: Write>(&self, output: &mut W) -> Result<(), MachineError> {
        output
            .write_all(&[self.current().0])
            .map_err(|source| MachineError::Output { source })
    }

    fn current(&self) -> Wrapping<u8> {
        self.tape[usize::from(self.data_pointer.0)]
    }

    fn current_mut(&mut self) -> &mut Wrapping<u8> {
        &mut self.tape[usize::from(self.data_pointer.0)]
    }
}

/// Next input byte, or 0 once the input is exhausted
fn next_input<R: Read>(input: &mut Bytes<R>) -> Result<u8, MachineError> {
    match input.next() {
        Some(Ok(byte)) => Ok(byte),
        Some(Err(source)) => Err(MachineError::Input { source }),
        None => Ok(0),
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}
