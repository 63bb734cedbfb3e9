//! Compiled form of a source program
//!
//! Runs of `+`/`-` and of `<`/`>` fold into a single wrapping step, and
//! brackets are resolved to jump targets up front so the engine never scans.

use crate::machine::op::{tokenize, Op};
use std::num::Wrapping;

/// One step of the reference machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instr {
    /// Add to the current cell (mod 256)
    Add(Wrapping<u8>),

    /// Move the data pointer (mod 65536)
    Shift(Wrapping<u16>),

    Input,
    Output,

    /// Jump to the target if the current cell is zero
    JumpIfZero(usize),

    /// Jump to the target if the current cell is nonzero
    JumpIfNonzero(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instrs: Vec<Instr>,
}

impl Program {
    /// Compile source text. Non-instruction bytes are ignored.
    ///
    /// Bracket balance is not checked. A `[` or `]` without a partner jumps
    /// past the last instruction, which ends the run.
    pub fn parse(source: &str) -> Program {
        let mut instrs: Vec<Instr> = Vec::new();
        let mut open: Vec<usize> = Vec::new();

        for op in tokenize(source) {
            match op {
                Op::Add | Op::Sub => {
                    let delta = Wrapping(if op == Op::Add { 1u8 } else { u8::MAX });
                    if let Some(Instr::Add(total)) = instrs.last_mut() {
                        *total += delta;
                    } else {
                        instrs.push(Instr::Add(delta));
                    }
                }
                Op::Left | Op::Right => {
                    let delta = Wrapping(if op == Op::Right { 1u16 } else { u16::MAX });
                    if let Some(Instr::Shift(total)) = instrs.last_mut() {
                        *total += delta;
                    } else {
                        instrs.push(Instr::Shift(delta));
                    }
                }
                Op::Input => instrs.push(Instr::Input),
                Op::Output => instrs.push(Instr::Output),
                Op::Begin => {
                    open.push(instrs.len());
                    // patched when the partner turns up
                    instrs.push(Instr::JumpIfZero(usize::MAX));
                }
                Op::End => {
                    let here = instrs.len();
                    match open.pop() {
                        Some(begin) => {
                            instrs[begin] = Instr::JumpIfZero(here + 1);
                            instrs.push(Instr::JumpIfNonzero(begin + 1));
                        }
                        None => instrs.push(Instr::JumpIfNonzero(usize::MAX)),
                    }
                }
            }
        }

        let end = instrs.len();
        for instr in &mut instrs {
            match instr {
                Instr::JumpIfZero(target) | Instr::JumpIfNonzero(target) if *target == usize::MAX => {
                    *target = end;
                }
                _ => {}
            }
        }

        Program { instrs }
    }

    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    pub fn len(&self) -> usize {
        self.instrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_fold() {
        let program = Program::parse("+++-->><<<");
        assert_eq!(
            program.instrs(),
            &[Instr::Add(Wrapping(1)), Instr::Shift(Wrapping(u16::MAX))]
        );
    }

    #[test]
    fn test_brackets_resolve() {
        let program = Program::parse("[-[+]]");
        assert_eq!(
            program.instrs(),
            &[
                Instr::JumpIfZero(6),
                Instr::Add(Wrapping(u8::MAX)),
                Instr::JumpIfZero(5),
                Instr::Add(Wrapping(1)),
                Instr::JumpIfNonzero(3),
                Instr::JumpIfNonzero(1),
            ]
        );
    }

    #[test]
    fn test_unmatched_brackets_jump_to_end() {
        let program = Program::parse("[+");
        assert_eq!(program.instrs()[0], Instr::JumpIfZero(2));
        let program = Program::parse("+]");
        assert_eq!(program.instrs()[1], Instr::JumpIfNonzero(2));
    }

    #[test]
    fn test_comments_ignored() {
        assert!(Program::parse("hello world").is_empty());
    }
}
