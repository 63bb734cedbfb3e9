//! Register layout of the self-hosted interpreter
//!
//! Every register is allocated once, up front, from the emitter's bump
//! allocator. The memory array comes last because it grows without bound
//! to the right.

use crate::codegen::constants::WINDOW_ELEMENTS;
use crate::codegen::emitter::{Cell, Emitter};
use rustc_hash::FxHashMap;

/// Base address and width of one named register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub base: Cell,
    pub width: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    /// 16-bit index of the instruction being executed
    pub code_pointer: Cell,

    /// 16-bit index of the emulated data cell
    pub data_pointer: Cell,

    /// Working byte: the input byte, then the opcode, then the data cell
    pub buffer: Cell,

    /// Bracket nesting depth during a jump scan
    pub level: Cell,

    /// Scratch pair shared by every conditional
    pub scratch: Cell,

    /// Array holding the loaded program followed by the emulated data tape
    pub memory: Cell,
}

impl RegisterLayout {
    /// Allocate the standard layout
    pub fn allocate(emitter: &mut Emitter) -> Self {
        RegisterLayout {
            code_pointer: emitter.allocate(2),
            data_pointer: emitter.allocate(2),
            buffer: emitter.allocate(1),
            level: emitter.allocate(1),
            scratch: emitter.allocate(2),
            memory: emitter.allocate(1),
        }
    }

    /// Symbolic name → register. The memory width counts only the window in
    /// front of the first element.
    pub fn table(&self) -> FxHashMap<&'static str, Register> {
        let mut table = FxHashMap::default();
        table.insert("code_pointer", Register { base: self.code_pointer, width: 2 });
        table.insert("data_pointer", Register { base: self.data_pointer, width: 2 });
        table.insert("buffer", Register { base: self.buffer, width: 1 });
        table.insert("level", Register { base: self.level, width: 1 });
        table.insert("scratch", Register { base: self.scratch, width: 2 });
        table.insert("memory", Register { base: self.memory, width: WINDOW_ELEMENTS });
        table
    }

    /// Tape address of memory element `index` while no access is running
    pub fn element(&self, index: u16) -> usize {
        usize::from(self.memory) + usize::from(WINDOW_ELEMENTS) + usize::from(index)
    }
}
