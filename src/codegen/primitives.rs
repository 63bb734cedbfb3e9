//! Primitive emission layer
//!
//! Adds `impl Emitter` methods that each navigate to one cell and append a
//! fixed token run. Every primitive leaves the tracked position on the cell it
//! touched last.

use crate::codegen::emitter::{Cell, Emitter, Fragment};

impl Emitter {
    /// Clear `cell` with a decrement loop
    pub fn zero(&mut self, cell: Cell) -> Fragment {
        self.navigate(cell) + Fragment::from("[-]")
    }

    pub fn inc(&mut self, cell: Cell) -> Fragment {
        self.add(cell, 1)
    }

    pub fn dec(&mut self, cell: Cell) -> Fragment {
        self.sub(cell, 1)
    }

    /// Add the literal `value` to `cell` (mod 256)
    pub fn add(&mut self, cell: Cell, value: u8) -> Fragment {
        self.navigate(cell) + Fragment::repeat('+', usize::from(value))
    }

    /// Subtract the literal `value` from `cell` (mod 256)
    pub fn sub(&mut self, cell: Cell, value: u8) -> Fragment {
        self.navigate(cell) + Fragment::repeat('-', usize::from(value))
    }

    /// Overwrite `cell` with `value`
    pub fn set(&mut self, cell: Cell, value: u8) -> Fragment {
        self.zero(cell) + Fragment::repeat('+', usize::from(value))
    }

    /// Read one input byte into `cell`
    pub fn input(&mut self, cell: Cell) -> Fragment {
        self.navigate(cell) + Fragment::from(",")
    }

    /// Write `cell` to the output
    pub fn output(&mut self, cell: Cell) -> Fragment {
        self.navigate(cell) + Fragment::from(".")
    }

    /// A bare `>` that leaves the tracked position alone.
    ///
    /// Afterwards every logical address names the cell one to the right of
    /// the one it named before. Only the array layer uses this, inside loops
    /// whose iteration count is a runtime value.
    pub(crate) fn slide_right() -> Fragment {
        Fragment::repeat('>', 1)
    }

    /// Mirror of [`Emitter::slide_right`]
    pub(crate) fn slide_left() -> Fragment {
        Fragment::repeat('<', 1)
    }
}
