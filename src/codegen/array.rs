//! Random access into a runtime-indexed run of cells
//!
//! The pointer can only move by distances fixed at generation time, so a
//! runtime index `k` cannot be reached directly. Instead the whole working
//! window (two index counters, a carried value and scratch cells) walks
//! along the elements one cell per iteration:
//!
//! ```text
//!   before           after one outward step
//!   [window][e0 e1]  [e0][window][e1]
//! ```
//!
//! Each outward step parks the element in front of the window behind it and
//! slides the frame of reference one cell to the right, so after `k` steps
//! element `k` sits at [`WINDOW_ELEMENTS`]. The return pass undoes the walk
//! one cell at a time, putting every parked element back. Element `k` of an
//! array based at `base` lives at `base + WINDOW_ELEMENTS + k` whenever no
//! access is in progress.
//!
//! Both operations take time proportional to the index.

use crate::codegen::constants::{
    WINDOW_CARRY, WINDOW_COUNTDOWN, WINDOW_ELEMENTS, WINDOW_FLAG, WINDOW_RETURN, WINDOW_SCRATCH,
};
use crate::codegen::emitter::{Cell, Emitter, Fragment};

impl Emitter {
    /// Copy element `index` of the array at `base` into `dest`.
    ///
    /// `index` is a 16-bit pair. `index` and `dest` must lie outside the
    /// array; both, and every element, keep their values except `dest`.
    pub fn read_array16(&mut self, base: Cell, index: Cell, dest: Cell) -> Fragment {
        let mut f = self.load_countdowns(base, index);
        f += self.walk_out(base, WINDOW_CARRY);
        f += self.assign(
            base + WINDOW_ELEMENTS,
            base + WINDOW_CARRY,
            base + WINDOW_FLAG,
        );
        f += self.walk_back(base, WINDOW_CARRY);
        f += self.assign(base + WINDOW_CARRY, dest, base);
        f
    }

    /// Store `value` as element `index` of the array at `base`.
    ///
    /// Same constraints as [`Emitter::read_array16`]; only element `index`
    /// changes.
    pub fn write_array16(&mut self, base: Cell, index: Cell, value: Cell) -> Fragment {
        let mut f = self.load_countdowns(base, index);
        f += self.assign(value, base + WINDOW_CARRY, base + WINDOW_FLAG);
        f += self.walk_out(base, WINDOW_FLAG);
        f += self.assign(
            base + WINDOW_CARRY,
            base + WINDOW_ELEMENTS,
            base + WINDOW_FLAG,
        );
        f += self.walk_back(base, WINDOW_RETURN + 1);
        f
    }

    /// Put `index` in both countdown pairs
    fn load_countdowns(&mut self, base: Cell, index: Cell) -> Fragment {
        let countdown = base + WINDOW_COUNTDOWN;
        let ret = base + WINDOW_RETURN;
        self.assign16(index, countdown, ret) + self.assign16(countdown, ret, base + WINDOW_CARRY)
    }

    /// Outward pass. Window cells `0..top` move up by one each step.
    fn walk_out(&mut self, base: Cell, top: u16) -> Fragment {
        let countdown = base + WINDOW_COUNTDOWN;
        self.repeat_while(
            move |e: &mut Emitter| {
                e.is_nonzero16(countdown, base + WINDOW_FLAG, base + WINDOW_SCRATCH)
            },
            move |e: &mut Emitter| {
                let mut f = e.dec16(countdown, base + WINDOW_FLAG);
                for offset in (0..top).rev() {
                    f += e.move_cell(base + offset, base + offset + 1);
                }
                f += e.move_cell(base + WINDOW_ELEMENTS, base);
                f += Emitter::slide_right();
                f
            },
        )
    }

    /// Return pass. Window cells `2..=top` move down by one each step.
    fn walk_back(&mut self, base: Cell, top: u16) -> Fragment {
        let ret = base + WINDOW_RETURN;
        self.repeat_while(
            move |e: &mut Emitter| e.is_nonzero16(ret, base + WINDOW_FLAG, base + WINDOW_SCRATCH),
            move |e: &mut Emitter| {
                let mut f = e.dec16(ret, base + WINDOW_FLAG);
                for offset in WINDOW_RETURN..=top {
                    f += e.move_cell(base + offset, base + offset - 1);
                }
                f += Emitter::slide_left();
                f += e.move_cell(base, base + WINDOW_ELEMENTS);
                f
            },
        )
    }
}
