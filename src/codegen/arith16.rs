//! 16-bit counters on paired cells
//!
//! A pair is `low` at `pair` and `high` at `pair + 1`. Carry and borrow are
//! detected by testing the low cell for zero, so both operations wrap
//! modulo 65536 exactly like `u16::wrapping_add`/`wrapping_sub`.

use crate::codegen::control::nothing;
use crate::codegen::emitter::{Cell, Emitter, Fragment};

impl Emitter {
    /// Add one to the pair. Uses `scratch` and `scratch + 1`.
    pub fn inc16(&mut self, pair: Cell, scratch: Cell) -> Fragment {
        let mut f = self.inc(pair);
        // low wrapped to 0: carry into high
        f += self.if_else(pair, scratch, nothing, move |e: &mut Emitter| e.inc(pair + 1));
        f
    }

    /// Subtract one from the pair. Uses `scratch` and `scratch + 1`.
    pub fn dec16(&mut self, pair: Cell, scratch: Cell) -> Fragment {
        // low is about to wrap from 0: borrow from high first
        let mut f = self.if_else(pair, scratch, nothing, move |e: &mut Emitter| e.dec(pair + 1));
        f += self.dec(pair);
        f
    }

    /// Set `flag` to 1 if either half of the pair is nonzero, else 0.
    ///
    /// Finishes on `flag`, ready to gate a loop. `flag` must not be
    /// `scratch` or `scratch + 1`.
    pub fn is_nonzero16(&mut self, pair: Cell, flag: Cell, scratch: Cell) -> Fragment {
        let mut f = self.zero(flag);
        f += self.if_nonzero(pair, scratch, move |e: &mut Emitter| e.set(flag, 1));
        f += self.if_nonzero(pair + 1, scratch, move |e: &mut Emitter| e.set(flag, 1));
        f += self.navigate(flag);
        f
    }
}
