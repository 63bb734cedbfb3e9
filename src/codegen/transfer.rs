//! Cell-to-cell transfers
//!
//! The target machine has no register copy. A value is moved by draining the
//! source one unit at a time, and copied by draining it into a scratch cell
//! and then draining the scratch cell back into both places.

use crate::codegen::emitter::{Cell, Emitter, Fragment};

impl Emitter {
    /// Drain `src` into `dst`. `dst` is cleared first; `src` ends at 0.
    pub fn move_cell(&mut self, src: Cell, dst: Cell) -> Fragment {
        let mut f = self.zero(dst);
        f += self.navigate(src) + Fragment::from("[");
        f += self.inc(dst);
        f += self.dec(src) + Fragment::from("]");
        f
    }

    /// Copy `src` into `dst` through `scratch`.
    ///
    /// `src` keeps its value and `scratch` ends at 0.
    pub fn assign(&mut self, src: Cell, dst: Cell, scratch: Cell) -> Fragment {
        let mut f = self.zero(dst);
        f += self.zero(scratch);
        f += self.move_cell(src, scratch);
        f += self.navigate(scratch) + Fragment::from("[");
        f += self.inc(src);
        f += self.inc(dst);
        f += self.dec(scratch) + Fragment::from("]");
        f
    }

    pub fn zero16(&mut self, pair: Cell) -> Fragment {
        self.zero(pair) + self.zero(pair + 1)
    }

    pub fn move16(&mut self, src: Cell, dst: Cell) -> Fragment {
        self.move_cell(src, dst) + self.move_cell(src + 1, dst + 1)
    }

    /// Copy a 16-bit pair; `scratch` is a single cell reused for both halves
    pub fn assign16(&mut self, src: Cell, dst: Cell, scratch: Cell) -> Fragment {
        self.assign(src, dst, scratch) + self.assign(src + 1, dst + 1, scratch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_text() {
        let mut e = Emitter::new();
        assert_eq!(e.move_cell(0, 1).as_str(), ">[-]<[>+<-]");
        assert_eq!(e.position(), 0);
    }

    #[test]
    fn test_assign_ends_on_scratch() {
        let mut e = Emitter::new();
        let f = e.assign(0, 1, 2);
        assert_eq!(e.position(), 2);
        assert_eq!(f.as_str().matches('[').count(), 5);
    }
}
