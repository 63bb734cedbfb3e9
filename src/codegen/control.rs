//! Loop and branch macros
//!
//! The only native control flow is "repeat while the current cell is
//! nonzero". Everything here is built from that plus the transfer layer.
//!
//! Branch and loop bodies are builder closures that receive the emitter as an
//! argument. They capture nothing but cell addresses, so the tracked position
//! flows through them in exactly the order the text is emitted.

use crate::codegen::emitter::{Cell, Emitter, Fragment};

impl Emitter {
    /// `cond [ body cond ]`
    ///
    /// `cond` must finish on the cell that gates the loop. `body` may finish
    /// anywhere because `cond` runs again before the closing bracket.
    pub fn repeat_while<C, B>(&mut self, mut cond: C, body: B) -> Fragment
    where
        C: FnMut(&mut Emitter) -> Fragment,
        B: FnOnce(&mut Emitter) -> Fragment,
    {
        let mut f = cond(self) + Fragment::from("[");
        f += body(self);
        f += cond(self) + Fragment::from("]");
        f
    }

    /// Run `then` once if `flag` is nonzero.
    ///
    /// Uses `scratch` and `scratch + 1`; both end at 0 and `flag` is left
    /// untouched by the macro itself.
    pub fn if_nonzero<T>(&mut self, flag: Cell, scratch: Cell, then: T) -> Fragment
    where
        T: FnOnce(&mut Emitter) -> Fragment,
    {
        let mut f = self.assign(flag, scratch, scratch + 1);
        f += self.navigate(scratch) + Fragment::from("[");
        f += then(self);
        f += self.zero(scratch) + Fragment::from("]");
        f
    }

    /// Run `then` once if `flag` is nonzero, otherwise `otherwise` once.
    ///
    /// `scratch` holds the "take the else branch" sentinel and `scratch + 1`
    /// parks the flag while its loop exits; both end at 0. `flag` comes back
    /// with the value it had when `then` finished. Nested calls may share
    /// the same scratch pair.
    pub fn if_else<T, E>(&mut self, flag: Cell, scratch: Cell, then: T, otherwise: E) -> Fragment
    where
        T: FnOnce(&mut Emitter) -> Fragment,
        E: FnOnce(&mut Emitter) -> Fragment,
    {
        let mut f = self.set(scratch, 1);
        f += self.zero(scratch + 1);
        f += self.navigate(flag) + Fragment::from("[");
        f += then(self);
        f += self.zero(scratch);
        f += self.move_cell(flag, scratch + 1) + Fragment::from("]");
        f += self.move_cell(scratch + 1, flag);
        f += self.navigate(scratch) + Fragment::from("[");
        f += otherwise(self);
        f += self.zero(scratch) + Fragment::from("]");
        f
    }
}

/// Branch body that emits nothing
pub fn nothing(_: &mut Emitter) -> Fragment {
    Fragment::new()
}
