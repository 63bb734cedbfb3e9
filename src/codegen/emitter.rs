//! Emission context and fragment type
//!
//! [`Emitter`] is the only stateful piece of the generator. It remembers where
//! the real tape pointer will be once every fragment emitted so far has run,
//! and it hands out cell addresses from a bump allocator.
//!
//! # Invariant
//!
//! After any fragment produced by an `Emitter` method finishes executing, the
//! machine's data pointer equals [`Emitter::position`]. Every macro built on
//! top of the primitives preserves this across its own sub-fragments.

use std::fmt;
use std::ops::{Add, AddAssign};

/// Tape address of a single 8-bit cell
pub type Cell = u16;

/// An immutable run of instruction tokens
///
/// Concatenation is plain text splicing. Pointer tracking travels through the
/// [`Emitter`], never through the fragment itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fragment(String);

impl Fragment {
    pub fn new() -> Self {
        Fragment(String::new())
    }

    /// A run of `count` copies of `token`
    pub fn repeat(token: char, count: usize) -> Self {
        Fragment(token.to_string().repeat(count))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment(text.to_string())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AddAssign for Fragment {
    fn add_assign(&mut self, rhs: Fragment) {
        self.0.push_str(&rhs.0);
    }
}

impl Add for Fragment {
    type Output = Fragment;

    fn add(mut self, rhs: Fragment) -> Fragment {
        self += rhs;
        self
    }
}

impl FromIterator<Fragment> for Fragment {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        let mut out = Fragment::new();
        for fragment in iter {
            out += fragment;
        }
        out
    }
}

/// Tracks the assumed pointer position and allocates cells
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    /// Where the real pointer sits after everything emitted so far
    current: Cell,

    /// Next unallocated cell
    next_free: Cell,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            current: 0,
            next_free: 0,
        }
    }

    /// Reserve `count` consecutive cells and return the first one.
    ///
    /// Addresses are never reused. Allocating past the end of the 16-bit
    /// address space wraps silently back to 0; callers keep the total
    /// footprint inside the tape.
    pub fn allocate(&mut self, count: u16) -> Cell {
        let base = self.next_free;
        self.next_free = self.next_free.wrapping_add(count);
        base
    }

    /// Assumed pointer position after all emitted code
    pub fn position(&self) -> Cell {
        self.current
    }

    /// Number of cells handed out so far
    pub fn allocated(&self) -> Cell {
        self.next_free
    }

    /// Move the pointer from the tracked position to `target`.
    ///
    /// This is the only place `current` changes.
    pub fn navigate(&mut self, target: Cell) -> Fragment {
        let fragment = if target >= self.current {
            Fragment::repeat('>', usize::from(target - self.current))
        } else {
            Fragment::repeat('<', usize::from(self.current - target))
        };
        self.current = target;
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_right_then_left() {
        let mut e = Emitter::new();
        assert_eq!(e.navigate(3).as_str(), ">>>");
        assert_eq!(e.position(), 3);
        assert_eq!(e.navigate(1).as_str(), "<<");
        assert_eq!(e.position(), 1);
        assert!(e.navigate(1).is_empty());
    }

    #[test]
    fn test_allocate_is_monotonic() {
        let mut e = Emitter::new();
        assert_eq!(e.allocate(2), 0);
        assert_eq!(e.allocate(1), 2);
        assert_eq!(e.allocate(3), 3);
        assert_eq!(e.allocated(), 6);
    }

    #[test]
    fn test_allocate_wraps_silently() {
        let mut e = Emitter::new();
        e.allocate(u16::MAX);
        assert_eq!(e.allocate(2), u16::MAX);
        assert_eq!(e.allocated(), 1);
    }

    #[test]
    fn test_fragment_concatenation() {
        let joined: Fragment = vec![Fragment::from(">+"), Fragment::from("<-")]
            .into_iter()
            .collect();
        assert_eq!(joined.as_str(), ">+<-");
        assert_eq!((Fragment::from("[") + Fragment::from("]")).to_string(), "[]");
    }

    #[test]
    fn test_repeat() {
        assert_eq!(Fragment::repeat('-', 3).as_str(), "---");
        assert!(Fragment::repeat('+', 0).is_empty());
    }
}
