// Constants for the generator and the reference machine

/// Width of one line of generated program text
pub const LINE_WIDTH: usize = 100;

/// Number of cells on the reference machine's tape
pub const TAPE_SIZE: usize = 1 << 16;

/// Byte that ends the program text fed to the self-hosted interpreter
pub const PROGRAM_TERMINATOR: u8 = 0;

// Array window, as offsets from the array base.
// |  0  1  |  2  3  |   4   |   5   |  6  7  |  8 ...
// | count  | return | carry | flag  | scratch| elements

/// 16-bit countdown driving the outward pass
pub const WINDOW_COUNTDOWN: u16 = 0;

/// 16-bit countdown driving the return pass
pub const WINDOW_RETURN: u16 = 2;

/// Value carried alongside the window
pub const WINDOW_CARRY: u16 = 4;

/// Loop flag, also the scratch pair base for `dec16`
pub const WINDOW_FLAG: u16 = 5;

/// Scratch pair base for the zero test
pub const WINDOW_SCRATCH: u16 = 6;

/// First element cell
pub const WINDOW_ELEMENTS: u16 = 8;
