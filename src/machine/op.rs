//! Opcodes and the token map
//!
//! Every instruction is a single byte of source text. Bytes outside the
//! eight instruction characters are comments and produce no opcode.

use std::fmt;

/// One instruction of the tape machine.
///
/// The discriminants are the opcode values the self-hosted interpreter keeps
/// in its memory; 0 is reserved for "end of program".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Op {
    Add = 1,    // +
    Input = 2,  // ,
    Sub = 3,    // -
    Output = 4, // .
    Left = 5,   // <
    Right = 6,  // >
    Begin = 7,  // [
    End = 8,    // ]
}

impl Op {
    /// All opcodes in ascending opcode order. Their tokens are also in
    /// ascending byte order.
    pub const ALL: [Op; 8] = [
        Op::Add,
        Op::Input,
        Op::Sub,
        Op::Output,
        Op::Left,
        Op::Right,
        Op::Begin,
        Op::End,
    ];

    /// Map a source byte to its opcode
    pub fn from_token(byte: u8) -> Option<Op> {
        match byte {
            b'+' => Some(Op::Add),
            b',' => Some(Op::Input),
            b'-' => Some(Op::Sub),
            b'.' => Some(Op::Output),
            b'<' => Some(Op::Left),
            b'>' => Some(Op::Right),
            b'[' => Some(Op::Begin),
            b']' => Some(Op::End),
            _ => None,
        }
    }

    /// Map a stored opcode value back to its opcode
    pub fn from_code(code: u8) -> Option<Op> {
        Op::ALL.iter().copied().find(|op| op.code() == code)
    }

    pub fn token(self) -> u8 {
        match self {
            Op::Add => b'+',
            Op::Input => b',',
            Op::Sub => b'-',
            Op::Output => b'.',
            Op::Left => b'<',
            Op::Right => b'>',
            Op::Begin => b'[',
            Op::End => b']',
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(self.token()))
    }
}

/// Opcodes of `source` in order, skipping comment bytes
pub fn tokenize(source: &str) -> impl Iterator<Item = Op> + '_ {
    source.bytes().filter_map(Op::from_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        for op in Op::ALL {
            assert_eq!(Op::from_token(op.token()), Some(op));
        }
    }

    #[test]
    fn test_codes_and_tokens_ascend_together() {
        for pair in Op::ALL.windows(2) {
            assert_eq!(pair[0].code() + 1, pair[1].code());
            assert!(pair[0].token() < pair[1].token());
        }
        assert_eq!(Op::Add.code(), 1);
        assert_eq!(Op::End.code(), 8);
    }

    #[test]
    fn test_from_code() {
        for op in Op::ALL {
            assert_eq!(Op::from_code(op.code()), Some(op));
        }
        assert_eq!(Op::from_code(0), None);
        assert_eq!(Op::from_code(9), None);
    }

    #[test]
    fn test_display_shows_token() {
        let text: String = Op::ALL.iter().map(Op::to_string).collect();
        assert_eq!(text, "+,-.<>[]");
    }

    #[test]
    fn test_tokenize_skips_comments() {
        let ops: Vec<Op> = tokenize("a+ b[-]\n.").collect();
        assert_eq!(ops, vec![Op::Add, Op::Begin, Op::Sub, Op::End, Op::Output]);
    }
}
