use std::fmt;

/// Index of one of the machine's eight general purpose registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register(pub u8);

impl From<u32> for Register {
    fn from(val: u32) -> Self {
        Register(val as u8)
    }
}

impl From<u8> for Register {
    fn from(val: u8) -> Self {
        Register(val)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl Register {
    pub const R0: Register = Register(0);
    pub const R1: Register = Register(1);
    pub const R2: Register = Register(2);
    pub const R3: Register = Register(3);
    pub const R4: Register = Register(4);
    pub const R5: Register = Register(5);
    pub const R6: Register = Register(6);
    pub const R7: Register = Register(7);
}

/// A single UM instruction in symbolic form.
///
/// Three-register instructions take their operands in `(a, b, c)` order. The
/// instructions that ignore some of the three fields only carry the ones
/// they read, and the encoder leaves the rest zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ins {
    /// `a <- b` when `c` is non-zero.
    Cmov(Register, Register, Register),
    /// `a <- memory[b][c]`.
    SLoad(Register, Register, Register),
    /// `memory[a][b] <- c`.
    SStore(Register, Register, Register),
    /// `a <- b + c` modulo 2^32.
    Add(Register, Register, Register),
    /// `a <- b * c` modulo 2^32.
    Mul(Register, Register, Register),
    /// `a <- b / c`, unsigned.
    Div(Register, Register, Register),
    /// `a <- !(b & c)`.
    Nand(Register, Register, Register),
    /// Stop the machine.
    Halt,
    /// Map a zeroed segment of `c` words, storing its identifier in `b`.
    Map(Register, Register),
    /// Unmap the segment named by `c`.
    Unmap(Register),
    /// Emit the byte held in `c`.
    Out(Register),
    /// Read a byte into `c`, or all ones on end of stream.
    In(Register),
    /// Replace the program with a copy of segment `b` and jump to `c`.
    LoadP(Register, Register),
    /// Load a 25-bit immediate value into `a`.
    Li(Register, u32),
}
