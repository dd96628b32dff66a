//! Decoding of UM instruction words.
//!
//! Every instruction is encoded in 32 bits:
//!
//! - Bits `[31:28]` hold the opcode, 0 through 13.
//!
//! - Load-immediate (opcode 13) carries a register index in bits `[27:25]`
//!   and a 25-bit immediate value in bits `[24:0]`.
//!
//! - Every other instruction carries three register indices in bits `[8:6]`,
//!   `[5:3]` and `[2:0]`; bits `[27:9]` are never inspected.

use umbra_asm::Register;
use umbra_util::Bit;

use std::fmt;

#[derive(Clone, Copy)]
pub struct Opcode(pub(super) u32);

impl Opcode {
    pub fn new(word: u32) -> Self {
        Opcode(word)
    }

    /// Operation.
    pub fn op(self) -> u32 {
        self.0.bit_range(28, 31)
    }

    /// Register A of a three-register instruction.
    pub fn a(self) -> Register {
        Register::from(self.0.bit_range(6, 8))
    }

    /// Register B of a three-register instruction.
    pub fn b(self) -> Register {
        Register::from(self.0.bit_range(3, 5))
    }

    /// Register C of a three-register instruction.
    pub fn c(self) -> Register {
        Register::from(self.0.bit_range(0, 2))
    }

    /// Destination register of load-immediate.
    pub fn imm_reg(self) -> Register {
        Register::from(self.0.bit_range(25, 27))
    }

    /// Immediate value of load-immediate, zero-extended to 32 bits.
    pub fn imm(self) -> u32 {
        self.0.bit_range(0, 24)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op() {
            0 => write!(f, "cmov {} {} {}", self.a(), self.b(), self.c()),
            1 => write!(f, "sload {} {} {}", self.a(), self.b(), self.c()),
            2 => write!(f, "sstore {} {} {}", self.a(), self.b(), self.c()),
            3 => write!(f, "add {} {} {}", self.a(), self.b(), self.c()),
            4 => write!(f, "mul {} {} {}", self.a(), self.b(), self.c()),
            5 => write!(f, "div {} {} {}", self.a(), self.b(), self.c()),
            6 => write!(f, "nand {} {} {}", self.a(), self.b(), self.c()),
            7 => write!(f, "halt"),
            8 => write!(f, "map {} {}", self.b(), self.c()),
            9 => write!(f, "unmap {}", self.c()),
            10 => write!(f, "out {}", self.c()),
            11 => write!(f, "in {}", self.c()),
            12 => write!(f, "loadp {} {}", self.b(), self.c()),
            13 => write!(f, "li {} {:#x}", self.imm_reg(), self.imm()),
            _ => write!(f, "illegal"),
        }
    }
}
