use umbra_util::BitSet;

use crate::ins::{Ins, Register};
use crate::Error;

/// The widest value load-immediate can carry.
const MAX_IMMEDIATE: u32 = (1 << 25) - 1;

/// A builder struct to build binary instructions.
#[derive(Clone, Copy)]
struct InsBuilder(u32);

impl InsBuilder {
    fn op(val: u32) -> Self {
        Self(0_u32.set_bit_range(28, 31, val))
    }

    fn a(self, reg: Register) -> Self {
        Self(self.0.set_bit_range(6, 8, reg.0.into()))
    }

    fn b(self, reg: Register) -> Self {
        Self(self.0.set_bit_range(3, 5, reg.0.into()))
    }

    fn c(self, reg: Register) -> Self {
        Self(self.0.set_bit_range(0, 2, reg.0.into()))
    }

    fn imm_reg(self, reg: Register) -> Self {
        Self(self.0.set_bit_range(25, 27, reg.0.into()))
    }

    fn imm(self, val: u32) -> Self {
        Self(self.0.set_bit_range(0, 24, val))
    }
}

fn encode(index: usize, ins: Ins) -> Result<u32, Error> {
    let word = match ins {
        Ins::Cmov(a, b, c) => InsBuilder::op(0).a(a).b(b).c(c),
        Ins::SLoad(a, b, c) => InsBuilder::op(1).a(a).b(b).c(c),
        Ins::SStore(a, b, c) => InsBuilder::op(2).a(a).b(b).c(c),
        Ins::Add(a, b, c) => InsBuilder::op(3).a(a).b(b).c(c),
        Ins::Mul(a, b, c) => InsBuilder::op(4).a(a).b(b).c(c),
        Ins::Div(a, b, c) => InsBuilder::op(5).a(a).b(b).c(c),
        Ins::Nand(a, b, c) => InsBuilder::op(6).a(a).b(b).c(c),
        Ins::Halt => InsBuilder::op(7),
        Ins::Map(b, c) => InsBuilder::op(8).b(b).c(c),
        Ins::Unmap(c) => InsBuilder::op(9).c(c),
        Ins::Out(c) => InsBuilder::op(10).c(c),
        Ins::In(c) => InsBuilder::op(11).c(c),
        Ins::LoadP(b, c) => InsBuilder::op(12).b(b).c(c),
        Ins::Li(a, val) => {
            if val > MAX_IMMEDIATE {
                return Err(Error::new(
                    index,
                    format!("immediate value {val:#x} exceeds 25 bits"),
                ));
            }
            InsBuilder::op(13).imm_reg(a).imm(val)
        }
    };
    Ok(word.0)
}

/// Assemble the program into instruction words.
pub fn assemble(program: &[Ins]) -> Result<Vec<u32>, Error> {
    program
        .iter()
        .enumerate()
        .map(|(index, ins)| encode(index, *ins))
        .collect()
}

/// Assemble the program and serialize it in the big-endian program image
/// format the loader consumes.
pub fn to_image(program: &[Ins]) -> Result<Vec<u8>, Error> {
    let words = assemble(program)?;
    let mut image = Vec::with_capacity(words.len() * 4);
    for word in words {
        image.extend_from_slice(&word.to_be_bytes());
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_register_encoding() {
        let words = assemble(&[
            Ins::Add(Register::R3, Register::R1, Register::R2),
            Ins::Halt,
        ])
        .unwrap();
        assert_eq!(words, vec![0x3000_00ca, 0x7000_0000]);
    }

    #[test]
    fn load_immediate_encoding() {
        let words = assemble(&[Ins::Li(Register::R1, 48)]).unwrap();
        assert_eq!(words, vec![0xd200_0030]);
    }

    #[test]
    fn unused_fields_stay_zero() {
        let words = assemble(&[
            Ins::Unmap(Register::R3),
            Ins::Out(Register::R7),
            Ins::Map(Register::R2, Register::R3),
        ])
        .unwrap();
        assert_eq!(words, vec![0x9000_0003, 0xa000_0007, 0x8000_0013]);
    }

    #[test]
    fn immediate_overflow() {
        let err = assemble(&[Ins::Li(Register::R0, 1 << 25)]).unwrap_err();
        assert!(err.to_string().contains("exceeds 25 bits"));
    }

    #[test]
    fn image_is_big_endian() {
        let image = to_image(&[Ins::Li(Register::R1, 48), Ins::Halt]).unwrap();
        assert_eq!(image, [0xd2, 0x00, 0x00, 0x30, 0x70, 0x00, 0x00, 0x00]);
    }
}
