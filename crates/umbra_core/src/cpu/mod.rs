//! The execution engine: a fetch, decode and dispatch loop over segment 0,
//! driving the 14 instructions of the machine.

pub mod opcode;

use umbra_asm::Register;

use crate::io::{ByteSink, ByteSource};
use crate::mem::{MemFault, Memory};

pub use opcode::Opcode;

use thiserror::Error;

use std::cell::RefCell;
use std::rc::Rc;

/// An unrecoverable machine fault. Execution never continues past one of
/// these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("illegal instruction {0:#010x}")]
    IllegalInstruction(u32),

    #[error(transparent)]
    Mem(#[from] MemFault),

    #[error("division by zero")]
    DivisionByZero,

    #[error("output value {0} is not a byte")]
    InvalidOutput(u32),
}

/// Whether the machine can keep running after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Halted,
}

pub struct Machine {
    registers: [u32; 8],
    /// Offset into segment 0 of the next instruction to fetch.
    pub pc: u32,
    pub mem: Memory,
    input: Rc<RefCell<dyn ByteSource>>,
    output: Rc<RefCell<dyn ByteSink>>,
}

impl Machine {
    /// A machine at its initial state: all registers zero, the program
    /// counter at the start of segment 0.
    pub fn new(
        mem: Memory,
        input: Rc<RefCell<dyn ByteSource>>,
        output: Rc<RefCell<dyn ByteSink>>,
    ) -> Self {
        Self {
            registers: [0x0; 8],
            pc: 0x0,
            mem,
            input,
            output,
        }
    }

    pub fn read_reg(&self, idx: Register) -> u32 {
        self.registers[idx.0 as usize]
    }

    fn set_reg(&mut self, idx: Register, value: u32) {
        self.registers[idx.0 as usize] = value;
    }

    /// Run until the program halts or faults.
    pub fn run(&mut self) -> Result<(), Fault> {
        loop {
            match self.step() {
                Ok(Status::Running) => (),
                Ok(Status::Halted) => return Ok(()),
                Err(fault) => {
                    warn!("machine fault: {fault}");
                    return Err(fault);
                }
            }
        }
    }

    /// Fetch and execute the next instruction.
    pub fn step(&mut self) -> Result<Status, Fault> {
        let word = self.mem.load(0, self.pc)?;
        if log_enabled!(log::Level::Trace) {
            trace!("{:06}: {}", self.pc, Opcode::new(word));
        }
        self.pc = self.pc.wrapping_add(1);
        self.exec(Opcode::new(word))
    }

    fn exec(&mut self, op: Opcode) -> Result<Status, Fault> {
        match op.op() {
            0 => self.op_cmov(op),
            1 => self.op_sload(op)?,
            2 => self.op_sstore(op)?,
            3 => self.op_add(op),
            4 => self.op_mul(op),
            5 => self.op_div(op)?,
            6 => self.op_nand(op),
            7 => return Ok(self.op_halt()),
            8 => self.op_map(op),
            9 => self.op_unmap(op)?,
            10 => self.op_out(op)?,
            11 => self.op_in(op),
            12 => self.op_loadp(op)?,
            13 => self.op_li(op),
            _ => return Err(Fault::IllegalInstruction(op.0)),
        }
        Ok(Status::Running)
    }
}

/// Instruction implementations.
impl Machine {
    /// CMOV - Conditional move.
    fn op_cmov(&mut self, op: Opcode) {
        if self.read_reg(op.c()) != 0 {
            self.set_reg(op.a(), self.read_reg(op.b()));
        }
    }

    /// SLOAD - Segmented load.
    fn op_sload(&mut self, op: Opcode) -> Result<(), Fault> {
        let word = self.mem.load(self.read_reg(op.b()), self.read_reg(op.c()))?;
        self.set_reg(op.a(), word);
        Ok(())
    }

    /// SSTORE - Segmented store.
    fn op_sstore(&mut self, op: Opcode) -> Result<(), Fault> {
        self.mem.store(
            self.read_reg(op.a()),
            self.read_reg(op.b()),
            self.read_reg(op.c()),
        )?;
        Ok(())
    }

    /// ADD - Addition modulo 2^32.
    fn op_add(&mut self, op: Opcode) {
        let val = self.read_reg(op.b()).wrapping_add(self.read_reg(op.c()));
        self.set_reg(op.a(), val);
    }

    /// MUL - Multiplication modulo 2^32.
    fn op_mul(&mut self, op: Opcode) {
        let val = self.read_reg(op.b()).wrapping_mul(self.read_reg(op.c()));
        self.set_reg(op.a(), val);
    }

    /// DIV - Unsigned division. Dividing by zero is fatal.
    fn op_div(&mut self, op: Opcode) -> Result<(), Fault> {
        let lhs = self.read_reg(op.b());
        let rhs = self.read_reg(op.c());
        if rhs == 0 {
            return Err(Fault::DivisionByZero);
        }
        self.set_reg(op.a(), lhs / rhs);
        Ok(())
    }

    /// NAND - Bitwise not-and.
    fn op_nand(&mut self, op: Opcode) {
        let val = !(self.read_reg(op.b()) & self.read_reg(op.c()));
        self.set_reg(op.a(), val);
    }

    /// HALT - Release all memory and stop the machine.
    fn op_halt(&mut self) -> Status {
        self.mem.free();
        Status::Halted
    }

    /// MAP - Map a zeroed segment of `c` words, identifier into `b`.
    fn op_map(&mut self, op: Opcode) {
        let id = self.mem.map(self.read_reg(op.c()));
        self.set_reg(op.b(), id);
    }

    /// UNMAP - Unmap the segment named by `c`.
    fn op_unmap(&mut self, op: Opcode) -> Result<(), Fault> {
        self.mem.unmap(self.read_reg(op.c()))?;
        Ok(())
    }

    /// OUT - Emit the byte held in `c`. Values above 255 are fatal.
    fn op_out(&mut self, op: Opcode) -> Result<(), Fault> {
        let val = self.read_reg(op.c());
        if val > 255 {
            return Err(Fault::InvalidOutput(val));
        }
        self.output.borrow_mut().put_byte(val as u8);
        Ok(())
    }

    /// IN - Read one byte into `c`, or all ones on end of stream.
    fn op_in(&mut self, op: Opcode) {
        let val = match self.input.borrow_mut().get_byte() {
            Some(byte) => byte.into(),
            None => u32::MAX,
        };
        self.set_reg(op.c(), val);
    }

    /// LOADP - Replace the program with a copy of segment `b` and jump.
    ///
    /// The assignment to `pc` replaces the increment done at fetch, so the
    /// next fetch reads segment 0 at exactly `c`.
    fn op_loadp(&mut self, op: Opcode) -> Result<(), Fault> {
        let src = self.read_reg(op.b());
        if src != 0 {
            self.mem.load_program(src)?;
        }
        self.pc = self.read_reg(op.c());
        Ok(())
    }

    /// LI - Load the immediate value into its register.
    fn op_li(&mut self, op: Opcode) {
        self.set_reg(op.imm_reg(), op.imm());
    }
}
