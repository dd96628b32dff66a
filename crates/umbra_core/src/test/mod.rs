mod mem;

use crate::cpu::Fault;
use crate::mem::Memory;
use crate::Machine;

use umbra_asm::Ins;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Assemble `program`, run it to halt and return the machine together with
/// everything it wrote to the byte sink. Panics if the machine faults.
pub fn run_code(program: &[Ins]) -> (Machine, Vec<u8>) {
    run_code_with_input(program, &[])
}

pub fn run_code_with_input(program: &[Ins], input: &[u8]) -> (Machine, Vec<u8>) {
    let words = match umbra_asm::assemble(program) {
        Ok(words) => words,
        Err(error) => panic!("{error}"),
    };

    let output = Rc::new(RefCell::new(Vec::new()));
    let source = Rc::new(RefCell::new(VecDeque::from(input.to_vec())));

    let mut machine = Machine::new(Memory::with_program(words), source, output.clone());
    machine.run().expect("machine faulted");

    let bytes = output.borrow().clone();
    (machine, bytes)
}

/// Run raw instruction words with no I/O attached, returning whatever the
/// machine ends with. Used to exercise fault paths.
pub fn run_words(words: Vec<u32>) -> Result<(), Fault> {
    let mut machine = Machine::new(
        Memory::with_program(words),
        Rc::new(RefCell::new(())),
        Rc::new(RefCell::new(())),
    );
    machine.run()
}

/// Like [`run_words`], starting from an assembled program.
pub fn run_code_fault(program: &[Ins]) -> Fault {
    let words = umbra_asm::assemble(program).expect("assembly failed");
    run_words(words).expect_err("machine halted without faulting")
}
