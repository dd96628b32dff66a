//! Emulation of the Universal Machine: a minimal sequential register machine
//! with eight 32-bit registers and a segmented main memory, executing
//! programs of 32-bit instruction words.

#[macro_use]
extern crate log;

#[cfg(test)]
mod test;

pub mod cpu;
pub mod io;
pub mod mem;

pub use cpu::{Fault, Machine, Status};
pub use io::{ByteSink, ByteSource};
pub use mem::image;
pub use mem::{MemFault, Memory};
