//! A small builder for UM instruction streams. Written mainly to produce
//! test fixtures and program images for the emulator without hand-packing
//! words.

mod gen;
pub mod ins;

pub use gen::{assemble, to_image};
pub use ins::{Ins, Register};

use std::fmt;

#[derive(thiserror::Error, Debug)]
pub struct Error {
    index: usize,
    message: String,
}

impl Error {
    fn new(index: usize, message: impl Into<String>) -> Self {
        Self { index, message: message.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "instruction {}: {}", self.index, self.message)
    }
}
