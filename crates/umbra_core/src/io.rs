//! The byte-oriented I/O boundary of the machine.
//!
//! Only the `out` and `in` instructions touch these traits. Both channels
//! are synchronous; any buffering belongs to the implementation behind the
//! trait.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

/// Destination for bytes emitted by the `out` instruction.
pub trait ByteSink {
    fn put_byte(&mut self, byte: u8);
}

/// Source of bytes for the `in` instruction. `None` is end of stream.
pub trait ByteSource {
    fn get_byte(&mut self) -> Option<u8>;
}

// Implement both for the unit type to easily run without I/O attached.
impl ByteSink for () {
    fn put_byte(&mut self, _: u8) {}
}

impl ByteSource for () {
    fn get_byte(&mut self) -> Option<u8> {
        None
    }
}

impl ByteSink for Vec<u8> {
    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

impl ByteSource for VecDeque<u8> {
    fn get_byte(&mut self) -> Option<u8> {
        self.pop_front()
    }
}

impl ByteSink for io::Stdout {
    fn put_byte(&mut self, byte: u8) {
        let res = self.write_all(&[byte]).and_then(|()| self.flush());
        if let Err(err) = res {
            warn!("dropped output byte: {err}");
        }
    }
}

impl ByteSource for io::Stdin {
    fn get_byte(&mut self) -> Option<u8> {
        let mut byte = 0;
        match self.read(std::slice::from_mut(&mut byte)) {
            Ok(0) => None,
            Ok(..) => Some(byte),
            Err(err) => {
                warn!("treating read error as end of input: {err}");
                None
            }
        }
    }
}
