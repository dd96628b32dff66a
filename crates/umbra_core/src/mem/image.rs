//! Loading of program images.
//!
//! An image is a flat file of big-endian 32-bit words; the first byte of
//! each group of four is bits `[31:24]`. The loader turns the file into a
//! [`Memory`] whose segment 0 holds the words in file order.

use super::Memory;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    #[error("failed to read program image: {0}")]
    Io(#[from] io::Error),

    #[error("invalid program image: {0} bytes is not a multiple of 4")]
    TruncatedWord(usize),

    #[error("invalid program image: empty file")]
    Empty,
}

/// Load a program image from a file.
pub fn load(path: &Path) -> Result<Memory, ImageError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();

    file.read_to_end(&mut bytes)?;

    from_bytes(&bytes)
}

/// Assemble an in-memory image into a loaded [`Memory`].
pub fn from_bytes(bytes: &[u8]) -> Result<Memory, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if bytes.len() % 4 != 0 {
        return Err(ImageError::TruncatedWord(bytes.len()));
    }

    let words: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_be_bytes(chunk.try_into().unwrap()))
        .collect();

    debug!("loaded program image of {} words", words.len());

    Ok(Memory::with_program(words))
}
