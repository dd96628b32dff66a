//! Writes the standard test fixtures for the emulator: for every fixture a
//! `<name>.um` program image, a `<name>.0` stdin file when the program reads
//! input, and a `<name>.1` file holding the expected stdout.

use umbra_asm::{to_image, Ins, Register};

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

struct Fixture {
    name: &'static str,
    /// Bytes fed to the program on stdin. Empty means no input file.
    input: &'static [u8],
    expected: &'static [u8],
    program: fn() -> Vec<Ins>,
}

const FIXTURES: &[Fixture] = &[
    Fixture { name: "halt", input: b"", expected: b"", program: halt },
    Fixture { name: "ensure_halt", input: b"", expected: b"", program: ensure_halt },
    Fixture { name: "add", input: b"", expected: b"d", program: add },
    Fixture { name: "multiply", input: b"", expected: b"d", program: multiply },
    Fixture { name: "divide", input: b"", expected: b"dd", program: divide },
    Fixture { name: "bitwise_nand", input: b"", expected: b"d", program: bitwise_nand },
    Fixture { name: "io", input: b"d", expected: b"d", program: io },
    Fixture { name: "loadval", input: b"", expected: b"da", program: loadval },
    Fixture { name: "conditional_move", input: b"", expected: &[130, 100], program: conditional_move },
    Fixture { name: "map_segment", input: b"", expected: b"d", program: map_segment },
    Fixture { name: "unmap_segment", input: b"", expected: b"#", program: unmap_segment },
    Fixture { name: "load_program", input: b"", expected: b"", program: load_program },
    Fixture { name: "segment_store", input: b"", expected: b"d", program: segment_store },
    Fixture { name: "segment_load", input: b"", expected: b"d", program: segment_load },
];

fn halt() -> Vec<Ins> {
    vec![Ins::Halt]
}

/// Anything after the halt must never run.
fn ensure_halt() -> Vec<Ins> {
    vec![Ins::Halt, Ins::In(Register::R1), Ins::Out(Register::R1)]
}

fn add() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R1, 48),
        Ins::Li(Register::R2, 52),
        Ins::Add(Register::R3, Register::R1, Register::R2),
        Ins::Out(Register::R3),
        Ins::Halt,
    ]
}

fn multiply() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R2, 10),
        Ins::Li(Register::R3, 10),
        Ins::Mul(Register::R1, Register::R2, Register::R3),
        Ins::Out(Register::R1),
        Ins::Halt,
    ]
}

/// Unsigned division truncates: 200/2 and 201/2 both print 100.
fn divide() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R2, 200),
        Ins::Li(Register::R3, 2),
        Ins::Div(Register::R1, Register::R2, Register::R3),
        Ins::Out(Register::R1),
        Ins::Li(Register::R2, 201),
        Ins::Li(Register::R3, 2),
        Ins::Div(Register::R1, Register::R2, Register::R3),
        Ins::Out(Register::R1),
        Ins::Halt,
    ]
}

fn bitwise_nand() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R1, 100),
        Ins::Li(Register::R2, 100),
        Ins::Nand(Register::R4, Register::R1, Register::R2),
        Ins::Nand(Register::R5, Register::R4, Register::R4),
        Ins::Out(Register::R5),
        Ins::Halt,
    ]
}

/// Map 40 segments, map and unmap a 41st, and map again: the returned
/// identifier must be the one just released. Unmapping identifier 35 and
/// printing the reused id gives the printable "#".
fn unmap_segment() -> Vec<Ins> {
    let mut program = vec![Ins::Li(Register::R3, 11)];
    for _ in 0..40 {
        program.push(Ins::Map(Register::R2, Register::R3));
    }
    program.extend([
        Ins::Li(Register::R3, 35),
        Ins::Map(Register::R2, Register::R3),
        Ins::Unmap(Register::R3),
        Ins::Map(Register::R2, Register::R3),
        Ins::Out(Register::R2),
        Ins::Halt,
    ]);
    program
}

/// Copy the halt at the end of segment 0 into a fresh one-word segment and
/// jump into it.
fn load_program() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R3, 1),
        Ins::Map(Register::R2, Register::R3),
        Ins::Li(Register::R1, 0),
        Ins::Li(Register::R2, 9),
        Ins::SLoad(Register::R3, Register::R1, Register::R2),
        Ins::Li(Register::R1, 1),
        Ins::Li(Register::R2, 0),
        Ins::SStore(Register::R1, Register::R2, Register::R3),
        Ins::LoadP(Register::R1, Register::R2),
        Ins::Halt,
    ]
}

fn io() -> Vec<Ins> {
    vec![Ins::In(Register::R2), Ins::Out(Register::R2), Ins::Halt]
}

fn loadval() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R4, 100),
        Ins::Out(Register::R4),
        Ins::Li(Register::R4, 'a' as u32),
        Ins::Out(Register::R4),
        Ins::Halt,
    ]
}

/// One move held back by a zero condition, one that goes through.
fn conditional_move() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R2, 100),
        Ins::Li(Register::R3, 0),
        Ins::Li(Register::R1, 130),
        Ins::Cmov(Register::R1, Register::R2, Register::R3),
        Ins::Out(Register::R1),
        Ins::Li(Register::R3, 20),
        Ins::Cmov(Register::R1, Register::R2, Register::R3),
        Ins::Out(Register::R1),
        Ins::Halt,
    ]
}

fn map_segment() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R3, 11),
        Ins::Li(Register::R1, 0),
        Ins::Li(Register::R2, 0),
        Ins::Map(Register::R2, Register::R3),
        Ins::Li(Register::R1, 1),
        Ins::Li(Register::R2, 10),
        Ins::Li(Register::R3, 100),
        Ins::SStore(Register::R1, Register::R2, Register::R3),
        Ins::Li(Register::R3, 10),
        Ins::SLoad(Register::R2, Register::R1, Register::R3),
        Ins::Out(Register::R2),
        Ins::Halt,
    ]
}

/// Store and load back at the last offset of a fresh segment.
fn segment_store() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R3, 3),
        Ins::Map(Register::R2, Register::R3),
        Ins::Li(Register::R1, 1),
        Ins::Li(Register::R2, 2),
        Ins::Li(Register::R3, 100),
        Ins::SStore(Register::R1, Register::R2, Register::R3),
        Ins::SLoad(Register::R4, Register::R1, Register::R2),
        Ins::Out(Register::R4),
        Ins::Halt,
    ]
}

/// Store and load back at offset zero of a fresh segment.
fn segment_load() -> Vec<Ins> {
    vec![
        Ins::Li(Register::R3, 3),
        Ins::Map(Register::R2, Register::R3),
        Ins::Li(Register::R1, 1),
        Ins::Li(Register::R2, 0),
        Ins::Li(Register::R3, 100),
        Ins::SStore(Register::R1, Register::R2, Register::R3),
        Ins::Li(Register::R2, 1),
        Ins::Li(Register::R3, 0),
        Ins::SLoad(Register::R1, Register::R2, Register::R3),
        Ins::Out(Register::R1),
        Ins::Halt,
    ]
}

fn write_fixture(dir: &Path, fixture: &Fixture) -> Result<(), String> {
    let image = to_image(&(fixture.program)())
        .map_err(|err| format!("{}: {err}", fixture.name))?;

    let path = |ext: &str| dir.join(format!("{}.{ext}", fixture.name));

    let write = |path: PathBuf, bytes: &[u8]| {
        fs::write(&path, bytes).map_err(|err| format!("{}: {err}", path.display()))
    };

    write(path("um"), &image)?;
    if !fixture.input.is_empty() {
        write(path("0"), fixture.input)?;
    }
    write(path("1"), fixture.expected)?;

    Ok(())
}

fn main() -> ExitCode {
    let dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    for fixture in FIXTURES {
        println!("writing fixture '{}'", fixture.name);
        if let Err(err) = write_fixture(&dir, fixture) {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
