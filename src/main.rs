//! Command line entry point: load a program image and run the machine until
//! it halts.

use umbra_core::{image, Fault, Machine};

use log::LevelFilter;

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("usage: umbra <program.um>")]
    Usage,

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("machine fault: {0}")]
    Fault(#[from] Fault),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Usage | CliError::Image(..) => ExitCode::from(1),
            CliError::Fault(..) => ExitCode::from(2),
        }
    }
}

fn run() -> Result<(), CliError> {
    let mut args = std::env::args_os().skip(1);
    let path = match (args.next(), args.next()) {
        (Some(path), None) => PathBuf::from(path),
        _ => return Err(CliError::Usage),
    };

    let mem = image::load(&path)?;

    let input = Rc::new(RefCell::new(std::io::stdin()));
    let output = Rc::new(RefCell::new(std::io::stdout()));

    Machine::new(mem, input, output).run()?;

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .format(|f, record| writeln!(f, "{}: {}", record.level(), record.args()))
        .filter(None, LevelFilter::Warn)
        .parse_default_env()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    }
}
