// tapeforge: self-hosting code generator for the eight-instruction tape machine

use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;

use tapeforge::codegen::constants::LINE_WIDTH;
use tapeforge::codegen::{self, Emitter, RegisterLayout};
use tapeforge::format::wrap_lines;
use tapeforge::machine::{tokenize, Machine, MachineConfig, Op, Program};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the self-hosted interpreter (the default)
    Generate {
        /// Characters per output line
        #[arg(short, long, default_value_t = LINE_WIDTH)]
        width: usize,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a program on the reference machine
    Run {
        program: PathBuf,

        /// Read program input from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long)]
        step_limit: Option<u64>,

        /// Store the program on the tape ahead of its data, as the generated
        /// interpreter does
        #[arg(long)]
        on_tape: bool,
    },

    /// Run a program through the generated interpreter
    Selfhost {
        program: PathBuf,

        /// Read program input from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long)]
        step_limit: Option<u64>,
    },

    /// Print the register layout of the generated interpreter
    Layout,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let command = args.command.unwrap_or(Command::Generate {
        width: LINE_WIDTH,
        output: None,
    });

    if let Err(e) = execute(command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Generate { width, output } => {
            let program = codegen::generate_interpreter();
            info!("generated {} instructions", program.len());
            let text = wrap_lines(program.as_str(), width);
            match output {
                Some(path) => fs::write(path, text)?,
                None => io::stdout().lock().write_all(text.as_bytes())?,
            }
        }
        Command::Run {
            program,
            input,
            step_limit,
            on_tape,
        } => {
            let source = fs::read_to_string(&program)?;
            let mut machine = Machine::new(MachineConfig { step_limit });
            let input = open_input(Vec::new(), input.as_deref())?;
            if on_tape {
                let ops: Vec<Op> = tokenize(&source).collect();
                machine.run_on_tape(&ops, input, io::stdout().lock())?;
            } else {
                machine.run(&Program::parse(&source), input, io::stdout().lock())?;
            }
            info!("finished after {} steps", machine.steps());
        }
        Command::Selfhost {
            program,
            input,
            step_limit,
        } => {
            let source = fs::read(&program)?;
            let interpreter = Program::parse(codegen::generate_interpreter().as_str());
            let mut machine = Machine::new(MachineConfig { step_limit });
            let input = open_input(codegen::self_hosted_input(&source, &[]), input.as_deref())?;
            machine.run(&interpreter, input, io::stdout().lock())?;
            info!("finished after {} steps", machine.steps());
        }
        Command::Layout => {
            let mut emitter = Emitter::new();
            let layout = RegisterLayout::allocate(&mut emitter);
            let mut registers: Vec<_> = layout.table().into_iter().collect();
            registers.sort_by_key(|(_, register)| register.base);
            for (name, register) in registers {
                println!("{:<13} base {:>3}  width {}", name, register.base, register.width);
            }
            println!("first element at {}", layout.element(0));
        }
    }
    Ok(())
}

/// `prefix` followed by the input file, or by stdin when there is none
fn open_input(prefix: Vec<u8>, input: Option<&Path>) -> io::Result<Box<dyn Read>> {
    let prefix = Cursor::new(prefix);
    Ok(match input {
        Some(path) => Box::new(prefix.chain(Cursor::new(fs::read(path)?))),
        None => Box::new(prefix.chain(io::stdin())),
    })
}
