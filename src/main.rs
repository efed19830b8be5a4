use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use std::{fs::read_to_string, process::ExitCode};

#[derive(Debug, Parser)]
#[clap(name = "chalkpp", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: ChalkCommand,
}

#[derive(Debug, Subcommand)]
pub enum ChalkCommand {
    /// Print the statement sequence a program tokenizes into.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: StatementFormat,
    },
    /// Execute a program against the standard streams.
    Run {
        path: PathBuf,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum StatementFormat {
    Debug,
    Basic,
}

fn main() -> ExitCode {
    chalkpp_main().expect("Encountered an error!")
}

fn chalkpp_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    let args = CLArgs::parse();
    match args.routine {
        ChalkCommand::Tokenize { path, format } => {
            eprintln!("Tokenizing {:?}...", path);
            let src = read_to_string(path)?;
            tokenize(&src, &format);
        }
        ChalkCommand::Run { path } => {
            eprintln!("Running {:?}...", path);
            let src = read_to_string(path)?;
            run(&src);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn tokenize(src: &str, format: &StatementFormat) {
    use chalkpp::tokenizer::formatter::{
        BasicFormatter, DebugFormatter, StatementFormatter, ToFormatter,
    };

    let program = chalkpp::tokenizer::tokenize(src);
    let formatter: Box<dyn StatementFormatter> = match format {
        StatementFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(
            &program,
        )),
        StatementFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(
            &program,
        )),
    };
    for statement in program.iter() {
        eprintln!("{}", formatter.format(statement));
    }
}

fn run(src: &str) {
    use chalkpp::interpreter::{Interpreter, StdioConsole};

    let program = chalkpp::tokenizer::tokenize(src);
    let mut interpreter = Interpreter::new();
    let mut console = StdioConsole;
    interpreter.run(&program, &mut console);
}
