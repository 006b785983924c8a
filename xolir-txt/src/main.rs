use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xolir_txt::report::{Detail, Summary};
use xolir_txt::{Error, parser};

#[derive(Parser)]
#[command(name = "xolir-txt")]
#[command(about = "Reads the XOLIR text format and summarizes the program", version)]
struct Cli {
    /// Исходник (stdin, если не указан)
    input: Option<PathBuf>,

    /// Показать токены
    #[arg(long)]
    tokens: bool,

    /// Показать ast
    #[arg(long)]
    ast: bool,

    /// Показать ast в JSON
    #[arg(long)]
    json: bool,

    /// Список типов и функций с позициями
    #[arg(long)]
    detail: bool,

    /// Подробнее логировать (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let source = read_source(cli.input.as_ref())?;

    if cli.tokens {
        println!("=== TOKENS ===");
        for token in parser::lexer::tokenize(&source)? {
            if !token.kind.is_trivia() {
                println!("{:?}", token);
            }
        }
    }

    let program = parser::parse(&source)?;

    if cli.ast {
        println!("=== AST ===");
        println!("{:#?}", program);
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&program)?);
    }

    print!("{}", Summary(&program));
    if cli.detail {
        print!("{}", Detail(&program));
    }
    Ok(())
}

fn read_source(input: Option<&PathBuf>) -> Result<String, Error> {
    let source = match input {
        Some(path) => {
            info!("Reading {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            info!("Reading stdin");
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };
    Ok(source)
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
