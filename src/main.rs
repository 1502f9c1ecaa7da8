use std::{
    fs::{read_to_string, OpenOptions},
    io::{self, BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use log::info;

use go2ts::{
    compiler::compiler::{compile, CompileOptions},
    display_error,
    errors::errors::Error,
    parser::parser::parse,
    preprocess::preprocess,
};

#[derive(Parser)]
#[command(name = "go2ts", version, about = "Translate a subset of Go into TypeScript")]
struct Cli {
    /// Go source file to translate
    input: PathBuf,

    /// Write the TypeScript here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append to the output file instead of truncating it
    #[arg(long, requires = "output")]
    append: bool,

    /// Emit `main();` after the program when it defines `main`
    #[arg(long)]
    call_main: bool,

    /// Indent with this many spaces instead of a tab
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Append diagnostic log lines to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: &Option<PathBuf>) -> Result<(), Error> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn open_output(cli: &Cli) -> Result<Box<dyn Write>, Error> {
    match &cli.output {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(cli.append)
                .truncate(!cli.append)
                .open(path)?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli.log_file) {
        eprintln!("Error: {}", error);
        return ExitCode::FAILURE;
    }

    let file_name = cli.input.to_string_lossy().to_string();
    let source = match read_to_string(&cli.input) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: {} ({})", Error::from(error), file_name);
            return ExitCode::FAILURE;
        }
    };

    let options = CompileOptions {
        indent: cli
            .indent
            .map(|width| " ".repeat(width))
            .unwrap_or_else(|| String::from("\t")),
        call_main: cli.call_main,
    };

    let start = Instant::now();
    let source = preprocess(&source);
    info!("Preprocessed in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let program = match parse(source.clone(), Some(file_name.clone())) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &source, &file_name);
            return ExitCode::FAILURE;
        }
    };
    info!("Parsed in {:?}", parse_start.elapsed());

    let compile_start = Instant::now();
    let result = open_output(&cli).and_then(|out| compile(&program, out, &options));
    if let Err(error) = result {
        display_error(&error, &source, &file_name);
        return ExitCode::FAILURE;
    }
    info!("Emitted in {:?}", compile_start.elapsed());
    info!("Total time: {:?}", start.elapsed());

    ExitCode::SUCCESS
}
