extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate thiserror;

pub mod assembler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use assembler::error::AsmError;
use assembler::parser::{Parser, Program};

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "out.mib";

/// Settings collected from the command line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    pub source_path: String,
    pub output_path: String,
    pub binary_listing: bool,
    pub quiet: bool,
    pub print_debug: bool,
    pub verbosity: u64,
}

impl Config {
    fn from_matches(args: &ArgMatches) -> Self {
        Config {
            source_path: args.value_of("INPUT").unwrap_or_default().to_owned(),
            output_path: args.value_of("output").unwrap_or(DEFAULT_OUTPUT).to_owned(),
            binary_listing: args.is_present("binary"),
            quiet: args.is_present("quiet"),
            print_debug: args.is_present("print-debug"),
            verbosity: args.occurrences_of("verbose"),
        }
    }
}

fn main() {
    let config = Config::from_matches(&process_arguments());
    initialize_logging(config.verbosity);

    debug!("Arguments:\n\tVerbosity: {}\n\tBinary listing: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(config.verbosity),
        config.binary_listing,
        config.output_path,
        config.source_path
    );

    if let Err(err) = run(&config) {
        error!("fatal: {}", err);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), AsmError> {
    let ipath = Path::new(&config.source_path);

    // Open the path in read-only mode.
    let ifile = File::open(&ipath).map_err(|err| AsmError::Source {
        path: ipath.display().to_string(),
        message: err.to_string(),
    })?;

    let lines = assembler::lexer::read_source(ifile, &config.source_path)?;
    let program = Parser::new().run(lines)?;

    if config.print_debug {
        print_debug(&program);
    }

    if !config.quiet {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        assembler::output::write_listing(&program, config.binary_listing, &mut handle)
            .map_err(|err| AsmError::Output { path: "<stdout>".to_string(), message: err.to_string() })?;
    }

    // Only a fully assembled program ever reaches the output file.
    let opath = Path::new(&config.output_path);
    let output_error = |err: io::Error| AsmError::Output {
        path: opath.display().to_string(),
        message: err.to_string(),
    };
    let ofile = File::create(&opath).map_err(output_error)?;
    assembler::output::write_image(&program, &mut BufWriter::new(ofile)).map_err(output_error)?;

    info!("wrote {} word(s) to `{}`", program.words.len(), opath.display());
    Ok(())
}

fn print_debug(program: &Program) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for emitted in program.words.iter() {
        grid.add(Cell::from(format!("0x{:06X}:", emitted.address)));
        grid.add(Cell::from(format!("{}", emitted.instruction)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(format!("0x{:06X}", emitted.word)));
    }

    println!("{}", grid.fit_into_columns(4));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("mimasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .long("output")
            .takes_value(true)
            .help("write the binary image to an outfile (default: out.mib)"))
        .arg(Arg::with_name("binary")
            .short("b")
            .long("binary")
            .takes_value(false)
            .help("print the listing in binary instead of hexadecimal"))
        .arg(Arg::with_name("quiet")
            .short("q")
            .long("quiet")
            .takes_value(false)
            .help("do not print the listing to STDOUT"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("print-debug")
            .takes_value(false)
            .help("prints the decoded instructions alongside the assembly to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        // STDOUT carries the listing.
        .chain(std::io::stderr())
        .apply().ok();
}
