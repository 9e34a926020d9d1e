use clap::{Arg, ArgAction, ArgMatches, Command, error::ErrorKind, value_parser};
use log::LevelFilter;
use mips_regalloc::backend::RegisterPool;
use std::ffi::OsString;
use std::fs;

/// Configuration for the CLI application
#[derive(Debug)]
pub struct Config {
    pub file_path: String,
    pub pool: RegisterPool,
    pub show_liveness: bool,
    pub show_graph: bool,
    pub verbosity: u8,
}

fn command() -> Command {
    Command::new("mips-regalloc")
        .about("Liveness analysis and graph-colouring register allocation for IR listings")
        .arg(Arg::new("file").required(true).help("IR listing to allocate"))
        .arg(
            Arg::new("registers")
                .short('k')
                .long("registers")
                .value_name("K")
                .value_parser(value_parser!(usize))
                .conflicts_with("regs")
                .help("Allocate from $t0..$t{K-1} instead of the MIPS temporaries"),
        )
        .arg(
            Arg::new("regs")
                .long("regs")
                .value_name("NAMES")
                .value_delimiter(',')
                .help("Comma-separated register names, in allocation order"),
        )
        .arg(
            Arg::new("liveness")
                .long("liveness")
                .action(ArgAction::SetTrue)
                .help("Print in/out sets for every instruction"),
        )
        .arg(
            Arg::new("graph")
                .long("graph")
                .action(ArgAction::SetTrue)
                .help("Print the interference graph"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log allocator decisions (-v debug, -vv trace)"),
        )
}

impl Config {
    /// Parse command line arguments, exiting with usage on error
    pub fn from_args() -> Self {
        match Self::try_from_iter(std::env::args_os()) {
            Ok(config) => config,
            Err(e) => e.exit(),
        }
    }

    pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut cmd = command();
        let matches = cmd.try_get_matches_from_mut(args)?;
        let pool = register_pool(&matches)
            .map_err(|e| cmd.error(ErrorKind::ValueValidation, e.to_string()))?;

        Ok(Config {
            file_path: matches
                .get_one::<String>("file")
                .cloned()
                .unwrap_or_default(),
            pool,
            show_liveness: matches.get_flag("liveness"),
            show_graph: matches.get_flag("graph"),
            verbosity: matches.get_count("verbose"),
        })
    }

    /// Log level selected by `-v`; `RUST_LOG` still overrides it
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn register_pool(
    matches: &ArgMatches,
) -> Result<RegisterPool, mips_regalloc::backend::RegAllocError> {
    if let Some(k) = matches.get_one::<usize>("registers") {
        return RegisterPool::with_size(*k);
    }
    match matches.get_many::<String>("regs") {
        Some(names) => RegisterPool::new(names.map(|name| name.trim())),
        None => Ok(RegisterPool::mips()),
    }
}

/// Read the source file from the given path
pub fn read_source_file(file_path: &str) -> Result<String, String> {
    fs::read_to_string(file_path).map_err(|e| {
        format!(
            "Error reading file '{}': {}\n\n\
            Usage: mips-regalloc [-k K | --regs a,b,c] [--liveness] [--graph] <file>",
            file_path, e
        )
    })
}
