mod cli;

use cli::{Config, format_allocation, format_graph, format_liveness, read_source_file};
use mips_regalloc::frontend::parse_listing;
use mips_regalloc::frontend::report::{report_alloc_error, report_syntax_errors};
use mips_regalloc::pipeline;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse configuration
    let config = Config::from_args();

    env_logger::Builder::new()
        .filter_level(config.log_level())
        .parse_default_env()
        .init();

    // Read the source file
    let src = match read_source_file(&config.file_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let listing = match parse_listing(&src) {
        Ok(listing) => listing,
        Err(errors) => {
            report_syntax_errors(&config.file_path, &src, &errors);
            return ExitCode::FAILURE;
        }
    };

    println!("{}: {} instruction(s), {} register(s) {}",
        config.file_path,
        listing.commands.len(),
        config.pool.len(),
        config.pool
    );

    let output = match pipeline::run(&listing.commands, &config.pool) {
        Ok(output) => output,
        Err(e) => {
            report_alloc_error(&config.file_path, &src, &listing, &e);
            return ExitCode::FAILURE;
        }
    };

    if config.show_liveness {
        println!("\nLiveness:");
        println!("{}", "-".repeat(60));
        print!("{}", format_liveness(&listing.commands, &output.liveness));
    }

    if config.show_graph {
        println!("\nInterference graph:");
        println!("{}", "-".repeat(60));
        print!("{}", format_graph(&output.graph));
    }

    println!("\nAllocation:");
    println!("{}", "-".repeat(60));
    print!("{}", format_allocation(&output.allocation));

    ExitCode::SUCCESS
}
