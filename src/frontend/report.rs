// Pretty error reporting with source highlighting using ariadne

use super::{Listing, SyntaxError};
use crate::backend::regalloc::RegAllocError;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::ops::Range;

/// Report syntax errors with source highlighting
pub fn report_syntax_errors(filename: &str, source: &str, errors: &[SyntaxError]) {
    for error in errors {
        if let Err(e) = build_syntax_report(error, true).eprint(Source::from(source)) {
            eprintln!("{}: {} ({})", filename, error, e);
        }
    }
}

/// Report a register allocation error, highlighting the offending instructions
/// when the error points at any
pub fn report_alloc_error(filename: &str, source: &str, listing: &Listing, error: &RegAllocError) {
    match build_alloc_report(error, listing, true) {
        Some(report) => {
            if let Err(e) = report.eprint(Source::from(source)) {
                eprintln!("{}: {} ({})", filename, error, e);
            }
        }
        None => eprintln!("{}: {}", filename, error),
    }
}

/// Render a syntax error without colours, as the terminal would show it
pub fn render_syntax_error(source: &str, error: &SyntaxError) -> String {
    render(build_syntax_report(error, false), source)
}

/// Render a register allocation error without colours
pub fn render_alloc_error(source: &str, listing: &Listing, error: &RegAllocError) -> Option<String> {
    build_alloc_report(error, listing, false).map(|report| render(report, source))
}

fn render(report: Report<'static, Range<usize>>, source: &str) -> String {
    let mut buf = Vec::new();
    match report.write(Source::from(source), &mut buf) {
        Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
        Err(e) => format!("<unable to render report: {}>", e),
    }
}

fn build_syntax_report(error: &SyntaxError, color: bool) -> Report<'static, Range<usize>> {
    let span = error.span.start..error.span.end;
    Report::build(ReportKind::Error, span.clone())
        .with_config(Config::default().with_color(color))
        .with_code("E001")
        .with_message("Syntax error in IR listing")
        .with_label(
            Label::new(span)
                .with_message(error.message.clone())
                .with_color(Color::Red),
        )
        .with_help("Each line holds one instruction, e.g. `t2 = add t0, t1` or `jz t2, done`")
        .finish()
}

/// Build an ariadne Report from a RegAllocError, if it has a source location
fn build_alloc_report(
    error: &RegAllocError,
    listing: &Listing,
    color: bool,
) -> Option<Report<'static, Range<usize>>> {
    let config = Config::default().with_color(color);
    let range = |position: usize| listing.span_of(position).map(|s| s.start..s.end);

    match error {
        RegAllocError::DuplicateLabel {
            name,
            first,
            second,
        } => {
            let first_span = range(*first)?;
            let second_span = range(*second)?;
            Some(
                Report::build(ReportKind::Error, second_span.clone())
                    .with_config(config)
                    .with_code("E101")
                    .with_message(format!("Label `{}` is defined more than once", name))
                    .with_label(
                        Label::new(first_span)
                            .with_message("first defined here")
                            .with_color(Color::Blue),
                    )
                    .with_label(
                        Label::new(second_span)
                            .with_message("redefined here")
                            .with_color(Color::Red),
                    )
                    .with_help("Every label name must appear in at most one label instruction")
                    .finish(),
            )
        }

        RegAllocError::UnknownLabel { name, position } => {
            let span = range(*position)?;
            Some(
                Report::build(ReportKind::Error, span.clone())
                    .with_config(config)
                    .with_code("E102")
                    .with_message(format!("Jump to undefined label `{}`", name))
                    .with_label(
                        Label::new(span)
                            .with_message("no label instruction defines this target")
                            .with_color(Color::Red),
                    )
                    .finish(),
            )
        }

        RegAllocError::AllocationFailure {
            registers,
            uncolorable,
        } => {
            // Point at every definition of the temps simplify got stuck on
            let defs: Vec<Range<usize>> = listing
                .commands
                .iter()
                .enumerate()
                .filter(|(_, cmd)| cmd.def().is_some_and(|d| uncolorable.contains(&d)))
                .filter_map(|(position, _)| range(position))
                .collect();
            let primary = defs.first().cloned()?;
            let names: Vec<String> = uncolorable.iter().map(|t| t.to_string()).collect();

            let mut report = Report::build(ReportKind::Error, primary)
                .with_config(config)
                .with_code("E201")
                .with_message(format!(
                    "Cannot color {{{}}} with {} register(s)",
                    names.join(", "),
                    registers
                ));
            for span in defs {
                report = report.with_label(
                    Label::new(span)
                        .with_message("defined while too many others are live")
                        .with_color(Color::Red),
                );
            }
            Some(
                report
                    .with_note("Spilling is not supported; shorten live ranges or add registers")
                    .finish(),
            )
        }

        RegAllocError::PositionOutOfRange { .. }
        | RegAllocError::TempNotInGraph { .. }
        | RegAllocError::InvalidRegisterPool { .. } => None,
    }
}
