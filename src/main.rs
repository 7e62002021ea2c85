use clap::value_parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, info, Level};

use htmlfmt::config::Configuration;
use htmlfmt::formatting::{self, Identity, Range, Terminal};
use htmlfmt::parsing;

mod problem;

#[derive(Eq, Debug, PartialEq)]
enum Output {
    Native,
    Silent,
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let filename = || {
        Arg::new("filename")
            .required(true)
            .help("The HTML file you want to format.")
    };
    let settings = || {
        Arg::new("settings")
            .long("settings")
            .value_name("file.json")
            .help("Read formatting options from the given JSON file. Options not mentioned keep their defaults.")
    };

    let matches = Command::new("htmlfmt")
        .version(VERSION)
        .propagate_version(true)
        .about("A code formatter for HTML and XHTML documents.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Report what the formatter is doing."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit detailed diagnostics about parsing and layout decisions."),
        )
        .subcommand(
            Command::new("check")
                .about("Check that the given file is already formatted")
                .arg(settings())
                .arg(filename()),
        )
        .subcommand(
            Command::new("format")
                .about("Code format the given file")
                .arg(settings())
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_name("columns")
                        .value_parser(value_parser!(usize))
                        .help("The right margin; lines are wrapped to fit within it where possible."),
                )
                .arg(
                    Arg::new("indent")
                        .long("indent")
                        .value_name("columns")
                        .value_parser(value_parser!(usize))
                        .help("Number of columns by which child elements are indented."),
                )
                .arg(
                    Arg::new("range")
                        .long("range")
                        .value_name("start..end")
                        .help("Only reformat the nodes covering this range of byte offsets."),
                )
                .arg(
                    Arg::new("in-place")
                        .long("in-place")
                        .action(ArgAction::SetTrue)
                        .help("Write the result back to the file rather than to standard output."),
                )
                .arg(
                    Arg::new("raw-control-chars")
                        .short('R')
                        .long("raw-control-chars")
                        .action(ArgAction::SetTrue)
                        .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
                )
                .arg(filename()),
        )
        .get_matches();

    let level = match matches.subcommand() {
        Some((_, submatches)) if submatches.get_flag("debug") => Level::DEBUG,
        Some((_, submatches)) if submatches.get_flag("verbose") => Level::INFO,
        _ => Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let filename = filename_from(submatches);
            let config = settings_from(submatches);

            info!(?filename, "Checking");
            let content = load(filename);
            let result = format(filename, &content, &config, None, &Identity, Output::Native);

            if result == content {
                info!("Already formatted");
                return;
            }

            let (line, column) = first_difference(&content, &result);
            eprintln!(
                "{}: {}:{}:{} {}",
                "error".bright_red(),
                filename.to_string_lossy(),
                line,
                column,
                "File is not formatted".bold()
            );
            std::process::exit(1);
        }
        Some(("format", submatches)) => {
            let filename = filename_from(submatches);
            let mut config = settings_from(submatches);

            if let Some(width) = submatches.get_one::<usize>("width") {
                config.right_margin = *width;
            }
            if let Some(indent) = submatches.get_one::<usize>("indent") {
                config.indent_size = *indent;
            }

            let range = match submatches.get_one::<String>("range") {
                Some(text) => match parse_range(text) {
                    Some(range) => Some(range),
                    None => {
                        eprintln!(
                            "{}: invalid range {:?}; expected <start>..<end>",
                            "error".bright_red(),
                            text
                        );
                        std::process::exit(2);
                    }
                },
                None => None,
            };

            let in_place = submatches.get_flag("in-place");
            let raw_output = submatches.get_flag("raw-control-chars");

            info!(?filename, ?range, in_place, "Formatting");
            let content = load(filename);

            if in_place {
                let result = format(filename, &content, &config, range, &Identity, Output::Native);
                if result == content {
                    debug!("Unchanged; not writing");
                    return;
                }
                if let Err(error) = std::fs::write(filename, result) {
                    eprintln!(
                        "{}: {}: {}",
                        "error".bright_red(),
                        filename.display(),
                        error
                    );
                    std::process::exit(1);
                }
                return;
            }

            let result = if raw_output
                || std::io::stdout()
                    .lock()
                    .is_terminal()
            {
                format(filename, &content, &config, range, &Terminal, Output::Native)
            } else {
                format(filename, &content, &config, range, &Identity, Output::Silent)
            };

            print!("{}", result);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: htmlfmt [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn filename_from(submatches: &ArgMatches) -> &Path {
    match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => {
            // clap enforces required(true)
            eprintln!("{}: no filename given", "error".bright_red());
            std::process::exit(2);
        }
    }
}

fn settings_from(submatches: &ArgMatches) -> Configuration {
    let path = match submatches.get_one::<String>("settings") {
        Some(path) => Path::new(path),
        None => return Configuration::default(),
    };

    match Configuration::load(path) {
        Ok(config) => config,
        Err(error) => {
            let message = if std::io::stderr().is_terminal() {
                problem::full_configuration_error(&error, path, &Terminal)
            } else {
                problem::full_configuration_error(&error, path, &Identity)
            };
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

fn load(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn format(
    filename: &Path,
    content: &str,
    config: &Configuration,
    range: Option<Range>,
    renderer: &impl formatting::Render,
    output: Output,
) -> String {
    match formatting::format_with_renderer(renderer, content, config, range) {
        Ok(result) => result,
        Err(error) => {
            let message = match output {
                Output::Native => problem::full_formatting_error(&error, filename, content, renderer),
                Output::Silent => problem::concise_formatting_error(&error, filename, content, renderer),
            };
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

/// Parse `<start>..<end>` into a byte range.
fn parse_range(text: &str) -> Option<Range> {
    let (start, end) = text.split_once("..")?;
    let start = start
        .trim()
        .parse::<usize>()
        .ok()?;
    let end = end
        .trim()
        .parse::<usize>()
        .ok()?;
    Some(Range::new(start, end))
}

/// Line and column (both counting from one) of the first place the two
/// texts differ.
fn first_difference(original: &str, formatted: &str) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (a, b) in original
        .chars()
        .zip(formatted.chars())
    {
        if a != b {
            break;
        }
        if a == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
