//! Tony command-line tool for checking Tony documents and dumping their
//! concrete syntax trees.
//!
//! Usage: tony [OPTIONS] [FILE|DIR]
//!
//! Options:
//!   -t, --to <FORMAT>      Output format (sexp, outline, tokens, yaml, cbor, diag)
//!                          [default: sexp]
//!   -w, --write            Write output to file with inferred name
//!   -o, --output <FILE>    Write output to specified file
//!   --check                Report syntax errors (exit 0 if none, 1 otherwise)
//!   --symbols              Print the symbol catalog (text, or TOML with -t toml)
//!   -v, --verbose          Log parser decisions to stderr (-vv for more)
//!   -h, --help             Print help
//!   -V, --version          Print version

use libtony::{encode, parse_with_options, Document, LineIndex, ParseOptions, Symbol};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::process;
use tracing::debug;

mod transcode;

/// Output formats of the command-line tool.
///
/// Trees are rendered by the library; the rest are built here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Tree(libtony::Format),
    Yaml,
    Cbor,
    CborDiag,
    Toml,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut to_format: Option<&str> = None;
    let mut write_back = false;
    let mut output_file: Option<&str> = None;
    let mut check_only = false;
    let mut symbols = false;
    let mut verbosity: u8 = 0;
    let mut input_path: Option<&str> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("tony {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-t" | "--to" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: -t requires a format argument");
                    process::exit(1);
                }
                if parse_format(&args[i]).is_none() {
                    eprintln!("Error: Unknown format: {}", args[i]);
                    process::exit(1);
                }
                to_format = Some(&args[i]);
            }
            "-w" | "--write" => {
                write_back = true;
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires an argument");
                    process::exit(1);
                }
                output_file = Some(&args[i]);
            }
            "--check" => {
                check_only = true;
            }
            "--symbols" => {
                symbols = true;
            }
            "-v" | "--verbose" => {
                verbosity = verbosity.saturating_add(1);
            }
            "-vv" => {
                verbosity = verbosity.saturating_add(2);
            }
            "-" => {
                // Explicit stdin
            }
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                process::exit(1);
            }
            _ => {
                if input_path.is_some() {
                    eprintln!("Error: Multiple input paths not supported");
                    process::exit(1);
                }
                input_path = Some(&args[i]);
            }
        }
        i += 1;
    }

    init_logging(verbosity);

    if write_back && output_file.is_some() {
        eprintln!("Error: --write and --output are mutually exclusive");
        process::exit(1);
    }

    let output_format_str = to_format.unwrap_or("sexp");
    let output_format = match parse_format(output_format_str) {
        Some(format) => format,
        None => {
            eprintln!("Error: Unknown format: {}", output_format_str);
            process::exit(1);
        }
    };

    if symbols {
        if input_path.is_some() || check_only || write_back {
            eprintln!("Error: --symbols takes no input and cannot be combined with --check or --write");
            process::exit(1);
        }
        let output = match output_format {
            OutputFormat::Toml => transcode::toml::encode_symbols(),
            OutputFormat::Tree(_) => symbol_table(),
            _ => {
                eprintln!("Error: --symbols supports only text or -t toml output");
                process::exit(1);
            }
        };
        write_text_output(&output, output_file, false, None, output_format);
        return;
    }

    if output_format == OutputFormat::Toml {
        eprintln!("Error: TOML output is only available with --symbols");
        process::exit(1);
    }

    if let Some(path) = input_path {
        if Path::new(path).is_dir() {
            if output_file.is_some() {
                eprintln!("Error: --output cannot be used with directory input");
                process::exit(1);
            }
            process_directory(path, output_format, write_back, check_only);
            return;
        }
    }

    let raw_bytes: Vec<u8> = match input_path {
        Some(path) => match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    let input = match String::from_utf8(raw_bytes) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: input is not valid UTF-8: {}", e);
            process::exit(1);
        }
    };

    let exit_code = process_input(
        &input,
        input_path,
        output_format,
        output_file,
        write_back,
        check_only,
    );
    process::exit(exit_code);
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn parse_format(s: &str) -> Option<OutputFormat> {
    match s {
        "yaml" | "yml" => Some(OutputFormat::Yaml),
        "cbor" => Some(OutputFormat::Cbor),
        "diag" => Some(OutputFormat::CborDiag),
        "toml" => Some(OutputFormat::Toml),
        _ => libtony::Format::from_name(s).map(OutputFormat::Tree),
    }
}

fn format_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Tree(libtony::Format::SExpression) => "tree",
        OutputFormat::Tree(libtony::Format::Outline) => "outline",
        OutputFormat::Tree(libtony::Format::Tokens) => "tokens",
        OutputFormat::Yaml => "yaml",
        OutputFormat::Cbor => "cbor",
        OutputFormat::CborDiag => "diag",
        OutputFormat::Toml => "toml",
    }
}

fn process_directory(
    dir_path: &str,
    output_format: OutputFormat,
    write_back: bool,
    check_only: bool,
) {
    let entries = match fs::read_dir(dir_path) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error reading directory {}: {}", dir_path, e);
            process::exit(1);
        }
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "tony").unwrap_or(false))
        .collect();
    paths.sort();

    let mut had_errors = false;

    for path in paths {
        let path_str = path.to_string_lossy();
        let input = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading {}: {}", path_str, e);
                had_errors = true;
                continue;
            }
        };

        let exit_code = process_input(
            &input,
            Some(&*path_str),
            output_format,
            None,
            write_back,
            check_only,
        );

        if exit_code != 0 {
            had_errors = true;
        }
    }

    process::exit(if had_errors { 1 } else { 0 });
}

fn process_input(
    input: &str,
    input_file: Option<&str>,
    output_format: OutputFormat,
    output_file: Option<&str>,
    write_back: bool,
    check_only: bool,
) -> i32 {
    let mut options = ParseOptions::new();
    if let Some(name) = input_file.and_then(|p| Path::new(p).file_name()) {
        options = options.filename(name.to_string_lossy());
    }

    let document = parse_with_options(input, &options);
    debug!(
        diagnostics = document.diagnostics().len(),
        "parsed {}",
        input_file.unwrap_or("<stdin>")
    );

    if check_only {
        return report_diagnostics(&document, input, input_file.unwrap_or("<stdin>"));
    }

    match output_format {
        OutputFormat::Tree(format) => {
            let output = encode(&document, input, format);
            write_text_output(&output, output_file, write_back, input_file, output_format);
        }
        OutputFormat::Yaml => match transcode::yaml::encode(&document, input) {
            Ok(output) => {
                write_text_output(&output, output_file, write_back, input_file, output_format);
            }
            Err(e) => {
                eprintln!("Error: Cannot convert to YAML: {}", e);
                return 1;
            }
        },
        OutputFormat::Cbor => {
            let bytes = transcode::cbor::encode(&document, input);
            write_binary_output(&bytes, output_file, write_back, input_file, output_format);
        }
        OutputFormat::CborDiag => {
            let bytes = transcode::cbor::encode(&document, input);
            match transcode::cbor::diagnostic(&bytes) {
                Ok(output) => {
                    write_text_output(&output, output_file, write_back, input_file, output_format);
                }
                Err(e) => {
                    eprintln!("Error: Cannot render CBOR diagnostic notation: {}", e);
                    return 1;
                }
            }
        }
        OutputFormat::Toml => {
            eprintln!("Error: TOML output is only available with --symbols");
            return 1;
        }
    }

    0
}

/// Print `path:line:col: message` for every diagnostic, or `path: ok`.
fn report_diagnostics(document: &Document, input: &str, path: &str) -> i32 {
    if !document.has_errors() {
        println!("{}: ok", path);
        return 0;
    }
    let index = LineIndex::new(input);
    for diagnostic in document.diagnostics() {
        let (line, col) = diagnostic.location(input, &index);
        eprintln!("{}:{}:{}: {}", path, line + 1, col + 1, diagnostic.kind);
    }
    1
}

fn symbol_table() -> String {
    let mut out = String::new();
    for symbol in Symbol::all() {
        let mut flags = Vec::new();
        if symbol.is_terminal() {
            flags.push("terminal");
        }
        if symbol.is_named() {
            flags.push("named");
        }
        if symbol.is_visible() {
            flags.push("visible");
        }
        out.push_str(&format!(
            "{:>3} {:<24} {}\n",
            symbol.id(),
            symbol.name(),
            flags.join(" ")
        ));
    }
    out
}

fn write_text_output(
    output: &str,
    output_file: Option<&str>,
    write_back: bool,
    input_file: Option<&str>,
    format: OutputFormat,
) {
    if let Some(path) = output_file {
        if let Err(e) = fs::write(path, output) {
            eprintln!("Error writing {}: {}", path, e);
            process::exit(1);
        }
    } else if write_back {
        if let Some(input_path) = input_file {
            let ext = format_extension(format);
            let output_path = Path::new(input_path).with_extension(ext);
            if let Err(e) = fs::write(&output_path, output) {
                eprintln!("Error writing {}: {}", output_path.display(), e);
                process::exit(1);
            }
        } else {
            eprintln!("Error: --write requires an input file");
            process::exit(1);
        }
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }
}

fn write_binary_output(
    output: &[u8],
    output_file: Option<&str>,
    write_back: bool,
    input_file: Option<&str>,
    format: OutputFormat,
) {
    if let Some(path) = output_file {
        if let Err(e) = fs::write(path, output) {
            eprintln!("Error writing {}: {}", path, e);
            process::exit(1);
        }
    } else if write_back {
        if let Some(input_path) = input_file {
            let ext = format_extension(format);
            let output_path = Path::new(input_path).with_extension(ext);
            if let Err(e) = fs::write(&output_path, output) {
                eprintln!("Error writing {}: {}", output_path.display(), e);
                process::exit(1);
            }
        } else {
            eprintln!("Error: --write requires an input file");
            process::exit(1);
        }
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = handle.write_all(output) {
            eprintln!("Error writing to stdout: {}", e);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        "tony - Tony syntax tree tool

USAGE:
    tony [OPTIONS] [FILE|DIR]

ARGS:
    [FILE|DIR]    Input file or directory (reads from stdin if not provided)
                  When a directory is given, processes all .tony files in it

OPTIONS:
    -t, --to <FORMAT>      Output format [default: sexp]
                           Supported: sexp, outline, tokens, yaml, cbor, diag
                           (toml with --symbols)

    -w, --write            Write output to file with inferred extension

    -o, --output <FILE>    Write output to specified file (not valid with directory input)

    --check                Print syntax errors as path:line:col: message
                           (exit 0 if there are none, 1 otherwise)

    --symbols              Print every grammar symbol with its id and flags

    -v, --verbose          Log parser recovery decisions to stderr
                           (repeat, or -vv, for production tracing)

    -h, --help             Print help

    -V, --version          Print version

EXAMPLES:
    # Print the syntax tree as an S-expression
    tony config.tony

    # Check every Tony file in a directory
    tony --check ./configs/

    # Show each token with its byte span
    tony -t tokens config.tony

    # Dump the full tree, extras included, as YAML
    tony -t yaml config.tony

    # Write the tree as CBOR, or view it in diagnostic notation (RFC 8949 §8)
    tony -t cbor config.tony -o config.cbor
    tony -t diag config.tony

    # Write an outline next to each input
    tony -t outline -w ./configs/

    # Export the symbol catalog as TOML
    tony --symbols -t toml
"
    );
}
