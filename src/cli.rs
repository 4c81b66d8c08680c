// Command-line interface for gwcat.
//
// Three subcommands: `list` prints decoded source, `info` prints file
// vitals, `unprotect` strips the protection cipher from a file.  Exit code
// is nonzero on the first failing file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::gwbas;
use crate::io::{decode_file, inspect_file, read_program, unprotect_file, write_listing};

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Decoder for tokenized GW-BASIC/BASICA .BAS files.
#[derive(Parser, Debug)]
#[command(
    name = "gwcat",
    version,
    about = "Decoder for tokenized GW-BASIC/BASICA .BAS files",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the recovered source of one or more .BAS files.
    List(ListArgs),
    /// Print format details about a .BAS file.
    Info(InfoArgs),
    /// Strip the protection cipher, writing a plain tokenized copy.
    Unprotect(UnprotectArgs),
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Tokenized .BAS files to print, in order.
    #[arg(value_hint = ValueHint::FilePath, required = true)]
    files: Vec<PathBuf>,

    /// Write the listing to a file instead of stdout.
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Tokenized .BAS file to inspect.
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,
}

#[derive(Args, Debug)]
struct UnprotectArgs {
    /// Input .BAS file (plain input is copied through).
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath, conflicts_with = "output")]
    output_pos: Option<PathBuf>,

    /// Output file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    List,
    Info,
    Unprotect,
}

struct Options {
    command: Command,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    use_stdout: bool,
    input_files: Vec<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let force = cli.force;
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let json_output = cli.json_output;

    match cli.command {
        Cmd::List(args) => Options {
            command: Command::List,
            force,
            quiet,
            verbose,
            json_output,
            use_stdout: false,
            input_files: args.files,
            output_file: args.output,
        },
        Cmd::Info(args) => Options {
            command: Command::Info,
            force,
            quiet,
            verbose,
            json_output,
            use_stdout: false,
            input_files: vec![args.file],
            output_file: None,
        },
        Cmd::Unprotect(args) => Options {
            command: Command::Unprotect,
            force,
            quiet,
            verbose,
            json_output,
            use_stdout: args.stdout,
            input_files: vec![args.input],
            output_file: args.output.or(args.output_pos),
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("gwcat".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// List command
// ---------------------------------------------------------------------------

fn cmd_list(opts: &Options) -> i32 {
    let mut listings = Vec::with_capacity(opts.input_files.len());
    for path in &opts.input_files {
        match decode_file(path) {
            Ok(listing) => listings.push((path, listing)),
            Err(e) => {
                eprintln!("gwcat: {e}");
                return 1;
            }
        }
    }

    let mut out: Box<dyn Write> = match &opts.output_file {
        Some(path) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "gwcat: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return 1;
            }
            match File::create(path) {
                Ok(f) => Box::new(BufWriter::new(f)),
                Err(e) => {
                    eprintln!("gwcat: output file: {}: {e}", path.display());
                    return 1;
                }
            }
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for (path, listing) in &listings {
        if opts.verbose > 0 && !opts.quiet {
            eprintln!(
                "gwcat: {}: {} file, {} line(s)",
                path.display(),
                listing.kind(),
                listing.len()
            );
        }
        if let Err(e) = write_listing(&mut out, listing) {
            eprintln!("gwcat: write error: {e}");
            return 1;
        }
    }
    if let Err(e) = out.flush() {
        eprintln!("gwcat: write flush error: {e}");
        return 1;
    }

    if opts.json_output {
        let files: Vec<serde_json::Value> = listings
            .iter()
            .map(|(path, listing)| {
                serde_json::json!({
                    "file": path.display().to_string(),
                    "kind": listing.kind().to_string(),
                    "lines": listing.len(),
                    "unknown_opcodes": listing.stats().unknown_opcodes,
                    "truncated": listing.stats().truncated,
                })
            })
            .collect();
        let json = serde_json::json!({
            "command": "list",
            "files": files,
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    }

    0
}

// ---------------------------------------------------------------------------
// Info command
// ---------------------------------------------------------------------------

fn cmd_info(opts: &Options) -> i32 {
    let path = &opts.input_files[0];
    let stats = match inspect_file(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("gwcat: {e}");
            return 1;
        }
    };

    println!("File:            {}", path.display());
    println!("Size:            {} bytes", stats.size);
    println!("Kind:            {}", stats.kind);
    println!("Lines:           {}", stats.lines);
    println!("Unknown opcodes: {}", stats.unknown_opcodes);
    println!(
        "Truncated:       {}",
        if stats.truncated { "yes" } else { "no" }
    );

    if opts.json_output {
        let json = serde_json::json!({
            "command": "info",
            "file": path.display().to_string(),
            "size": stats.size,
            "kind": stats.kind.to_string(),
            "lines": stats.lines,
            "unknown_opcodes": stats.unknown_opcodes,
            "truncated": stats.truncated,
        });
        eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
    }

    0
}

// ---------------------------------------------------------------------------
// Unprotect command
// ---------------------------------------------------------------------------

fn cmd_unprotect(opts: &Options) -> i32 {
    let input = &opts.input_files[0];

    if opts.use_stdout {
        let data = match read_program(input) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("gwcat: {e}");
                return 1;
            }
        };
        let plain = match gwbas::unprotect(&data) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("gwcat: {}: {e}", input.display());
                return 1;
            }
        };
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(e) = out.write_all(&plain).and_then(|()| out.flush()) {
            eprintln!("gwcat: write error: {e}");
            return 1;
        }
        return 0;
    }

    let output = match &opts.output_file {
        Some(p) => p.clone(),
        None => {
            eprintln!("gwcat: unprotect requires an output file or -c");
            return 1;
        }
    };
    if output.exists() && !opts.force {
        eprintln!(
            "gwcat: output file exists, use -f to overwrite: {}",
            output.display()
        );
        return 1;
    }

    match unprotect_file(input, &output) {
        Ok(stats) => {
            if !stats.was_protected && !opts.quiet {
                eprintln!("gwcat: {}: input was already plain", input.display());
            }
            if opts.verbose > 0 && !opts.quiet {
                eprintln!(
                    "gwcat: unprotect: {} bytes written to {}",
                    stats.size,
                    output.display()
                );
            }
            if opts.json_output {
                let json = serde_json::json!({
                    "command": "unprotect",
                    "input": input.display().to_string(),
                    "output": output.display().to_string(),
                    "size": stats.size,
                    "was_protected": stats.was_protected,
                });
                eprintln!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            0
        }
        Err(e) => {
            eprintln!("gwcat: {e}");
            1
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut opts = resolve_options(cli);

    // Warn if -c overrides output filename.
    if opts.use_stdout && opts.output_file.is_some() {
        if !opts.quiet {
            eprintln!(
                "gwcat: warning: -c option overrides output filename: {}",
                opts.output_file.as_ref().unwrap().display()
            );
        }
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::List => cmd_list(&opts),
        Command::Info => cmd_info(&opts),
        Command::Unprotect => cmd_unprotect(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
