// Idiomatic Rust CLI for Bgsplice.
//
// Subcommand per operation of the interactive flow: `scan` lists a
// container's embedded images, `extract` dumps their payloads to files,
// `swap` runs the full load/replace/export pipeline.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::io;
use crate::scan::Chunk;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// BGCode embedded-image scanner and splicer.
#[derive(Parser, Debug)]
#[command(
    name = "bgsplice",
    version,
    about = "Locate and swap embedded PNG/QOI images in BGCode containers",
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

    /// Output reports as JSON to stdout.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List embedded image chunks in a container.
    Scan(ScanArgs),
    /// Write each embedded image payload to its own file.
    Extract(ExtractArgs),
    /// Replace a container's images with those from another container.
    Swap(SwapArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Container file to scan.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Container file to extract from.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Directory to write payload files into (default: current directory).
    #[arg(long = "output-dir", short = 'o', value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SwapArgs {
    /// Original container.
    #[arg(value_hint = ValueHint::FilePath)]
    original: PathBuf,

    /// Container supplying the replacement images.
    #[arg(value_hint = ValueHint::FilePath)]
    replacement: PathBuf,

    /// Output container path.
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

struct Options {
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
}

impl Options {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            force: cli.force,
            quiet: cli.quiet,
            verbose: cli.verbose.min(2),
            json_output: cli.json_output,
        }
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("bgsplice".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = Options::from_cli(&cli);
    }
}

// ---------------------------------------------------------------------------
// Scan command
// ---------------------------------------------------------------------------

fn chunk_json(index: usize, chunk: &Chunk) -> serde_json::Value {
    serde_json::json!({
        "index": index,
        "format": chunk.format.name(),
        "start": chunk.start,
        "end": chunk.end,
        "length": chunk.len(),
    })
}

fn cmd_scan(opts: &Options, input: &Path) -> i32 {
    let report = match io::scan_file(input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("bgsplice: scan: {}: {e}", input.display());
            return 1;
        }
    };

    if opts.json_output {
        let chunks: Vec<_> = report
            .chunks
            .iter()
            .enumerate()
            .map(|(i, c)| chunk_json(i, c))
            .collect();
        let json = serde_json::json!({
            "command": "scan",
            "file": input.display().to_string(),
            "file_size": report.file_size,
            "chunks": chunks,
        });
        println!("{}", serde_json::to_string_pretty(&json).unwrap());
        return 0;
    }

    for (i, chunk) in report.chunks.iter().enumerate() {
        println!(
            "chunk {i}: {} [{}..{}) {} bytes",
            chunk.format,
            chunk.start,
            chunk.end,
            chunk.len()
        );
    }
    if !opts.quiet {
        eprintln!(
            "bgsplice: {} chunks in {} bytes",
            report.chunks.len(),
            report.file_size
        );
    }

    0
}

// ---------------------------------------------------------------------------
// Extract command
// ---------------------------------------------------------------------------

fn cmd_extract(opts: &Options, input: &Path, output_dir: Option<&Path>) -> i32 {
    let data = match std::fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("bgsplice: extract: {}: {e}", input.display());
            return 1;
        }
    };

    let dir = output_dir.unwrap_or_else(|| Path::new(".")).to_path_buf();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("bgsplice: extract: {}: {e}", dir.display());
        return 1;
    }

    let chunks = crate::scan::locate(&data);
    for (i, chunk) in chunks.iter().enumerate() {
        let path = dir.join(format!("chunk-{i:03}.{}", chunk.format.extension()));
        if path.exists() && !opts.force {
            eprintln!(
                "bgsplice: output file exists, use -f to overwrite: {}",
                path.display()
            );
            return 1;
        }
        if let Err(e) = std::fs::write(&path, chunk.bytes(&data)) {
            eprintln!("bgsplice: extract: {}: {e}", path.display());
            return 1;
        }
        if opts.verbose > 0 && !opts.quiet {
            eprintln!(
                "bgsplice: wrote {} ({} bytes)",
                path.display(),
                chunk.len()
            );
        }
    }

    if !opts.quiet {
        eprintln!("bgsplice: extracted {} chunks", chunks.len());
    }

    0
}

// ---------------------------------------------------------------------------
// Swap command
// ---------------------------------------------------------------------------

fn cmd_swap(opts: &Options, args: &SwapArgs) -> i32 {
    if args.output.exists() && !opts.force {
        eprintln!(
            "bgsplice: output file exists, use -f to overwrite: {}",
            args.output.display()
        );
        return 1;
    }

    let stats = match io::swap_file(&args.original, &args.replacement, &args.output) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("bgsplice: swap: {e}");
            return 1;
        }
    };

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "bgsplice: swapped {} chunks: {} -> {} bytes",
            stats.chunks, stats.original_size, stats.output_size
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "swap",
            "original_size": stats.original_size,
            "replacement_size": stats.replacement_size,
            "output_size": stats.output_size,
            "chunks": stats.chunks,
            "original_sha256": stats.original_sha256.map(hex),
            "output_sha256": stats.output_sha256.map(hex),
        });
        println!("{}", serde_json::to_string_pretty(&json).unwrap());
    }

    0
}

fn hex(digest: [u8; 32]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let opts = Options::from_cli(&cli);

    let exit_code = match &cli.command {
        Cmd::Scan(args) => cmd_scan(&opts, &args.input),
        Cmd::Extract(args) => cmd_extract(&opts, &args.input, args.output_dir.as_deref()),
        Cmd::Swap(args) => cmd_swap(&opts, args),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
