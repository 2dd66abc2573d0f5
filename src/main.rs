use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use zxtap::tap::{write_tap_file, TapOptions, DEFAULT_TAPE_NAME};
use zxtap::{inject, FileType, TapError};

/// Create a TAP file, optionally injecting additional data.
///
/// To inject binary data into a BASIC program, give it a line containing
/// only `REM INJECT HERE` and pass the data with `--inject`.
#[derive(Parser)]
#[command(name = "totap", about = "Create a TAP file, optionally injecting additional data")]
struct Cli {
    /// TAP file to write
    #[arg(short = 'o', value_name = "TAP")]
    output: PathBuf,
    /// Spectrum file name
    #[arg(short, long, value_name = "FILENAME", default_value = DEFAULT_TAPE_NAME)]
    name: String,
    /// Binary data to inject into the BASIC program
    #[arg(long, value_name = "FILE")]
    inject: Option<PathBuf>,
    /// Autostart line number for BASIC or load address for binary
    /// (decimal, 0x hex, 0o octal or 0b binary)
    #[arg(long, value_parser = parse_int_literal)]
    start: Option<u16>,
    /// Store as a BASIC file instead of binary (Bytes)
    #[arg(long)]
    basic: bool,
    /// Log more detail to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Data to insert. For a BASIC file, created using e.g. zmakebas.
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() {
    if let Err(e) = run(Cli::parse()) {
        eprintln!("totap: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut data = read_input(&cli.file)?;
    debug!(path = %cli.file.display(), bytes = data.len(), "read input");

    if let Some(path) = &cli.inject {
        let extra = read_input(path)?;
        data = inject(&data, &extra).map_err(|e| format!("{}: {}", cli.file.display(), e))?;
    }

    let opts = TapOptions {
        file_type: if cli.basic { FileType::Program } else { FileType::Code },
        name:      cli.name,
        start:     cli.start,
    };
    write_tap_file(&cli.output, &data, &opts)?;
    println!("Created: {}", cli.output.display());
    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn read_input(path: &Path) -> Result<Vec<u8>, TapError> {
    std::fs::read(path).map_err(|source| TapError::Read { path: path.to_path_buf(), source })
}

/// Parses an integer literal the way a BASIC programmer would write one on
/// the command line: decimal, or `0x`/`0o`/`0b` prefixed, with optional `_`
/// digit separators.
fn parse_int_literal(s: &str) -> Result<u16, String> {
    let t = s.trim();
    let t = t.strip_prefix('+').unwrap_or(t);
    let lower = t.to_ascii_lowercase();
    let (digits, radix) = match lower.get(..2) {
        Some("0x") => (&lower[2..], 16),
        Some("0o") => (&lower[2..], 8),
        Some("0b") => (&lower[2..], 2),
        _          => (lower.as_str(), 10),
    };
    // A single separator may follow the base prefix, as in `0x_ff`.
    let digits = if radix != 10 { digits.strip_prefix('_').unwrap_or(digits) } else { digits };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(format!("invalid integer literal '{}'", s));
    }
    if radix == 10 && digits.len() > 1 && digits.starts_with('0') && !digits.trim_start_matches(['0', '_']).is_empty() {
        return Err(format!("invalid integer literal '{}': leading zeros need a 0o prefix", s));
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    let value = u32::from_str_radix(&cleaned, radix)
        .map_err(|_| format!("invalid integer literal '{}'", s))?;
    u16::try_from(value).map_err(|_| format!("{} is out of range 0..=65535", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn int_literals() {
        assert_eq!(parse_int_literal("10"), Ok(10));
        assert_eq!(parse_int_literal("0x8000"), Ok(0x8000));
        assert_eq!(parse_int_literal("0XFFFF"), Ok(0xffff));
        assert_eq!(parse_int_literal("0o777"), Ok(0o777));
        assert_eq!(parse_int_literal("0b101"), Ok(5));
        assert_eq!(parse_int_literal("32_768"), Ok(32768));
        assert_eq!(parse_int_literal("0"), Ok(0));
        assert_eq!(parse_int_literal("000"), Ok(0));
        assert_eq!(parse_int_literal("0x_1f"), Ok(31));
        assert_eq!(parse_int_literal("0b_1"), Ok(1));
        assert_eq!(parse_int_literal("0O_7_7"), Ok(0o77));
    }

    #[test]
    fn bad_int_literals() {
        for s in ["", "0x", "abc", "-1", "65536", "0x1_0000", "010", "1__0", "_1", "0b2", "0x_", "0x__1f", "0x_1f_"] {
            assert!(parse_int_literal(s).is_err(), "{s} should be rejected");
        }
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["totap", "-o", "out.tap", "prog.bin"]).unwrap();
        assert_eq!(cli.name, "DEMO");
        assert!(!cli.basic);
        assert_eq!(cli.start, None);
        assert!(cli.inject.is_none());
    }

    #[test]
    fn output_is_required() {
        assert!(Cli::try_parse_from(["totap", "prog.bin"]).is_err());
    }

    #[test]
    fn full_command_line() {
        let cli = Cli::try_parse_from([
            "totap", "-o", "out.tap", "-n", "LOADER", "--inject", "code.bin",
            "--start", "0x0a", "--basic", "-vv", "prog.bas",
        ]).unwrap();
        assert_eq!(cli.name, "LOADER");
        assert_eq!(cli.start, Some(10));
        assert!(cli.basic);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.inject.as_deref(), Some(Path::new("code.bin")));
        assert_eq!(cli.file, PathBuf::from("prog.bas"));
    }
}
