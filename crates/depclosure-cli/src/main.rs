//! depclosure CLI.
//!
//! Usage:
//! - `depclosure <path>` - Print every library `<path>` links against, directly
//!   or transitively, one per line in sorted order

use std::io::{self, BufWriter, Write};
use std::process;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use depclosure::{Closure, ClosureResolver, DependencyLister, OtoolLister};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "depclosure", version)]
#[command(about = "List the transitive shared-library dependencies of a binary", long_about = None)]
struct Cli {
    /// Binary or library to start from (e.g., /usr/lib/libz.dylib)
    #[arg(value_parser = NonEmptyStringValueParser::new())]
    seed: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(OtoolLister::default(), &cli.seed, io::stdout().lock()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only the closure.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Resolves `seed` with `lister` and writes the closure to `out`.
fn run<L, W>(lister: L, seed: &str, out: W) -> Result<(), Box<dyn std::error::Error>>
where
    L: DependencyLister,
    W: Write,
{
    debug!(seed, "resolving closure");
    let closure = ClosureResolver::new(lister).resolve(seed)?;

    write_closure(out, &closure)?;
    Ok(())
}

/// Writes one path per line, newline-terminated.
fn write_closure<W: Write>(out: W, closure: &Closure) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    for path in closure {
        writeln!(out, "{}", path)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use depclosure::MemoryLister;

    #[test]
    fn test_write_closure_format() {
        let lister = MemoryLister::new()
            .with_edges("/usr/lib/libB.dylib", ["/usr/lib/libA.dylib"])
            .with_edges("/usr/lib/libA.dylib", ["/usr/lib/libB.dylib"]);
        let closure = ClosureResolver::new(lister)
            .resolve("/usr/lib/libB.dylib")
            .unwrap();

        let mut buf = Vec::new();
        write_closure(&mut buf, &closure).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "/usr/lib/libA.dylib\n/usr/lib/libB.dylib\n"
        );
    }

    #[test]
    fn test_run_writes_sorted_closure() {
        let lister = MemoryLister::new()
            .with_edges("/app/Tool", ["/usr/lib/libB.dylib", "/usr/lib/libA.dylib"])
            .with_edges("/usr/lib/libB.dylib", ["/usr/lib/libB.dylib", "/usr/lib/libC.dylib"]);

        let mut buf = Vec::new();
        run(&lister, "/app/Tool", &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "/app/Tool\n/usr/lib/libA.dylib\n/usr/lib/libB.dylib\n/usr/lib/libC.dylib\n"
        );
        assert_eq!(lister.queries().len(), 4);
    }

    #[test]
    fn test_run_launch_failure_writes_nothing() {
        let lister = MemoryLister::new()
            .with_edges("/app/Tool", ["/usr/lib/libA.dylib"])
            .fail_launch("/usr/lib/libA.dylib");

        let mut buf = Vec::new();
        let err = run(&lister, "/app/Tool", &mut buf).unwrap_err();

        assert!(err.to_string().starts_with("failed to launch"));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_cli_rejects_empty_seed() {
        let err = Cli::try_parse_from(["depclosure", ""]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cli_requires_seed() {
        assert!(Cli::try_parse_from(["depclosure"]).is_err());
        assert!(Cli::try_parse_from(["depclosure", "a", "b"]).is_err());

        let cli = Cli::try_parse_from(["depclosure", "/usr/lib/libz.dylib"]).unwrap();
        assert_eq!(cli.seed, "/usr/lib/libz.dylib");
    }
}
