//! Command-line interface for examxml
//! Compiles one exam notation file and writes the XML document to stdout.
//!
//! Usage:
//!   examxml [`<path>`] [--config `<file>`] [--no-declaration] [-v]
//!
//! An `examxml.toml` in the working directory is picked up automatically.
//! Log output goes to stderr and is controlled by `EXAMXML_LOG`.

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};
use examxml::exam::config::{ExamXmlConfig, Loader};

fn main() {
    let matches = Command::new("examxml")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile an exam notation file into assessment-player XML")
        .arg(
            Arg::new("path")
                .help("Path to the exam file (default: input.default_path from the config)")
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("no-declaration")
                .long("no-declaration")
                .help("Omit the <?xml ...?> declaration line")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log pipeline progress to stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_tracing(matches.get_flag("verbose"));

    let config = load_config(
        matches.get_one::<String>("config"),
        matches.get_flag("no-declaration"),
    )
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_else(|| config.input.default_path.clone());
    tracing::debug!(path = %path.display(), "compiling");

    let source = std::fs::read_to_string(&path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let document = examxml::compile(&source, &config.output).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    print!("{}", document);
}

fn load_config(
    config_path: Option<&String>,
    no_declaration: bool,
) -> Result<ExamXmlConfig, config::ConfigError> {
    let mut loader = Loader::new().with_local_file(".");
    if let Some(path) = config_path {
        loader = loader.with_file(path);
    }
    if no_declaration {
        loader = loader.set_override("output.xml_declaration", false)?;
    }
    loader.build()
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("EXAMXML_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // A subscriber that is already installed is fine to keep.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
