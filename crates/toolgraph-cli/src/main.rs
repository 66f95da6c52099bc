//! toolgraph command-line interface.
//!
//! Reads an IR document (JSON) produced by the extraction step and either
//! runs the full analysis or dumps the dependency graph. Results go to
//! stdout; logs and errors go to stderr so stdout stays machine-readable.
//!
//! Logging honors `RUST_LOG`; without it the level is `warn` (or `debug`
//! with `--verbose`).

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use toolgraph_analysis::{analyze_with_config, build_graph, AnalysisConfig, AnalysisError};
use toolgraph_core::Ir;

/// Exit code for an IR that fails validation.
const EXIT_INVALID_IR: i32 = 1;
/// Exit code for unreadable or unparseable input.
const EXIT_IO: i32 = 3;

/// Reactive dependency analysis tools.
#[derive(Parser)]
#[command(name = "toolgraph", about = "Reactive dependency analysis tools")]
struct Cli {
    /// Log analysis progress at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Partition an application into tool groups.
    Analyze {
        /// Path to the IR JSON document.
        ir: PathBuf,

        /// Leave unresolved computed references out of tool groups.
        #[arg(long)]
        strict_unresolved: bool,

        /// Print single-line JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },

    /// Print the dependency graph.
    Graph {
        /// Path to the IR JSON document.
        ir: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = GraphFormat::Json)]
        format: GraphFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GraphFormat {
    Json,
    Dot,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Analyze {
            ir,
            strict_unresolved,
            compact,
        } => run_analyze(&ir, strict_unresolved, compact),
        Commands::Graph { ir, format } => run_graph(&ir, format),
    };
    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the analyze subcommand.
///
/// Returns exit code: 0 = success, 1 = invalid IR, 3 = I/O, parse or
/// serialization error.
fn run_analyze(path: &Path, strict_unresolved: bool, compact: bool) -> i32 {
    let ir = match load_ir(path) {
        Ok(ir) => ir,
        Err(code) => return code,
    };

    let config = if strict_unresolved {
        AnalysisConfig::strict()
    } else {
        AnalysisConfig::default()
    };

    match analyze_with_config(&ir, &config) {
        Ok(result) => {
            for warning in &result.warnings {
                tracing::warn!("{}", warning);
            }
            let json = if compact {
                serde_json::to_string(&result)
            } else {
                serde_json::to_string_pretty(&result)
            };
            match json {
                Ok(json) => {
                    println!("{}", json);
                    0
                }
                Err(e) => {
                    eprintln!("Error: failed to serialize result: {}", e);
                    EXIT_IO
                }
            }
        }
        Err(AnalysisError::InvalidIr(e)) => {
            eprintln!("Error: invalid IR in '{}': {}", path.display(), e);
            EXIT_INVALID_IR
        }
    }
}

/// Execute the graph subcommand.
///
/// The IR is validated first so the printed graph matches what `analyze`
/// would see.
fn run_graph(path: &Path, format: GraphFormat) -> i32 {
    let ir = match load_ir(path) {
        Ok(ir) => ir,
        Err(code) => return code,
    };
    if let Err(e) = ir.validate() {
        eprintln!("Error: invalid IR in '{}': {}", path.display(), e);
        return EXIT_INVALID_IR;
    }

    let graph = build_graph(&ir);
    match format {
        GraphFormat::Dot => {
            print!("{}", graph.to_dot());
            0
        }
        GraphFormat::Json => match serde_json::to_string_pretty(&graph) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("Error: failed to serialize graph: {}", e);
                EXIT_IO
            }
        },
    }
}

/// Read and parse an IR document, mapping failures to an exit code.
fn load_ir(path: &Path) -> Result<Ir, i32> {
    let text = fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read '{}': {}", path.display(), e);
        EXIT_IO
    })?;
    Ir::from_json(&text).map_err(|e| {
        eprintln!("Error: {}: {}", path.display(), e);
        EXIT_IO
    })
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
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from(["toolgraph", "analyze", "app.json", "--strict-unresolved"])
            .unwrap();
        match cli.command {
            Commands::Analyze {
                ir,
                strict_unresolved,
                compact,
            } => {
                assert_eq!(ir, PathBuf::from("app.json"));
                assert!(strict_unresolved);
                assert!(!compact);
            }
            Commands::Graph { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn parses_graph_format() {
        let cli =
            Cli::try_parse_from(["toolgraph", "graph", "app.json", "--format", "dot"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Graph {
                format: GraphFormat::Dot,
                ..
            }
        ));
    }

    #[test]
    fn missing_file_maps_to_io_exit_code() {
        assert_eq!(
            load_ir(Path::new("/nonexistent/toolgraph/app.json")).unwrap_err(),
            EXIT_IO
        );
    }

    fn write_ir(dir: &tempfile::TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("app.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn exit_codes_follow_ir_state() {
        let temp_dir = tempfile::tempdir().unwrap();

        let valid = write_ir(
            &temp_dir,
            r#"{"inputs": [{"id": "n", "type": "numeric"}],
                "outputs": [{"id": "hist", "type": "plot", "input_deps": ["n"]}]}"#,
        );
        assert_eq!(run_analyze(&valid, false, true), 0);
        assert_eq!(run_graph(&valid, GraphFormat::Dot), 0);

        let duplicate = write_ir(
            &temp_dir,
            r#"{"outputs": [{"id": "hist", "type": "plot"}, {"id": "hist", "type": "table"}]}"#,
        );
        assert_eq!(run_analyze(&duplicate, false, true), EXIT_INVALID_IR);
        assert_eq!(run_analyze(&duplicate, true, false), EXIT_INVALID_IR);
        assert_eq!(run_graph(&duplicate, GraphFormat::Json), EXIT_INVALID_IR);

        let malformed = write_ir(&temp_dir, "{\"inputs\": [");
        assert_eq!(run_analyze(&malformed, false, true), EXIT_IO);
    }
}
