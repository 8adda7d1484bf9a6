//! heat-demand entry point: CLI wiring and config-driven pipeline run.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use tracing_subscriber::EnvFilter;

use heat_demand::config::ScenarioConfig;
use heat_demand::pipeline::{self, PipelineError};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    dir: Option<PathBuf>,
    input: Option<String>,
    output: Option<String>,
    synthetic_seed: Option<u64>,
    no_plot: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("heat-demand: hourly heat demand from BDEW standard load profiles");
    eprintln!();
    eprintln!("Usage: heat-demand [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset ({})", ScenarioConfig::PRESETS.join(", "));
    eprintln!("  --dir <path>             Working directory for input and output");
    eprintln!("  --input <file>           Temperature CSV file name");
    eprintln!("  --output <file>          Output CSV file name");
    eprintln!("  --synthetic <seed>       Use a generated temperature year");
    eprintln!("  --no-plot                Do not open the chart");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the gb_2010 preset is used.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to control log output on stderr.");
}

/// Returns the value following a flag, exiting with an error if absent.
fn flag_value(args: &[String], i: usize, flag: &str, what: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => {
            eprintln!("error: {flag} requires a {what} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        dir: None,
        input: None,
        output: None,
        synthetic_seed: None,
        no_plot: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(flag_value(&args, i, "--scenario", "path"));
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(flag_value(&args, i, "--preset", "name"));
            }
            "--dir" => {
                i += 1;
                cli.dir = Some(PathBuf::from(flag_value(&args, i, "--dir", "path")));
            }
            "--input" => {
                i += 1;
                cli.input = Some(flag_value(&args, i, "--input", "file"));
            }
            "--output" => {
                i += 1;
                cli.output = Some(flag_value(&args, i, "--output", "file"));
            }
            "--synthetic" => {
                i += 1;
                let raw = flag_value(&args, i, "--synthetic", "u64");
                if let Ok(seed) = raw.parse::<u64>() {
                    cli.synthetic_seed = Some(seed);
                } else {
                    eprintln!("error: --synthetic value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--no-plot" => {
                cli.no_plot = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = flag_value(&args, i, "--port", "u16");
                if let Ok(p) = raw.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{raw}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Logs to stderr so stdout carries only the report.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_scenario(cli: &CliArgs) -> Result<ScenarioConfig, heat_demand::config::ConfigError> {
    if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::gb_2010())
    }
}

fn main() {
    let cli = parse_args();
    init_logging();

    // Load config: --scenario takes priority, then --preset, then gb_2010
    let mut scenario = load_scenario(&cli).unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    // Apply command-line overrides
    if let Some(ref dir) = cli.dir {
        scenario.input.directory = Some(dir.clone());
    }
    if let Some(ref input) = cli.input {
        scenario.input.temperature_file = input.clone();
    }
    if let Some(ref output) = cli.output {
        scenario.output.file = output.clone();
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let work_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let built = scenario.pipeline_config(&work_dir, cli.synthetic_seed).and_then(|config| {
        Ok((config, scenario.holiday_provider()?, scenario.profile_generator()?))
    });
    let (config, calendar, generator) = built.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    let outcome = match pipeline::run(&config, &calendar, &generator) {
        Ok(outcome) => outcome,
        Err(e @ PipelineError::MissingInput { .. }) => {
            // Nothing to compute; report and stop without an error status.
            println!("{e}");
            process::exit(0);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let interactive = !cli.no_plot && std::io::stdout().is_terminal();
    #[cfg(feature = "tui")]
    if interactive {
        if let Err(e) = heat_demand::tui::show(&outcome.table) {
            tracing::warn!(error = %e, "could not show the chart");
        }
    }
    #[cfg(not(feature = "tui"))]
    if interactive {
        tracing::debug!("built without the tui feature; skipping the chart");
    }

    println!("{}", outcome.summary);
    println!();
    println!("{}", outcome.table);
    eprintln!("Heat demand written to {}", outcome.output_path.display());

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(heat_demand::api::AppState {
            summary: outcome.summary,
            table: outcome.table,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(heat_demand::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
