use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use entropy_calc::{
    analyze, error::exit_code, load_baseline, output, Analysis, Config, EntropyError,
    FrequencyMapping, SymbolMode,
};
use tracing_subscriber::filter::LevelFilter;

/// Analyzes the Shannon entropy of files, or their relative entropy
/// against a baseline distribution
#[derive(Debug, Parser)]
#[command(name = "entropy-calc", version)]
struct Cli {
    /// Input files for which to calculate entropy
    #[arg(required = true)]
    input_files: Vec<PathBuf>,

    /// JSON file mapping symbols to counts or probabilities, used as the
    /// baseline for the relative entropy calculation
    #[arg(short, long)]
    baseline: Option<PathBuf>,

    /// Write the symbol probabilities of each input to <name>.dist.json
    #[arg(short, long)]
    write_distribution: bool,

    /// Directory for written probabilities, created if absent. Implies
    /// --write-distribution
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Treat every byte as a symbol instead of decoding UTF-8 text
    #[arg(long)]
    bytes: bool,

    /// Print one JSON object per input file
    #[arg(long)]
    json: bool,

    /// Increases output verbosity
    #[arg(short, long)]
    verbose: bool,

    /// Controls logging verbosity based off of log message priority
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Warning)]
    log: LogLevel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn filter(self, verbose: bool) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            _ if verbose => LevelFilter::INFO,
            Self::Warning => LevelFilter::WARN,
            Self::Error | Self::Critical => LevelFilter::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log.filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    let baseline = match cli.baseline.as_deref().map(load_baseline).transpose() {
        Ok(baseline) => baseline,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("error: {}", describe(err));
            return code;
        }
    };

    let config = Config {
        symbols: if cli.bytes {
            SymbolMode::Bytes
        } else {
            SymbolMode::Text
        },
    };

    let mut status = exit_code::SUCCESS;
    for input in &cli.input_files {
        if let Err(err) = process(cli, input, baseline.as_ref(), &config) {
            if status == exit_code::SUCCESS {
                status = err.exit_code();
            }
            eprintln!("error: {}: {}", input.display(), describe(err));
        }
    }

    status
}

fn process(
    cli: &Cli,
    input: &Path,
    baseline: Option<&FrequencyMapping>,
    config: &Config,
) -> Result<(), EntropyError> {
    let analysis = analyze(input, baseline, config)?;
    print_analysis(&analysis, cli.json);

    if cli.write_distribution || cli.output_dir.is_some() {
        let path = output::output_path(input, cli.output_dir.as_deref());
        output::write_probabilities(&path, &analysis.result.probabilities)?;
    }

    Ok(())
}

fn print_analysis(analysis: &Analysis, json: bool) {
    if !json {
        println!(
            "{} of {}: {:?}",
            analysis.measure,
            analysis.file.display(),
            analysis.result.entropy
        );
        return;
    }

    match serde_json::to_string(analysis) {
        Ok(line) => println!("{line}"),
        Err(err) => log::error!("Could not serialize {}: {err}", analysis.file.display()),
    }
}

/// The error followed by its chain of causes.
fn describe(err: EntropyError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}
