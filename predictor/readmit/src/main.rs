use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use readmit::{Assessment, Predictor};
use readmit_encode::{EncounterInput, A1C_LEVELS, AGE_BRACKETS, GLUCOSE_LEVELS, YES_NO};
use readmit_model::{ModelBundle, BUNDLE_SCHEMA_VERSION, DEFAULT_BUNDLE_FILE};
use serde::Serialize;

/// Environment variable naming the model bundle when --bundle is absent.
const BUNDLE_ENV: &str = "READMIT_BUNDLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Text,
    Json,
}

fn output_mode(json: bool) -> OutputMode {
    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "readmit",
    version,
    about = "Predict 30-day hospital readmission risk from encounter details",
    long_about = "readmit scores hospital encounters against a trained readmission model.\n\n\
        The model travels as a JSON bundle holding the feature schema and the\n\
        fitted coefficients together; every prediction encodes the encounter\n\
        against that schema, so column order always matches training.\n\n\
        EXAMPLES:\n\
        \n  readmit predict --age '[50-60)' --days 5 --a1c '>8'  Score one encounter\n\
        \n  readmit predict --json                               Machine-readable output\n\
        \n  readmit batch encounters.jsonl                       Score one encounter per line\n\
        \n  readmit inspect                                      Show the loaded bundle\n\
        \n  READMIT_BUNDLE=models/v2.json readmit predict        Name the bundle via the environment",
    after_help = "The model bundle is resolved from --bundle, then READMIT_BUNDLE, then\n\
        ./readmission_model_bundle.json."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the model bundle JSON
    #[arg(long, value_name = "FILE", global = true)]
    bundle: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score one encounter given as flags
    #[command(
        about = "Score one encounter given as flags",
        long_about = "Scores a single encounter described entirely by flags.\n\n\
            Every flag has the same default as the encounter form, so\n\
            'readmit predict' alone scores the baseline encounter."
    )]
    Predict(PredictArgs),

    /// Score encounters from JSON Lines input
    #[command(
        about = "Score encounters from JSON Lines (one object per line)",
        long_about = "Reads one JSON object per line from FILE (or stdin) and prints one\n\
            assessment per line. Fields omitted from an object take the form\n\
            defaults. A line that fails to parse or encode is reported and\n\
            skipped; it does not stop the batch."
    )]
    Batch(BatchArgs),

    /// Show the loaded model bundle
    #[command(about = "Show the model name, schema width, and feature names of the bundle")]
    Inspect(InspectArgs),
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// Age group of the patient
    #[arg(
        long,
        value_name = "BRACKET",
        default_value = "[0-10)",
        value_parser = PossibleValuesParser::new(AGE_BRACKETS)
    )]
    age: String,

    /// Days in hospital for this encounter
    #[arg(
        long,
        value_name = "DAYS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..=20)
    )]
    days: u32,

    /// Number of medications administered
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=50)
    )]
    meds: u32,

    /// Number of lab procedures performed
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 40,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    labs: u32,

    /// A1C test result
    #[arg(
        long,
        value_name = "RESULT",
        default_value = "None",
        value_parser = PossibleValuesParser::new(A1C_LEVELS)
    )]
    a1c: String,

    /// Maximum glucose serum result
    #[arg(
        long,
        value_name = "RESULT",
        default_value = "None",
        value_parser = PossibleValuesParser::new(GLUCOSE_LEVELS)
    )]
    glucose: String,

    /// Whether any diabetes medication was prescribed
    #[arg(
        long = "diabetes-med",
        value_name = "ANSWER",
        default_value = "Yes",
        value_parser = PossibleValuesParser::new(YES_NO)
    )]
    diabetes_med: String,

    /// Whether medication was changed during the encounter
    #[arg(
        long = "med-change",
        value_name = "ANSWER",
        default_value = "Yes",
        value_parser = PossibleValuesParser::new(YES_NO)
    )]
    med_change: String,

    /// Emit the assessment as JSON
    #[arg(long)]
    json: bool,
}

impl PredictArgs {
    fn to_input(&self) -> EncounterInput {
        EncounterInput {
            age_bracket: self.age.clone(),
            time_in_hospital: self.days,
            num_medications: self.meds,
            num_lab_procedures: self.labs,
            a1c_result: self.a1c.clone(),
            max_glu_serum: self.glucose.clone(),
            diabetes_med: self.diabetes_med.clone(),
            med_change: self.med_change.clone(),
        }
    }
}

#[derive(Debug, Args, Clone)]
struct BatchArgs {
    /// JSON Lines file with one encounter per line (stdin if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Emit one JSON assessment per line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct InspectArgs {
    /// Emit the bundle facts as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct BundleReport<'a> {
    model_name: &'a str,
    schema_version: u32,
    features: usize,
    feature_names: &'a [String],
}

#[derive(Debug, Serialize)]
struct BatchLine<'a> {
    line: usize,
    #[serde(flatten)]
    assessment: &'a Assessment,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn resolve_bundle_path(flag: &Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path.clone();
    }
    if let Ok(path) = std::env::var(BUNDLE_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    PathBuf::from(DEFAULT_BUNDLE_FILE)
}

fn load_predictor(bundle_flag: &Option<PathBuf>) -> Result<Predictor, String> {
    let path = resolve_bundle_path(bundle_flag);
    let bundle = ModelBundle::load(&path).map_err(|e| e.to_string())?;
    Ok(Predictor::from_bundle(bundle))
}

fn print_assessment(assessment: &Assessment, mode: OutputMode) -> i32 {
    match mode {
        OutputMode::Text => {
            println!(
                "Predicted probability of 30-day readmission: {:.4}",
                assessment.probability
            );
            println!("{}", assessment.advice());
            0
        }
        OutputMode::Json => match serde_json::to_string(assessment) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                2
            }
        },
    }
}

fn run_predict(predictor: &Predictor, args: &PredictArgs, mode: OutputMode) -> i32 {
    match predictor.assess(&args.to_input()) {
        Ok(assessment) => print_assessment(&assessment, mode),
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn score_line(predictor: &Predictor, line: &str) -> Result<Assessment, String> {
    let input: EncounterInput =
        serde_json::from_str(line).map_err(|e| format!("invalid JSON: {e}"))?;
    predictor.assess(&input).map_err(|e| e.to_string())
}

fn run_batch(predictor: &Predictor, args: &BatchArgs, mode: OutputMode) -> i32 {
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => match fs::File::open(path) {
            Ok(file) => Box::new(io::BufReader::new(file)),
            Err(e) => {
                eprintln!("error: cannot open '{}': {e}", path.display());
                return 2;
            }
        },
        None => Box::new(io::BufReader::new(io::stdin())),
    };

    let mut scored = 0usize;
    let mut failures = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error: line {number}: {e}");
                return 2;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match score_line(predictor, &line) {
            Ok(assessment) => {
                scored += 1;
                match mode {
                    OutputMode::Text => println!(
                        "line {number}: probability {:.4} ({})",
                        assessment.probability, assessment.tier
                    ),
                    OutputMode::Json => {
                        let record = BatchLine {
                            line: number,
                            assessment: &assessment,
                        };
                        match serde_json::to_string(&record) {
                            Ok(json) => println!("{json}"),
                            Err(e) => {
                                eprintln!("error: failed to serialize JSON: {e}");
                                return 2;
                            }
                        }
                    }
                }
            }
            Err(reason) => {
                failures += 1;
                eprintln!("error: line {number}: {reason}");
            }
        }
    }

    info!("batch scored {scored} encounters, {failures} failed");
    if failures > 0 {
        1
    } else {
        0
    }
}

fn run_inspect(predictor: &Predictor, mode: OutputMode) -> i32 {
    let report = BundleReport {
        model_name: predictor.model_name(),
        schema_version: BUNDLE_SCHEMA_VERSION,
        features: predictor.schema().len(),
        feature_names: predictor.schema().names(),
    };
    match mode {
        OutputMode::Text => {
            println!("model:          {}", report.model_name);
            println!("schema version: {}", report.schema_version);
            println!("features:       {}", report.features);
            for name in report.feature_names {
                println!("  {name}");
            }
            0
        }
        OutputMode::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                2
            }
        },
    }
}

fn run(cli: Cli) -> i32 {
    let predictor = match load_predictor(&cli.bundle) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    info!(
        "using model '{}' with {} features",
        predictor.model_name(),
        predictor.schema().len()
    );

    match &cli.command {
        Command::Predict(args) => run_predict(&predictor, args, output_mode(args.json)),
        Command::Batch(args) => run_batch(&predictor, args, output_mode(args.json)),
        Command::Inspect(args) => run_inspect(&predictor, output_mode(args.json)),
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn main() {
    std::process::exit(run_cli());
}
