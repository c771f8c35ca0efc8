use std::io::{self, Write};

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use dpi_params::error::ParamError;
use dpi_params::parameter_set::ParameterSet;
use dpi_params::units::Quantity;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

/// Print or export the DPI neuron parameters.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Start from a saved JSON parameter file instead of the DYNAP-SE defaults
    #[arg(short, long)]
    input: Option<String>,
    /// Write the parameters as JSON to this file instead of printing them
    #[arg(short, long)]
    output: Option<String>,
    /// Override a parameter, e.g., --set "Itau=4 pA" (repeatable)
    #[arg(long = "set", value_parser = parse_override)]
    overrides: Vec<(String, Quantity)>,
    /// The output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
    /// Append the description of each parameter (text format only)
    #[arg(short, long)]
    describe: bool,
    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn parse_override(s: &str) -> Result<(String, Quantity), ParamError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ParamError::InvalidQuantity(format!("expected key=value, got {}", s)))?;
    Ok((key.trim().to_string(), value.parse()?))
}

fn init_logging(level: LevelFilter) -> Result<(), ParamError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| ParamError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| ParamError::IOError(e.to_string()))?;
    Ok(())
}

fn main() -> Result<(), ParamError> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    init_logging(level)?;
    log::debug!("{:?}", args);

    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

/// Build the parameter set described by the arguments, then print or save it.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), ParamError> {
    let params = match &args.input {
        Some(path) => ParameterSet::load_from(path)?,
        None => ParameterSet::dynapse(),
    };
    let params = params.with_overrides(args.overrides.iter().map(|(key, value)| (key, *value)))?;

    let written = match (&args.output, args.format) {
        (Some(path), _) => {
            params.save_to(path)?;
            log::info!("Parameters saved to {}", path);
            Ok(())
        }
        (None, Format::Text) if args.describe => write!(out, "{:#}", params),
        (None, Format::Text) => write!(out, "{}", params),
        (None, Format::Json) => writeln!(out, "{}", params.to_json()?),
    };
    written.map_err(|e| ParamError::IOError(e.to_string()))
}
