use std::path::PathBuf;
use std::process::ExitCode;

use bin2c::config::FormatKind;
use bin2c::config::Settings;
use bin2c::error::Error;
use bin2c::error::USAGE_EXIT_CODE;
use clap::Parser;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Convert a binary file to a C array for inclusion in programs.
#[derive(Debug, Parser)]
#[clap(name = "bin2c")]
struct Bin2cArgs {
    /// The file to encode. Standard input is read when omitted.
    #[clap(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// The file to write. Standard output is used when omitted.
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// The name of the declared variable.
    #[clap(short = 'a', long = "array")]
    array: String,

    /// Encoded units per output line.
    #[clap(short = 'l', long = "line-width", allow_hyphen_values = true)]
    line_width: Option<i64>,

    /// The declaration to generate.
    #[clap(short = 't', long = "type", value_enum)]
    format: Option<FormatKind>,

    /// Mark the declarations `static`.
    #[clap(short = 's', long = "static", overrides_with = "no_static")]
    static_qualifier: bool,

    /// Do not mark the declarations `static`, even if the settings do.
    #[clap(long = "no-static", overrides_with = "static_qualifier")]
    no_static: bool,

    /// Append a zero byte to the data. Only valid for the `char` format.
    #[clap(short = '0', long = "null-terminate", overrides_with = "no_null_terminate")]
    null_terminate: bool,

    /// Do not append a zero byte, even if the settings do.
    #[clap(long = "no-null-terminate", overrides_with = "null_terminate")]
    no_null_terminate: bool,

    /// Text placed before the declared type.
    #[clap(short = 'p', long = "prefix")]
    prefix: Option<String>,

    /// Optional path to a settings file providing defaults for the options
    /// above.
    #[clap(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[clap(long = "log-format", default_value = "pretty")]
    log_format: LogOutputFormat,
}

fn main() -> ExitCode {
    // Usage goes to stderr, including for `-h`, and nothing is opened.
    let args = match Bin2cArgs::try_parse() {
        Ok(args) => args,
        Err(error) => {
            eprint!("{}", error.render());
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    let pretty = matches!(args.log_format, LogOutputFormat::Pretty);
    bin2c::logging::setup_logging("warn", pretty);

    match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "bin2c failed");
            eprintln!("bin2c: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run(args: Bin2cArgs) -> Result<u64, Error> {
    let settings = Settings::new(args.config.as_deref())?;

    let static_qualifier =
        toggle(args.static_qualifier, args.no_static).unwrap_or(settings.static_qualifier);
    let null_terminate =
        toggle(args.null_terminate, args.no_null_terminate).unwrap_or(settings.null_terminate);

    let mut builder = settings
        .encoder_builder(args.array)
        .static_qualifier(static_qualifier)
        .null_terminate(null_terminate);

    if let Some(line_width) = args.line_width {
        builder = builder.line_width(line_width);
    }
    if let Some(format) = args.format {
        builder = builder.output_format(format);
    }
    if let Some(prefix) = args.prefix {
        builder = builder.declaration_prefix(prefix);
    }
    if let Some(path) = args.input {
        builder = builder.input_path(path);
    }
    if let Some(path) = args.output {
        builder = builder.output_path(path);
    }

    let config = builder.build()?;
    bin2c::run(&config)
}

/// Resolves a `--flag` / `--no-flag` pair. `None` when neither was given,
/// so the settings value applies.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
