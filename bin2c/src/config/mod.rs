//! Configuration management for the encoder
use std::num::NonZeroUsize;
use std::path::Path;
use std::path::PathBuf;

use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

pub mod error;

use self::error::ConfigError;

/// The default number of encoded units written per output line.
pub const DEFAULT_LINE_WIDTH: i64 = 80;
/// The default text placed in front of the declared type.
pub const DEFAULT_DECLARATION_PREFIX: &str = "const ";

/// The output format selectors accepted on the command line and in
/// settings files.
#[derive(Deserialize, clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FormatKind {
    /// A `unsigned char` array followed by a length declaration.
    Char,
    /// A `char` pointer to a quoted string literal.
    String,
    /// An `NSString` pointer to a quoted string literal.
    Nsstring,
}

/// The shape of the generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// `unsigned char name[] = {0x..,...};` plus `unsigned int name_len`.
    ByteArray,
    /// `TypeName *name = "\x..";`
    QuotedString {
        /// The pointee type of the declared pointer.
        type_name: String,
    },
}

impl OutputFormat {
    fn describe(&self) -> &'static str {
        match self {
            OutputFormat::ByteArray => "byte array",
            OutputFormat::QuotedString { .. } => "quoted string",
        }
    }
}

impl From<FormatKind> for OutputFormat {
    fn from(value: FormatKind) -> Self {
        match value {
            FormatKind::Char => OutputFormat::ByteArray,
            FormatKind::String => OutputFormat::QuotedString { type_name: "char".to_string() },
            FormatKind::Nsstring => OutputFormat::QuotedString {
                type_name: "NSString".to_string(),
            },
        }
    }
}

/// Validated, immutable options for a single encoder run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    variable_name: String,
    output_format: OutputFormat,
    line_width: NonZeroUsize,
    null_terminate: bool,
    static_qualifier: bool,
    declaration_prefix: String,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

impl EncoderConfig {
    /// Start building a configuration that declares `variable_name`.
    pub fn builder(variable_name: impl Into<String>) -> EncoderConfigBuilder {
        EncoderConfigBuilder::new(variable_name)
    }

    /// The name of the declared variable. It is emitted verbatim.
    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    /// The declaration shape.
    pub fn output_format(&self) -> &OutputFormat {
        &self.output_format
    }

    /// Encoded units per output line.
    pub fn line_width(&self) -> NonZeroUsize {
        self.line_width
    }

    /// Whether a zero byte is appended after the input.
    pub fn null_terminate(&self) -> bool {
        self.null_terminate
    }

    /// The input file, `None` for standard input.
    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    /// The output file, `None` for standard output.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Everything written in front of the type of each declaration, e.g.
    /// `static const `.
    pub fn declaration_head(&self) -> String {
        let qualifier = if self.static_qualifier { "static " } else { "" };
        format!("{qualifier}{}", self.declaration_prefix)
    }
}

/// Collects raw, unvalidated encoder options.
#[derive(Debug, Clone)]
pub struct EncoderConfigBuilder {
    variable_name: String,
    output_format: OutputFormat,
    line_width: i64,
    null_terminate: bool,
    static_qualifier: bool,
    declaration_prefix: Option<String>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
}

impl EncoderConfigBuilder {
    fn new(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            output_format: OutputFormat::ByteArray,
            line_width: DEFAULT_LINE_WIDTH,
            null_terminate: false,
            static_qualifier: false,
            declaration_prefix: None,
            input_path: None,
            output_path: None,
        }
    }

    /// Set the declaration shape.
    pub fn output_format(mut self, output_format: impl Into<OutputFormat>) -> Self {
        self.output_format = output_format.into();
        self
    }

    /// Set the number of encoded units per line. Checked in [`Self::build`].
    pub fn line_width(mut self, line_width: i64) -> Self {
        self.line_width = line_width;
        self
    }

    /// Append a zero byte after the input. Byte arrays only.
    pub fn null_terminate(mut self, null_terminate: bool) -> Self {
        self.null_terminate = null_terminate;
        self
    }

    /// Mark the declarations `static`.
    pub fn static_qualifier(mut self, static_qualifier: bool) -> Self {
        self.static_qualifier = static_qualifier;
        self
    }

    /// Override the `const ` declaration prefix.
    pub fn declaration_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.declaration_prefix = Some(prefix.into());
        self
    }

    /// Read from a file instead of standard input.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Write to a file instead of standard output.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Validate the collected options.
    pub fn build(self) -> Result<EncoderConfig, ConfigError> {
        if self.variable_name.is_empty() {
            return Err(ConfigError::EmptyVariableName);
        }

        let line_width = usize::try_from(self.line_width)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(ConfigError::InvalidLineWidth(self.line_width))?;

        if self.null_terminate && self.output_format != OutputFormat::ByteArray {
            return Err(ConfigError::IncompatibleOption {
                option: "null-terminate",
                format: self.output_format.describe(),
            });
        }

        let declaration_prefix = match self.declaration_prefix {
            Some(prefix) => normalize_prefix(prefix),
            None => DEFAULT_DECLARATION_PREFIX.to_string(),
        };

        Ok(EncoderConfig {
            variable_name: self.variable_name,
            output_format: self.output_format,
            line_width,
            null_terminate: self.null_terminate,
            static_qualifier: self.static_qualifier,
            declaration_prefix,
            input_path: self.input_path,
            output_path: self.output_path,
        })
    }
}

/// A non-empty prefix without trailing whitespace gets a single space so
/// that it does not run into the type name.
fn normalize_prefix(mut prefix: String) -> String {
    if !prefix.is_empty() && !prefix.ends_with(char::is_whitespace) {
        prefix.push(' ');
    }
    prefix
}

/// Defaults for the encoder options, loaded from an optional settings file
/// and the environment.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Encoded units per output line.
    pub line_width: i64,
    /// The output format selector.
    pub format: FormatKind,
    /// Whether declarations are marked `static`.
    pub static_qualifier: bool,
    /// Whether a zero byte is appended after the input.
    pub null_terminate: bool,
    /// The prefix placed before the declared type.
    pub declaration_prefix: String,
}

impl Settings {
    /// Initializing the settings first with the built-in defaults, then
    /// with the optional settings file and finally with environment
    /// variables.
    ///
    /// The environment variables are prefixed with `BIN2C_`, so the
    /// `line_width` setting is read from `BIN2C_LINE_WIDTH`.
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, config::ConfigError> {
        let env = Environment::with_prefix("BIN2C")
            .prefix_separator("_")
            .try_parsing(true);

        let mut cfg_builder = Config::builder()
            .set_default("line_width", DEFAULT_LINE_WIDTH)?
            .set_default("format", "char")?
            .set_default("static_qualifier", false)?
            .set_default("null_terminate", false)?
            .set_default("declaration_prefix", DEFAULT_DECLARATION_PREFIX)?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        cfg_builder.build()?.try_deserialize()
    }

    /// Seed an encoder configuration for `variable_name` with these
    /// defaults. Values set on the returned builder take precedence.
    pub fn encoder_builder(&self, variable_name: impl Into<String>) -> EncoderConfigBuilder {
        EncoderConfig::builder(variable_name)
            .output_format(self.format)
            .line_width(self.line_width)
            .static_qualifier(self.static_qualifier)
            .null_terminate(self.null_terminate)
            .declaration_prefix(self.declaration_prefix.clone())
    }
}
