//! # Source literal encoder
//!
//! Streams bytes from a reader and writes them to a writer as a C
//! declaration. Two declaration shapes are supported, see
//! [`OutputFormat`]:
//!
//! ```text
//! // Imported from file 'logo.png'
//! const unsigned char logo[] = {
//! 	0x89,0x50,0x4e,0x47,
//! 	0x0d,0x0a
//! };
//! const unsigned int logo_len = 6;
//! ```
//!
//! ```text
//! const NSString *logo =
//! 	"\x89\x50\x4e\x47"
//! 	"\x0d\x0a";
//! ```
//!
//! The input is consumed one byte at a time with a single byte of
//! lookahead, which is what decides whether a separator or a line break
//! follows the current element.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;

use crate::config::EncoderConfig;
use crate::config::OutputFormat;
use crate::error::Error;

/// Written at the start of every wrapped line.
const LINE_START: &[u8] = b"\n\t";

/// A byte source with one byte of lookahead and an optional synthetic
/// terminator that is yielded once after the real input ends.
struct ByteStream<R> {
    bytes: io::Bytes<BufReader<R>>,
    terminator: Option<u8>,
    peeked: Option<u8>,
}

impl<R: Read> ByteStream<R> {
    fn new(reader: R, terminator: Option<u8>) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            terminator,
            peeked: None,
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.peeked.take() {
            Some(byte) => Ok(Some(byte)),
            None => self.pull(),
        }
    }

    fn has_more(&mut self) -> io::Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.pull()?;
        }
        Ok(self.peeked.is_some())
    }

    fn pull(&mut self) -> io::Result<Option<u8>> {
        match self.bytes.next() {
            Some(byte) => byte.map(Some),
            None => Ok(self.terminator.take()),
        }
    }
}

/// Encode everything `input` yields into `output` as described by
/// `config`, returning the number of encoded bytes.
///
/// The count includes the zero byte appended when
/// [`EncoderConfig::null_terminate`] is set. The output is flushed before
/// returning but neither stream is closed; that is left to their owners.
pub fn encode<R, W>(input: R, mut output: W, config: &EncoderConfig) -> Result<u64, Error>
where
    R: Read,
    W: Write,
{
    if let Some(path) = config.input_path() {
        writeln!(output, "// Imported from file '{}'", path.display())?;
    }

    let terminator = config.null_terminate().then_some(0u8);
    let mut bytes = ByteStream::new(input, terminator);

    let count = match config.output_format() {
        OutputFormat::ByteArray => write_byte_array(&mut bytes, &mut output, config)?,
        OutputFormat::QuotedString { type_name } => {
            write_quoted_string(&mut bytes, &mut output, config, type_name)?
        }
    };

    output.flush()?;
    Ok(count)
}

/// Open the streams named by `config`, encode, and release the streams.
///
/// Files are opened input first. If the output file cannot be opened the
/// input handle is dropped before the error is returned. Standard input
/// and output are used when no path is configured and are never closed.
#[tracing::instrument(skip_all, fields(variable = config.variable_name()))]
pub fn run(config: &EncoderConfig) -> Result<u64, Error> {
    let input: Box<dyn Read> = match config.input_path() {
        Some(path) => {
            let file =
                File::open(path).map_err(|error| Error::ReadOpenFailed(error, path.to_path_buf()))?;
            tracing::debug!(path = %path.display(), "opened input file");
            Box::new(file)
        }
        None => Box::new(io::stdin().lock()),
    };

    let output: Box<dyn Write> = match config.output_path() {
        Some(path) => {
            let file = File::create(path)
                .map_err(|error| Error::WriteOpenFailed(error, path.to_path_buf()))?;
            tracing::debug!(path = %path.display(), "opened output file");
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let count = encode(input, output, config)?;
    tracing::info!(bytes = count, "encoded input");

    Ok(count)
}

fn write_byte_array<R, W>(
    bytes: &mut ByteStream<R>,
    output: &mut W,
    config: &EncoderConfig,
) -> Result<u64, Error>
where
    R: Read,
    W: Write,
{
    let head = config.declaration_head();
    let name = config.variable_name();
    let width = config.line_width().get();

    write!(output, "{head}unsigned char {name}[] = {{")?;

    let mut count: u64 = 0;
    let mut column = 0;
    while let Some(byte) = bytes.next_byte()? {
        if column == 0 {
            output.write_all(LINE_START)?;
        }
        write!(output, "0x{byte:02x}")?;
        count += 1;
        column += 1;

        if bytes.has_more()? {
            output.write_all(b",")?;
        }
        if column == width {
            column = 0;
        }
    }

    if count > 0 {
        output.write_all(b"\n")?;
    }
    output.write_all(b"};\n")?;
    writeln!(output, "{head}unsigned int {name}_len = {count};")?;

    Ok(count)
}

fn write_quoted_string<R, W>(
    bytes: &mut ByteStream<R>,
    output: &mut W,
    config: &EncoderConfig,
    type_name: &str,
) -> Result<u64, Error>
where
    R: Read,
    W: Write,
{
    let head = config.declaration_head();
    let name = config.variable_name();
    let width = config.line_width().get();

    write!(output, "{head}{type_name} *{name} = ")?;
    output.write_all(LINE_START)?;
    output.write_all(b"\"")?;

    let mut count: u64 = 0;
    let mut column = 0;
    while let Some(byte) = bytes.next_byte()? {
        write!(output, "\\x{byte:02x}")?;
        count += 1;
        column += 1;

        if column == width {
            column = 0;
            if bytes.has_more()? {
                output.write_all(b"\"")?;
                output.write_all(LINE_START)?;
                output.write_all(b"\"")?;
            }
        }
    }

    output.write_all(b"\";\n")?;

    Ok(count)
}
