//! Leveled, colourised console output.
//!
//! Messages are templates with `%x` placeholders. Each placeholder is coloured
//! before positional substitution, so user-provided values stand out. A
//! placeholder may carry an explicit colour as `<code>>%x`, otherwise it gets
//! the palette's input colour. A bare `>` with no colour code leaves the
//! placeholder unpainted.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::{CONFIG, Palette, paint};
use crate::error::{MakeSumError, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%|(?:([0-9]+)?(>))?(%[a-zA-Z0-9])").unwrap());

/// Severity of a message written to the error sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    pub fn tag(self) -> &'static str {
        match self {
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        }
    }

    /// Numeric level, also the exit status used when an error terminates the run
    pub fn code(self) -> i32 {
        match self {
            Level::Warning => 0,
            Level::Error => 1,
        }
    }

    fn color(self, palette: &Palette) -> u8 {
        match self {
            Level::Warning => palette.warning,
            Level::Error => palette.error,
        }
    }
}

/// Colour every `%x` placeholder in `message`
pub fn highlight(message: &str, default_color: u8) -> String {
    PLACEHOLDER
        .replace_all(message, |caps: &Captures| match caps.get(3) {
            Some(token) => match (caps.get(1), caps.get(2)) {
                (Some(color), _) => paint(color.as_str(), token.as_str()),
                (None, Some(_)) => caps[0].to_string(),
                (None, None) => paint(default_color, token.as_str()),
            },
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitute positional arguments into a printf-style template
///
/// Any `%` followed by an ASCII letter or digit consumes the next argument,
/// `%%` yields a literal percent sign.
pub fn format_message(template: &str, args: &[&dyn Display]) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut remaining = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            output.push(c);
            continue;
        }

        match chars.peek().copied() {
            Some('%') => {
                chars.next();
                output.push('%');
            }
            Some(spec) if spec.is_ascii_alphanumeric() => {
                chars.next();
                let arg = remaining
                    .next()
                    .ok_or(MakeSumError::MissingArgument { given: args.len() })?;
                output.push_str(&arg.to_string());
            }
            _ => output.push('%'),
        }
    }

    Ok(output)
}

/// Output and error sinks plus the rules for writing to them
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,
    palette: Palette,
    no_terminate: bool,
    silent: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

impl Console {
    /// Console writing to the process stdout and stderr
    pub fn stdio() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
            palette: CONFIG.colors,
            no_terminate: false,
            silent: false,
        }
    }

    pub fn set_output_sink(&mut self, sink: impl Write + 'static) {
        self.out = Box::new(sink);
    }

    pub fn set_error_sink(&mut self, sink: impl Write + 'static) {
        self.err = Box::new(sink);
    }

    /// Keep error-level messages from ending the run
    pub fn set_no_terminate(&mut self, no_terminate: bool) {
        self.no_terminate = no_terminate;
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.silent = silent;
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Raw access to the output sink, for banners and trees
    pub fn output(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    pub fn highlight(&self, message: &str) -> String {
        highlight(message, self.palette.input)
    }

    /// Write a WARNING or ERROR line to the error sink
    ///
    /// An error-level message returns `MakeSumError::Exit` with the level's
    /// code unless termination has been disabled.
    pub fn write_error(&mut self, message: &str, args: &[&dyn Display], level: Level) -> Result<()> {
        let text = format_message(&self.highlight(message), args)?;
        let tag = paint(level.color(&self.palette), level.tag());

        writeln!(self.err, "[ {tag} ] :: {text}")?;
        self.err.flush()?;

        if level == Level::Error && !self.no_terminate {
            return Err(MakeSumError::Exit { code: level.code() });
        }
        Ok(())
    }

    /// Write an INFO line to the output sink, unless silent
    pub fn write_info(&mut self, message: &str, args: &[&dyn Display]) -> Result<()> {
        if self.silent {
            return Ok(());
        }

        let text = format_message(&self.highlight(message), args)?;
        writeln!(self.out, "[ INFO ] :: {text}")?;
        self.out.flush()?;
        Ok(())
    }
}
