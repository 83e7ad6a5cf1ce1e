use std::io::Write;
use std::path::{Path, PathBuf, is_separator};

use crate::cli::Options;
use crate::config::{CONFIG, paint};
use crate::console::{Console, Level};
use crate::error::{MakeSumError, Result};
use crate::scanner;
use crate::stats::collect_stats;

/// Everything a single invocation needs: where to work, what was asked,
/// and where to write
pub struct RunContext {
    workdir: PathBuf,
    options: Options,
    command_name: String,
    console: Console,
}

impl RunContext {
    /// Validate the working directory and bind it to the parsed options
    pub fn new(workdir: &str, options: Options, command_name: impl Into<String>) -> Result<Self> {
        let workdir = workdir.trim();
        if workdir.is_empty() {
            return Err(MakeSumError::InvalidArgument(
                "workdir parameter can't be empty.".to_string(),
            ));
        }
        if !Path::new(workdir).is_dir() {
            return Err(MakeSumError::InvalidArgument(format!(
                "workdir `{workdir}` doesn't exist."
            )));
        }

        let mut console = Console::stdio();
        console.set_silent(options.silent);

        Ok(Self {
            workdir: PathBuf::from(workdir),
            options,
            command_name: command_name.into(),
            console,
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn console(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn set_output_sink(&mut self, sink: impl Write + 'static) {
        self.console.set_output_sink(sink);
    }

    pub fn set_error_sink(&mut self, sink: impl Write + 'static) {
        self.console.set_error_sink(sink);
    }

    pub fn set_no_terminate(&mut self, no_terminate: bool) {
        self.console.set_no_terminate(no_terminate);
    }

    /// Directory the run operates on
    ///
    /// `--dir` wins over the working directory. A value starting with a path
    /// separator is taken as is, anything else is joined under the working
    /// directory.
    pub fn target_dir(&self) -> PathBuf {
        match self.options.dir.as_deref().filter(|dir| !dir.is_empty()) {
            Some(dir) if dir.starts_with(is_separator) => PathBuf::from(dir),
            Some(dir) => self.workdir.join(dir),
            None => self.workdir.clone(),
        }
    }

    /// Execute the run: show help when asked, otherwise scan the target
    pub fn run(&mut self) -> Result<bool> {
        let target = self.target_dir();

        if self.options.help {
            self.help(0)?;
            return Ok(true);
        }

        self.generate(&target)
    }

    /// Print usage information; a non-zero `level` ends the run with that code
    pub fn help(&mut self, level: i32) -> Result<()> {
        let palette = *self.console.palette();
        let name = &self.command_name;
        let flag = |text: &str| paint(palette.keyword, text);

        let aliases: Vec<_> = CONFIG.aliases_of(CONFIG.default_language).collect();
        let lang_note = if aliases.is_empty() {
            format!("default: {}", CONFIG.default_language)
        } else {
            format!("default: {}, aliases: {}", CONFIG.default_language, aliases.join(", "))
        };

        let out = self.console.output();
        writeln!(out)?;
        writeln!(out, "Usage : {name} [OPTIONS]")?;
        writeln!(out)?;
        writeln!(out)?;
        writeln!(out)?;
        writeln!(
            out,
            "{}, {} <DIR>        Working location, absolute or relative to the current directory.",
            flag("-d"),
            flag("--dir")
        )?;
        writeln!(
            out,
            "{}, {} <LANG>      Documentation language ({lang_note}).",
            flag("-l"),
            flag("--lang")
        )?;
        writeln!(
            out,
            "{}, {} <GLOBS>  Patterns to skip, separated by `{}`.",
            flag("-e"),
            flag("--exclude"),
            CONFIG.separator
        )?;
        writeln!(
            out,
            "{}, {}           Suppress informational output.",
            flag("-s"),
            flag("--silent")
        )?;
        writeln!(
            out,
            "{}, {}             Print this help.",
            flag("-h"),
            flag("--help")
        )?;
        out.flush()?;

        if level != 0 {
            return Err(MakeSumError::Exit { code: level });
        }
        Ok(())
    }

    /// Discover the documents of the chosen language below `target`
    ///
    /// Problems are reported as warnings; the run itself always succeeds.
    fn generate(&mut self, target: &Path) -> Result<bool> {
        let name = self
            .options
            .lang
            .as_deref()
            .unwrap_or(CONFIG.default_language);
        let Some(language) = CONFIG.language(name) else {
            self.console
                .write_error("Unsupported language %s.", &[&name], Level::Warning)?;
            return Ok(true);
        };

        if !target.is_dir() {
            self.console.write_error(
                "Directory %s doesn't exist.",
                &[&target.display()],
                Level::Warning,
            )?;
            return Ok(true);
        }

        let report = scanner::scan(target, language, &self.options.exclude_patterns())?;

        if !self.console.is_silent() && !report.documents.is_empty() {
            scanner::write_tree(self.console.output(), &report)?;
        }

        let stats = collect_stats(&report);
        if stats.skipped > 0 {
            log::debug!("Skipped {} binary or unreadable file(s)", stats.skipped);
        }
        self.console.write_info(
            "Found 76>%d %s document(s) in 76>%d director(ies).",
            &[&stats.total_documents, &language.id, &stats.total_directories],
        )?;

        Ok(true)
    }
}
