//! Process-wide, read-only configuration.

/// 256-colour ANSI codes used for each kind of console output
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub error: u8,
    pub input: u8,
    pub success: u8,
    pub warning: u8,
    pub text: u8,
    pub keyword: u8,
}

/// A documentation language the scanner knows how to recognise
#[derive(Debug)]
pub struct Language {
    /// Registry identifier, e.g. `markdown`
    pub id: &'static str,

    /// Regex matched against a file name to decide whether it belongs to the language
    ///
    /// Markdown uses `(?i)\.md$` rather than a bare `md$` suffix, so names
    /// such as `build.cmd` are not picked up.
    pub extension: &'static str,

    /// Marker asking for a summary to be generated at this spot
    pub insert_tag: &'static str,

    /// Marker opening a generated summary block
    pub open_tag: &'static str,

    /// Marker closing a generated summary block
    pub close_tag: &'static str,
}

#[derive(Debug)]
pub struct Config {
    pub colors: Palette,

    /// Separator for list-valued options such as `--exclude`
    pub separator: char,

    pub languages: &'static [Language],

    /// Alternate names mapped onto registry identifiers
    pub aliases: &'static [(&'static str, &'static str)],

    pub default_language: &'static str,
}

pub static CONFIG: Config = Config {
    colors: Palette {
        error: 196,
        input: 220,
        success: 76,
        warning: 208,
        text: 221,
        keyword: 39,
    },
    separator: ',',
    languages: &[Language {
        id: "markdown",
        extension: r"(?i)\.md$",
        insert_tag: "[](MakeSummary)",
        open_tag: "[](BeginSummary)",
        close_tag: "[](EndSummary)",
    }],
    aliases: &[("md", "markdown")],
    default_language: "markdown",
};

impl Config {
    /// Look up a language by identifier or alias, ignoring case
    pub fn language(&self, name: &str) -> Option<&Language> {
        let name = name.trim();
        let id = self
            .aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
            .map_or(name, |(_, id)| *id);

        self.languages
            .iter()
            .find(|language| language.id.eq_ignore_ascii_case(id))
    }

    /// Aliases pointing at the given language identifier
    pub fn aliases_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.aliases
            .iter()
            .filter(move |(_, target)| *target == id)
            .map(|(alias, _)| *alias)
    }
}

/// Wrap `text` in the escape sequence for a 256-colour foreground
pub fn paint(color: impl std::fmt::Display, text: &str) -> String {
    format!("\x1b[38;5;{color}m{text}\x1b[0m")
}
