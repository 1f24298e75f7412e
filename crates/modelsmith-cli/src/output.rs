//! Everything the commands print on stdout goes through [`OutputManager`].
//!
//! Diagnostics belong to `tracing` (stderr); prompts belong to the prompter.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::{OwoColorize, Style};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

/// Status line flavours: symbol plus colour.
#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn symbol(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Warning => "\u{26a0}",
            Self::Info => "\u{2139}",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Warning => Style::new().yellow(),
            Self::Info => Style::new().blue(),
        }
    }
}

impl OutputManager {
    /// `--output-format` wins over `output.format` from the config; `auto`
    /// becomes human on a terminal and plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_str(&config.output.format, true)
                .unwrap_or(OutputFormat::Auto),
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.styled(text, Style::new().cyan().bold())
    }

    /// A dimmed line, for file contents in dry runs.
    pub fn dimmed(&self, text: &str) -> io::Result<()> {
        self.styled(text, Style::new().dimmed())
    }

    /// Pretty JSON on stdout. Not silenced by `--quiet`.
    pub fn json(&self, value: &serde_json::Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = format!("{} {msg}", tone.symbol());
        if self.no_color {
            self.term.write_line(&line)
        } else {
            self.term.write_line(&line.style(tone.style()).to_string())
        }
    }

    fn styled(&self, text: &str, style: Style) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.style(style).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, no_color: bool, output_format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_mode_swallows_status_lines() {
        let out = manager(true, true, OutputFormat::Plain);
        assert!(out.print("hidden").is_ok());
        assert!(out.success("hidden").is_ok());
        assert!(out.header("hidden").is_ok());
    }

    #[test]
    fn colour_follows_flags_and_format() {
        assert!(!manager(false, false, OutputFormat::Plain).supports_color());
        assert!(manager(false, false, OutputFormat::Human).supports_color());
        assert!(!manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
        };
        assert!(OutputManager::new(&args, &config).is_json());

        let explicit = GlobalArgs {
            output_format: OutputFormat::Plain,
            ..args
        };
        let out = OutputManager::new(&explicit, &config);
        assert!(!out.is_json());
        assert!(!out.supports_color());
    }
}
