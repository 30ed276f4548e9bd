//! Output formatting: table, JSON, YAML, plain.
//!
//! Render dispatch lives on [`OutputFormat`] itself. Table output uses
//! `tabled`, structured formats go through serde, plain emits one
//! identifier per line for scripting.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

impl ColorMode {
    /// Whether colored status lines should be emitted. Status lines go
    /// to stderr, so auto-detection checks that stream.
    pub fn enabled(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
        }
    }
}

impl OutputFormat {
    /// Render a list of items in this format.
    ///
    /// `to_row` maps an item to its `Tabled` table row; `id_fn` produces
    /// the one-per-line identifier used by `plain`.
    pub fn render_list<T, R>(
        &self,
        data: &[T],
        to_row: impl Fn(&T) -> R,
        id_fn: impl Fn(&T) -> String,
    ) -> String
    where
        T: serde::Serialize,
        R: Tabled,
    {
        match self {
            Self::Table => {
                let rows: Vec<R> = data.iter().map(to_row).collect();
                Table::new(&rows).with(Style::rounded()).to_string()
            }
            Self::Json | Self::JsonCompact => self.json(data),
            Self::Yaml => yaml(data),
            Self::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
        }
    }

    /// Render a single item in this format.
    ///
    /// Table output goes through `detail_fn`, a pre-formatted key/value
    /// block; detail views don't use the `Tabled` derive.
    pub fn render_single<T>(
        &self,
        data: &T,
        detail_fn: impl Fn(&T) -> String,
        id_fn: impl Fn(&T) -> String,
    ) -> String
    where
        T: serde::Serialize,
    {
        match self {
            Self::Table => detail_fn(data),
            Self::Json | Self::JsonCompact => self.json(data),
            Self::Yaml => yaml(data),
            Self::Plain => id_fn(data),
        }
    }

    fn json<T: serde::Serialize + ?Sized>(&self, data: &T) -> String {
        let result = if matches!(self, Self::JsonCompact) {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        result.expect("serialization should not fail")
    }
}

fn yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

/// Print rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a success status line to stderr, green when color is enabled.
pub fn print_status(message: &str, global: &GlobalOpts) {
    if global.quiet {
        return;
    }
    if global.color.enabled() {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{message}");
    }
}
