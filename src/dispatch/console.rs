//! Execution context handed to command handlers.

use super::invocation::{OptionValue, Options};
use crate::error::Termination;
use crate::registry::CommandTable;
use serde_json::Value;
use std::io::{self, Write};
use thiserror::Error;

/// A handler-initiated stop, raised through [`Console::error`] or [`Console::fail`].
///
/// The dispatcher recognizes it and reports it with its own termination tag
/// instead of wrapping it as an execution failure.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Halt {
    pub termination: Termination,
    pub message: String,
    pub context: Value,
}

/// The invocation as seen by a handler.
pub struct Console<'a> {
    entry: String,
    name: String,
    options: Options,
    params: Vec<String>,
    table: &'a CommandTable,
    out: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(
        entry: impl Into<String>,
        name: impl Into<String>,
        options: Options,
        params: Vec<String>,
        table: &'a CommandTable,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            entry: entry.into(),
            name: name.into(),
            options,
            params,
            table,
            out,
        }
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// The resolved command name (lowercase, never an empty token).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn first_param(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    pub fn table(&self) -> &'a CommandTable {
        self.table
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// The explicit value of an option, or `default` when absent or given as a bare flag.
    pub fn option_or<'s>(&'s self, name: &str, default: &'s str) -> &'s str {
        self.option(name)
            .and_then(OptionValue::as_str)
            .unwrap_or(default)
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: OptionValue) {
        self.options.insert(name.into(), value);
    }

    /// Write one line of output.
    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", text.as_ref())
    }

    /// Write an empty line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Stop the invocation with the `error` tag.
    pub fn error(&self, message: impl Into<String>, context: Value) -> anyhow::Error {
        Halt {
            termination: Termination::Error,
            message: message.into(),
            context,
        }
        .into()
    }

    /// Stop the invocation with the `fail` tag.
    pub fn fail(&self, message: impl Into<String>, context: Value) -> anyhow::Error {
        Halt {
            termination: Termination::Fail,
            message: message.into(),
            context,
        }
        .into()
    }
}
