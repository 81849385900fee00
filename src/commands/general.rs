//! `dof`, `version` and `help`.

use crate::dispatch::{CommandHandler, Console};
use anyhow::bail;
use serde_json::json;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Notes of the `ascii` option every command accepts.
const ASCII_NOTES: &str = "Whether display command output as plain ascii text";

pub struct GeneralCommands;

impl GeneralCommands {
    pub const METHODS: &'static [&'static str] = &["dof", "version", "help"];

    fn dof(console: &mut Console<'_>) -> anyhow::Result<()> {
        if console.has_option("help") {
            return Self::help(console);
        }
        if console.has_option("version") {
            return Self::version(console);
        }

        console.line(format!("(c)  {}  {}", console.entry(), VERSION))?;
        console.blank()?;
        Ok(())
    }

    fn version(console: &mut Console<'_>) -> anyhow::Result<()> {
        console.line(VERSION)?;
        Ok(())
    }

    fn help(console: &mut Console<'_>) -> anyhow::Result<()> {
        let entry = console.entry().to_string();
        let Some(name) = console.first_param().map(str::to_lowercase) else {
            console.line(format!(
                "Usage: {} {{COMMAND}} [--options ...] [[--] arguments ...]",
                entry
            ))?;
            console.blank()?;
            return Ok(());
        };

        let table = console.table();
        let Some(spec) = table.get(&name) else {
            return Err(console.error(
                format!("COMMAND_NOT_EXIST: {}", name),
                json!({ "cmd": name }),
            ));
        };

        console.line(format!(
            "Usage: {} {} [--options ...] [[--] arguments ...]",
            entry, name
        ))?;
        console.blank()?;
        console.line(format!("* Command: {}", name))?;
        if spec.is_alias() {
            console.line(format!("* Alias of: {}", spec.primary))?;
        }
        console.blank()?;
        console.line(format!("* Description: {}", spec.description))?;
        console.blank()?;

        console.line("* Options: ")?;
        for (option, declared) in &spec.options {
            let default = declared.default.as_deref().unwrap_or("NULL");
            console.line(format!(
                "\t--{}\t{}\t(Default: {})",
                option, declared.notes, default
            ))?;
        }
        if !spec.options.contains_key("ascii") {
            console.line(format!("\t--ascii\t{}\t(Default: false)", ASCII_NOTES))?;
        }
        console.blank()?;

        console.line("* Arguments: ")?;
        for (position, notes) in &spec.argv {
            console.line(format!("\t#{}\t{}", position, notes))?;
        }
        console.blank()?;

        console.line(format!("* Class: {}", spec.handler.type_id))?;
        console.line(format!("* Method: {}", spec.handler.method_id))?;
        console.blank()?;
        Ok(())
    }
}

impl CommandHandler for GeneralCommands {
    fn invoke(&mut self, method: &str, console: &mut Console<'_>) -> anyhow::Result<()> {
        match method {
            "dof" => Self::dof(console),
            "version" => Self::version(console),
            "help" => Self::help(console),
            other => bail!("unknown method {} on Command", other),
        }
    }
}
