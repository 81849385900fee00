//! Parsed invocations.

use serde::Serialize;
use std::collections::BTreeMap;

/// Value of a command-line option. A flag given without a value is `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Value(String),
}

impl OptionValue {
    /// The explicit value, if one was given.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Flag(_) => None,
            OptionValue::Value(value) => Some(value),
        }
    }
}

/// Option name → value.
pub type Options = BTreeMap<String, OptionValue>;

/// One already-tokenized command-line invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// The program entry (argv[0]).
    pub entry: String,
    /// The command token as typed, if any.
    pub command: Option<String>,
    pub options: Options,
    pub params: Vec<String>,
}

impl Invocation {
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            ..Default::default()
        }
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.options.insert(name.into(), OptionValue::Flag(true));
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options
            .insert(name.into(), OptionValue::Value(value.into()));
        self
    }

    pub fn param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Tokenize raw arguments.
    ///
    /// - the first argument is the entry
    /// - the first non-option token is the command
    /// - `--name` and `-n` are flags, `--name=value` carries a value
    /// - everything after `--` is positional
    /// - any other token is positional, in order
    ///
    /// A repeated option keeps its last value.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let mut invocation = Invocation::new(
            args.next()
                .map(|entry| entry.as_ref().to_string())
                .unwrap_or_default(),
        );
        let mut positional_only = false;

        for arg in args {
            let arg = arg.as_ref();
            if positional_only {
                invocation.push_positional(arg);
                continue;
            }
            if arg == "--" {
                positional_only = true;
                continue;
            }

            let name = arg
                .strip_prefix("--")
                .or_else(|| arg.strip_prefix('-').filter(|_| arg.len() > 1));
            match name {
                Some(name) => match name.split_once('=') {
                    Some((name, value)) => {
                        invocation
                            .options
                            .insert(name.to_string(), OptionValue::Value(value.to_string()));
                    }
                    None => {
                        invocation
                            .options
                            .insert(name.to_string(), OptionValue::Flag(true));
                    }
                },
                None => invocation.push_positional(arg),
            }
        }

        invocation
    }

    fn push_positional(&mut self, arg: &str) {
        if self.command.is_none() {
            self.command = Some(arg.to_string());
        } else {
            self.params.push(arg.to_string());
        }
    }
}
