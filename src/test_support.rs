use crate::dispatch::{CommandHandler, Console, HandlerRegistry};
use crate::metadata::{ClassMetadata, MetadataSet, MethodMetadata, OptionSpec};
use anyhow::bail;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

/// A method entry declaring `name` as its primary command.
pub(crate) fn command(method: &str, name: &str, description: &str) -> MethodMetadata {
    MethodMetadata::new(method).command(name).describe(description)
}

/// Metadata spanning all three tiers, pushed out of tier order on purpose.
///
/// Registers 12 names: 7 system, 3 from vendor `acme`, 2 from domain `billing`.
pub(crate) fn sample_metadata() -> MetadataSet {
    let mut set = MetadataSet::new();
    set.add_domain(
        "billing",
        [ClassMetadata::new("Invoice")
            .prefix("invoice")
            .method(command("send", "send", "Send an invoice").argv(1, "Invoice number"))
            .method(command("void", "void", "Void an invoice"))],
    );
    set.add_system([
        ClassMetadata::new("Command")
            .method(
                command("dof", "dof", "The default command")
                    .option("help", OptionSpec::new("Print help message")),
            )
            .method(command("version", "version", "Print the version"))
            .method(command("help", "help", "Print help of a command").argv(1, "Command name")),
        ClassMetadata::new("CommandList")
            .prefix("cmd")
            .method(command("all", "all", "List all commands").alias("cmd"))
            .method(command("system", "system", "List built-in commands").alias("cmd.sys")),
    ]);
    set.add_vendor(
        "acme",
        [ClassMetadata::new("Acme")
            .prefix("acme")
            .option("env", OptionSpec::new("Target environment").with_default("staging"))
            .method(command("build", "build", "Build the project"))
            .method(command("deploy", "deploy", "Deploy the build").alias("ship"))],
    );
    set
}

/// Test handler type `Echo` with methods `echo`, `fail`, `panic`, `halt`,
/// and `helper` (registered but never declared as a command).
pub(crate) struct EchoHandler;

impl CommandHandler for EchoHandler {
    fn invoke(&mut self, method: &str, console: &mut Console<'_>) -> anyhow::Result<()> {
        match method {
            "echo" => {
                let params = console.params().join(",");
                let line = format!(
                    "{} {} [{}] {}",
                    console.entry(),
                    console.name(),
                    params,
                    console.option_or("tag", "-")
                );
                console.line(line)?;
                Ok(())
            }
            "fail" => bail!("disk full"),
            "panic" => panic!("handler exploded"),
            "halt" => Err(console.fail("NOTHING_TO_DO", json!({ "cmd": console.name() }))),
            other => bail!("unexpected method {}", other),
        }
    }
}

pub(crate) fn echo_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register(
        "Echo",
        &["echo", "fail", "panic", "halt", "helper"],
        || Box::new(EchoHandler),
    );
    registry
}

/// Metadata for [`EchoHandler`], plus entries pointing at a missing type and
/// a missing method.
pub(crate) fn echo_metadata() -> MetadataSet {
    let mut set = MetadataSet::new();
    set.add_system([
        ClassMetadata::new("Echo")
            .method(command("echo", "echo", "Echo the invocation").alias("say"))
            .method(command("fail", "broken", "Always fails"))
            .method(command("panic", "explode", "Always panics"))
            .method(command("halt", "halt", "Halts through the console"))
            .method(command("gone", "gone", "Method is not registered")),
        ClassMetadata::new("Missing").method(command("run", "ghost", "Type is not registered")),
    ]);
    set
}

pub(crate) fn write_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
