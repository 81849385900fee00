//! Built-in (system tier) commands.
//!
//! These register through the same metadata builder API and handler registry
//! as any vendor or domain command; nothing in the dispatcher special-cases
//! them.

mod general;
mod list;


pub use general::GeneralCommands;
pub use list::ListCommands;

use crate::dispatch::HandlerRegistry;
use crate::metadata::{ClassMetadata, MethodMetadata, OptionSpec};

/// Handler type id of the general commands (`dof`, `version`, `help`).
pub const GENERAL_TYPE: &str = "Command";

/// Handler type id of the listing commands (`cmd.*`).
pub const LIST_TYPE: &str = "CommandList";

/// Metadata of every built-in command, in registration order.
pub fn metadata() -> Vec<ClassMetadata> {
    vec![
        ClassMetadata::new(GENERAL_TYPE)
            .method(
                MethodMetadata::new("dof")
                    .command("dof")
                    .describe("The default command of dof")
                    .option("help", OptionSpec::new("Print dof help message"))
                    .option("version", OptionSpec::new("Print dof version string")),
            )
            .method(
                MethodMetadata::new("version")
                    .command("version")
                    .describe("Print the dof version"),
            )
            .method(
                MethodMetadata::new("help")
                    .command("help")
                    .describe("Print help message of a command")
                    .argv(1, "The command name to print help message of"),
            ),
        ClassMetadata::new(LIST_TYPE)
            .prefix("cmd")
            .method(
                MethodMetadata::new("all")
                    .command("all")
                    .alias("cmd")
                    .describe("List all available commands")
                    .option(
                        "vendor",
                        OptionSpec::new("List commands of vendor packages only"),
                    ),
            )
            .method(
                MethodMetadata::new("system")
                    .command("system")
                    .alias("cmd.sys")
                    .alias("cmd.default")
                    .describe("List built-in commands"),
            )
            .method(
                MethodMetadata::new("vendor")
                    .command("vendor")
                    .describe("List commands of vendor packages")
                    .option("vendor", OptionSpec::new("List commands of the given vendor")),
            )
            .method(
                MethodMetadata::new("domain")
                    .command("domain")
                    .describe("List commands of domains")
                    .option("domain", OptionSpec::new("List commands of the given domain")),
            ),
    ]
}

/// Register the built-in handler types.
pub fn register(registry: &mut HandlerRegistry) {
    registry
        .register(GENERAL_TYPE, GeneralCommands::METHODS, || {
            Box::new(GeneralCommands)
        })
        .register(LIST_TYPE, ListCommands::METHODS, || Box::new(ListCommands));
}
