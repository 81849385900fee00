//! Tests for command assembly, provenance and listing.

use crate::error::CliError;
use crate::metadata::{ClassMetadata, MetadataSet, MethodMetadata, OptionSpec, Origin, Tier};
use crate::registry::{
    CommandTable, HandlerRef, ListingFilter, ListingLine, NameKind, assemble, grouped, list,
};
use crate::test_support::{command, sample_metadata};

fn assemble_one(origin: Origin, class: ClassMetadata) -> Result<CommandTable, CliError> {
    let mut set = MetadataSet::new();
    set.push(origin, class);
    assemble(&set)
}

#[test]
fn test_table_holds_every_primary_and_alias_name() {
    let table = assemble(&sample_metadata()).unwrap();

    // dof, version, help, cmd.all, cmd, cmd.system, cmd.sys, acme.build,
    // acme.deploy, ship, invoice.send, invoice.void
    assert_eq!(table.len(), 12);
    for name in ["dof", "cmd.all", "cmd", "cmd.sys", "ship", "invoice.void"] {
        assert!(table.contains(name), "missing {}", name);
    }
}

#[test]
fn test_prefix_and_unprefixed_alias_share_handler() {
    let class = ClassMetadata::new("CommandList")
        .prefix("cmd")
        .method(command("all", "all", "List all commands").alias("cmd"));
    let table = assemble_one(Origin::system(), class).unwrap();

    let primary = table.get("cmd.all").unwrap();
    let alias = table.get("cmd").unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(primary.handler, HandlerRef::new("CommandList", "all"));
    assert_eq!(alias.handler, primary.handler);
    assert_eq!(primary.kind, NameKind::Primary);
    assert_eq!(alias.kind, NameKind::Alias);
    assert_eq!(primary.description, "List all commands");
    assert_eq!(alias.description, "Alias of `cmd.all`");
    assert_eq!(alias.primary, "cmd.all");
    assert!(primary.aliases.contains("cmd"));
}

#[test]
fn test_names_are_lowercased() {
    let class = ClassMetadata::new("Deploy")
        .prefix("Deploy")
        .method(command("run", "Run", "Deploy").alias("SHIP"));
    let table = assemble_one(Origin::vendor("acme"), class).unwrap();

    let names: Vec<_> = table.names().collect();
    assert_eq!(names, vec!["deploy.run", "ship"]);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let class = ClassMetadata::new("Command").method(command("dof", "dof", "Default command"));
    let table = assemble_one(Origin::system(), class).unwrap();

    let lower = table.get("dof").unwrap();
    assert_eq!(table.get("Dof").unwrap(), lower);
    assert_eq!(table.get("DOF").unwrap(), lower);
}

#[test]
fn test_alias_without_primary_fails() {
    let class = ClassMetadata::new("Command").method(
        MethodMetadata::new("orphan")
            .alias("o")
            .describe("Has aliases but no command"),
    );
    let err = assemble_one(Origin::system(), class).unwrap_err();

    match err {
        CliError::AliasWithoutPrimary {
            class,
            method,
            aliases,
        } => {
            assert_eq!(class, "Command");
            assert_eq!(method, "orphan");
            assert_eq!(aliases, vec!["o"]);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_method_without_command_is_skipped() {
    let class = ClassMetadata::new("Command")
        .method(MethodMetadata::new("helper"))
        .method(command("dof", "dof", "Default command"));
    let table = assemble_one(Origin::system(), class).unwrap();

    assert_eq!(table.len(), 1);
}

#[test]
fn test_empty_description_fails() {
    let class = ClassMetadata::new("Command")
        .describe("Group label is not a substitute")
        .method(MethodMetadata::new("dof").command("dof").describe("   "));
    let err = assemble_one(Origin::system(), class).unwrap_err();

    assert!(matches!(err, CliError::EmptyDescription { ref method, .. } if method == "dof"));
}

#[test]
fn test_class_description_is_a_label_prefix() {
    let class = ClassMetadata::new("Compile")
        .describe("Compile")
        .method(command("etc", "compile.etc", "Compile configs into cache"));
    let table = assemble_one(Origin::system(), class).unwrap();

    assert_eq!(
        table.get("compile.etc").unwrap().description,
        "Compile: Compile configs into cache"
    );
}

#[test]
fn test_empty_option_notes_fail_after_merge() {
    let class = ClassMetadata::new("Deploy")
        .option("env", OptionSpec::new("Target environment"))
        .method(command("run", "deploy", "Deploy").option("env", OptionSpec::new("")));
    let err = assemble_one(Origin::vendor("acme"), class).unwrap_err();

    assert!(matches!(err, CliError::EmptyOptionDescription { ref option, .. } if option == "env"));
}

#[test]
fn test_empty_class_level_option_notes_fail() {
    let class = ClassMetadata::new("Deploy")
        .option("force", OptionSpec::new(""))
        .method(command("run", "deploy", "Deploy"));
    let err = assemble_one(Origin::vendor("acme"), class).unwrap_err();

    assert!(matches!(err, CliError::EmptyOptionDescription { ref option, .. } if option == "force"));
}

#[test]
fn test_empty_argv_notes_fail() {
    let class = ClassMetadata::new("Deploy").method(command("run", "deploy", "Deploy").argv(2, ""));
    let err = assemble_one(Origin::vendor("acme"), class).unwrap_err();

    assert!(matches!(err, CliError::EmptyArgvDescription { position: 2, .. }));
}

#[test]
fn test_method_declarations_override_class_defaults() {
    let class = ClassMetadata::new("Deploy")
        .option("env", OptionSpec::new("Target environment").with_default("staging"))
        .option("force", OptionSpec::new("Skip checks"))
        .argv(1, "Build identifier")
        .method(
            command("run", "deploy", "Deploy")
                .option("env", OptionSpec::new("Production only").with_default("prod"))
                .argv(1, "Release tag"),
        );
    let table = assemble_one(Origin::vendor("acme"), class).unwrap();
    let spec = table.get("deploy").unwrap();

    assert_eq!(spec.options.len(), 2);
    assert_eq!(spec.options["env"].notes, "Production only");
    assert_eq!(spec.options["env"].default.as_deref(), Some("prod"));
    assert_eq!(spec.options["force"].notes, "Skip checks");
    assert_eq!(spec.argv.len(), 1);
    assert_eq!(spec.argv[&1], "Release tag");
}

#[test]
fn test_duplicate_across_origins_names_both() {
    let mut set = MetadataSet::new();
    set.add_vendor(
        "acme",
        [ClassMetadata::new("AcmeBuild").method(command("run", "build", "Build with acme"))],
    );
    set.add_domain(
        "billing",
        [ClassMetadata::new("BillingBuild").method(command("run", "build", "Build billing"))],
    );

    match assemble(&set).unwrap_err() {
        CliError::DuplicateCommand {
            command,
            current,
            current_origin,
            conflict,
            conflict_origin,
        } => {
            assert_eq!(command, "build");
            assert_eq!(current, HandlerRef::new("BillingBuild", "run"));
            assert_eq!(current_origin, Origin::domain("billing"));
            assert_eq!(conflict, HandlerRef::new("AcmeBuild", "run"));
            assert_eq!(conflict_origin, Origin::vendor("acme"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_duplicate_ignores_case() {
    let class = ClassMetadata::new("Command")
        .method(command("a", "Build", "First"))
        .method(command("b", "BUILD", "Second"));
    let err = assemble_one(Origin::system(), class).unwrap_err();

    assert!(matches!(err, CliError::DuplicateCommand { ref command, .. } if command == "build"));
}

#[test]
fn test_alias_colliding_with_alias_fails() {
    let class = ClassMetadata::new("Command")
        .method(command("a", "compile", "Compile").alias("c"))
        .method(command("b", "clear", "Clear").alias("C"));
    let err = assemble_one(Origin::system(), class).unwrap_err();

    match err {
        CliError::DuplicateCommand {
            command,
            current,
            conflict,
            ..
        } => {
            assert_eq!(command, "c");
            assert_eq!(current.method_id, "b");
            assert_eq!(conflict.method_id, "a");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_alias_colliding_with_primary_fails() {
    let class = ClassMetadata::new("Command")
        .method(command("a", "version", "Version"))
        .method(command("b", "about", "About").alias("version"));
    let err = assemble_one(Origin::system(), class).unwrap_err();

    assert!(matches!(err, CliError::DuplicateCommand { ref command, .. } if command == "version"));
}

#[test]
fn test_alias_equal_to_own_primary_is_collapsed() {
    let class = ClassMetadata::new("Command").method(command("run", "run", "Run").alias("RUN"));
    let table = assemble_one(Origin::system(), class).unwrap();

    let spec = table.get("run").unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(spec.kind, NameKind::Primary);
    assert_eq!(spec.description, "Run");
    assert!(spec.aliases.is_empty());
}

#[test]
fn test_sequence_index_follows_tier_order() {
    let mut set = MetadataSet::new();
    set.add_domain(
        "billing",
        [ClassMetadata::new("Invoice").method(command("send", "invoice.send", "Send"))],
    );
    set.add_vendor(
        "acme",
        [ClassMetadata::new("Acme").method(command("build", "acme.build", "Build").alias("ab"))],
    );
    set.add_system([ClassMetadata::new("Command").method(command("dof", "dof", "Default"))]);

    let table = assemble(&set).unwrap();

    assert_eq!(
        table.registration_order(),
        &["dof", "acme.build", "ab", "invoice.send"]
    );
    let index = |name: &str| table.get(name).unwrap().provenance.sequence_index;
    assert_eq!(index("dof"), 0);
    assert_eq!(index("acme.build"), 1);
    assert_eq!(index("ab"), 2);
    assert_eq!(index("invoice.send"), 3);

    let spec = table.get("ab").unwrap();
    assert_eq!(spec.provenance.tier, Tier::Vendor);
    assert_eq!(spec.provenance.origin_id, "acme");
}

#[test]
fn test_provenance_views() {
    let table = assemble(&sample_metadata()).unwrap();
    let provenance = table.provenance();

    assert!(provenance.system().contains("dof"));
    assert!(provenance.system().contains("cmd"));
    assert!(!provenance.system().contains("ship"));

    let acme = provenance.vendor("acme").unwrap();
    assert_eq!(
        acme.iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["acme.build", "acme.deploy", "ship"]
    );
    assert!(provenance.vendor("other").is_none());

    let billing = provenance.domain("billing").unwrap();
    assert_eq!(billing.len(), 2);
    assert_eq!(provenance.domains().len(), 1);
}

#[test]
fn test_assembly_is_deterministic() {
    let first = assemble(&sample_metadata()).unwrap();
    let second = assemble(&sample_metadata()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_suggest_returns_every_substring_match() {
    let table = assemble(&sample_metadata()).unwrap();

    let suggestions = table.suggest("CMD.S");
    let names: Vec<_> = suggestions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["cmd.sys", "cmd.system"]);
    assert_eq!(suggestions[0].description, "Alias of `cmd.system`");

    let names: Vec<_> = table.suggest("ac").iter().map(|s| s.name.clone()).collect();
    assert_eq!(names, vec!["acme.build", "acme.deploy"]);

    assert!(table.suggest("zzz").is_empty());
}

#[test]
fn test_list_filters_by_vendor_sorted() {
    let table = assemble(&sample_metadata()).unwrap();

    let entries = list(&table, &ListingFilter::Vendor(Some("acme".to_string())));
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, vec!["acme.build", "acme.deploy", "ship"]);
    assert!(entries.iter().all(|e| e.tier == Tier::Vendor));
}

#[test]
fn test_list_filter_variants() {
    let table = assemble(&sample_metadata()).unwrap();

    assert_eq!(list(&table, &ListingFilter::All).len(), table.len());
    assert_eq!(list(&table, &ListingFilter::System).len(), 7);
    assert_eq!(list(&table, &ListingFilter::Vendor(None)).len(), 3);
    assert!(list(&table, &ListingFilter::Vendor(Some("none".to_string()))).is_empty());
    assert_eq!(
        list(&table, &ListingFilter::Domain(Some("billing".to_string()))).len(),
        2
    );
    assert_eq!(list(&table, &ListingFilter::Domain(None)).len(), 2);
}

#[test]
fn test_grouped_inserts_separator_between_initials() {
    let table = assemble(&sample_metadata()).unwrap();
    let entries = list(&table, &ListingFilter::All);
    let lines = grouped(&entries);

    let rendered: Vec<String> = lines
        .iter()
        .map(|line| match line {
            ListingLine::Entry(entry) => entry.name.clone(),
            ListingLine::Separator => "-".to_string(),
        })
        .collect();

    assert_eq!(
        rendered,
        vec![
            "acme.build",
            "acme.deploy",
            "-",
            "cmd",
            "cmd.all",
            "cmd.sys",
            "cmd.system",
            "-",
            "dof",
            "-",
            "help",
            "-",
            "invoice.send",
            "invoice.void",
            "-",
            "ship",
            "-",
            "version",
        ]
    );
}

#[test]
fn test_grouped_handles_empty_and_single() {
    assert!(grouped(&[]).is_empty());

    let table = assemble_one(
        Origin::system(),
        ClassMetadata::new("Command").method(command("dof", "dof", "Default")),
    )
    .unwrap();
    let entries = list(&table, &ListingFilter::All);
    assert_eq!(grouped(&entries), vec![ListingLine::Entry(&entries[0])]);
}

#[test]
fn test_table_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CommandTable>();
}

#[test]
fn test_listing_follows_provenance_views() {
    let table = assemble(&sample_metadata()).unwrap();
    let index = table.provenance();

    let acme: Vec<_> = list(&table, &ListingFilter::Vendor(Some("acme".to_string())))
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    let indexed: Vec<_> = index.vendor("acme").unwrap().iter().cloned().collect();
    assert_eq!(acme, indexed);

    let system: Vec<_> = list(&table, &ListingFilter::System)
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(system, index.system().iter().cloned().collect::<Vec<_>>());

    assert!(list(&table, &ListingFilter::Vendor(Some("nobody".to_string()))).is_empty());
}
