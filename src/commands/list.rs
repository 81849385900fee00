//! `cmd.all`, `cmd.system`, `cmd.vendor` and `cmd.domain`.

use crate::dispatch::{CommandHandler, Console, OptionValue};
use crate::registry::listing::{self, ListingFilter, ListingLine};
use anyhow::bail;

/// Descriptions longer than this are cut in listings.
const DESCRIPTION_WIDTH: usize = 64;

pub struct ListCommands;

impl ListCommands {
    pub const METHODS: &'static [&'static str] = &["all", "system", "vendor", "domain"];

    /// The filter selected by `--system`, `--vendor[=id]` or `--domain[=name]`.
    ///
    /// A bare `--vendor`/`--domain` flag selects every vendor or domain.
    fn filter(console: &Console<'_>) -> ListingFilter {
        let narrowed = |value: &OptionValue| value.as_str().map(str::to_string);

        if console.has_option("system") {
            ListingFilter::System
        } else if let Some(vendor) = console.option("vendor") {
            ListingFilter::Vendor(narrowed(vendor))
        } else if let Some(domain) = console.option("domain") {
            ListingFilter::Domain(narrowed(domain))
        } else {
            ListingFilter::All
        }
    }

    fn all(console: &mut Console<'_>) -> anyhow::Result<()> {
        let entries = listing::list(console.table(), &Self::filter(console));

        console.blank()?;
        for line in listing::grouped(&entries) {
            match line {
                ListingLine::Entry(entry) => console.line(format!(
                    "{}\t{}",
                    entry.name,
                    fixed(&entry.description, DESCRIPTION_WIDTH)
                ))?,
                ListingLine::Separator => console.blank()?,
            }
        }
        if !entries.is_empty() {
            console.blank()?;
        }
        Ok(())
    }

    /// Force `option` to be present, keeping an explicit value if one was given.
    fn require_option(console: &mut Console<'_>, option: &str) {
        if !console.has_option(option) {
            console.set_option(option, OptionValue::Flag(true));
        }
    }
}

impl CommandHandler for ListCommands {
    fn invoke(&mut self, method: &str, console: &mut Console<'_>) -> anyhow::Result<()> {
        match method {
            "all" => {}
            "system" => Self::require_option(console, "system"),
            "vendor" => Self::require_option(console, "vendor"),
            "domain" => Self::require_option(console, "domain"),
            other => bail!("unknown method {} on CommandList", other),
        }
        Self::all(console)
    }
}

/// At most `width` characters of `text`.
fn fixed(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
