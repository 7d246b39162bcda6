//! Document output: resolved option, global document, declared names

use colored::Colorize;
use stack_core::{Document, OptionRef, ResourceKind, ResourceNames};

use crate::context::AppContext;
use crate::error::Result;

/// Render a document as YAML or pretty JSON.
pub fn render_document(document: &Document, json: bool) -> Result<String> {
    let text = if json {
        let mut text = document.to_json_pretty()?;
        text.push('\n');
        text
    } else {
        document.to_yaml()?
    };
    Ok(text)
}

/// Run the show command
pub fn run_show(ctx: &AppContext, reference: &OptionRef, json: bool) -> Result<()> {
    let option = ctx.option(reference)?;
    let document = ctx.resolver().resolve(option)?;
    print!("{}", render_document(&document, json)?);
    Ok(())
}

/// Run the global command
pub fn run_global(ctx: &AppContext, json: bool) -> Result<()> {
    let document = ctx.resolver().global();
    print!("{}", render_document(&document, json)?);
    Ok(())
}

/// Run the names command
pub fn run_names(ctx: &AppContext, reference: &OptionRef, json: bool) -> Result<()> {
    let option = ctx.option(reference)?;
    let names = ResourceNames::of(&ctx.resolver().resolve(option)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        print!("{}", render_names(&names));
    }
    Ok(())
}

fn render_names(names: &ResourceNames) -> String {
    let mut out = String::new();
    for kind in ResourceKind::ALL {
        let heading = match kind {
            ResourceKind::Container => "Containers",
            ResourceKind::Network => "Networks",
            ResourceKind::Volume => "Volumes",
        };
        out.push_str(&format!("{}:\n", heading.bold()));
        let set = names.get(kind);
        if set.is_empty() {
            out.push_str(&format!("  {}\n", "none".dimmed()));
        }
        for name in set {
            out.push_str(&format!("  {}\n", name.cyan()));
        }
    }
    out
}
