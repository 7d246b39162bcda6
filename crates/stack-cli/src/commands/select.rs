//! Toggle commands: enable, disable, toggle, addon

use colored::Colorize;
use stack_core::OptionRef;

use crate::context::AppContext;
use crate::error::Result;

/// How to change an option's enabled flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableAction {
    Enable,
    Disable,
    Toggle,
}

/// Run the enable, disable and toggle commands
pub fn run_set_enabled(
    ctx: &mut AppContext,
    reference: &OptionRef,
    action: EnableAction,
) -> Result<bool> {
    ctx.option(reference)?;
    let (category, option) = (&reference.category, &reference.option);

    let enabled = match action {
        EnableAction::Enable => {
            ctx.selection.set_enabled(category, option, true);
            true
        }
        EnableAction::Disable => {
            ctx.selection.set_enabled(category, option, false);
            false
        }
        EnableAction::Toggle => ctx.selection.toggle_enabled(category, option),
    };
    ctx.save_selection()?;

    let status = if enabled {
        "enabled".green()
    } else {
        "disabled".yellow()
    };
    println!("{} {} {}", "✓".green(), reference.to_string().cyan(), status);
    Ok(enabled)
}

/// Run the addon command
pub fn run_set_addon(
    ctx: &mut AppContext,
    reference: &OptionRef,
    addon: &str,
    active: bool,
) -> Result<()> {
    ctx.check_addon(reference, addon)?;
    ctx.selection
        .set_addon(&reference.category, &reference.option, addon, active);
    ctx.save_selection()?;

    let status = if active {
        "active".green()
    } else {
        "inactive".yellow()
    };
    println!(
        "{} {} addon {} {}",
        "✓".green(),
        reference.to_string().cyan(),
        addon.bold(),
        status
    );
    if active && !ctx.selection.is_enabled(&reference.category, &reference.option) {
        println!(
            "  {} the option itself is disabled (use {})",
            "note:".dimmed(),
            format!("stackmix enable {reference}").cyan()
        );
    }
    Ok(())
}
