//! Option table: toggles, addon badges and liveness

use colored::{ColoredString, Colorize};
use serde::Serialize;
use stack_core::{BadgeColor, Catalog, Reconciler, Resolver, ResourcePresence, Selection};
use stack_engine::LiveState;

use crate::context::AppContext;
use crate::error::Result;

/// One addon as shown in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonRow {
    pub name: String,
    pub label: String,
    pub color: BadgeColor,
    pub active: bool,
}

/// One option as shown in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionRow {
    pub category: String,
    pub option: String,
    pub enabled: bool,
    pub live: bool,
    pub addons: Vec<AddonRow>,
}

/// Run the list command
pub fn run_list(ctx: &AppContext, json: bool) -> Result<()> {
    let state = LiveState::new();
    state.poll(&ctx.query());

    let rows = collect_rows(&ctx.catalog, &ctx.selection, &state);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else if rows.is_empty() {
        println!(
            "{} in {}",
            "No options found".yellow(),
            ctx.settings.fragments_dir().as_str().cyan()
        );
    } else {
        print!("{}", render_table(&rows));
    }
    Ok(())
}

/// Table rows for every option in catalog order.
pub fn collect_rows(
    catalog: &Catalog,
    selection: &Selection,
    presence: &dyn ResourcePresence,
) -> Vec<OptionRow> {
    let reconciler = Reconciler::new(Resolver::new(catalog, selection), presence);
    reconciler
        .liveness()
        .into_iter()
        .map(|(option, live)| OptionRow {
            category: option.category.clone(),
            option: option.name.clone(),
            enabled: selection.is_enabled(&option.category, &option.name),
            live,
            addons: option
                .addons()
                .iter()
                .map(|addon| AddonRow {
                    name: addon.name.clone(),
                    label: addon.display.label.clone(),
                    color: addon.display.color,
                    active: selection.is_addon_active(&option.category, &option.name, &addon.name),
                })
                .collect(),
        })
        .collect()
}

/// Render rows grouped under category headings.
///
/// ```text
/// db
///   ● postgres  G N  running
///   ○ redis          -
/// ```
pub fn render_table(rows: &[OptionRow]) -> String {
    let name_width = rows.iter().map(|r| r.option.len()).max().unwrap_or(0);
    let badge_width = rows
        .iter()
        .map(|r| badge_text_width(&r.addons))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let mut current_category: Option<&str> = None;
    for row in rows {
        if current_category != Some(row.category.as_str()) {
            out.push_str(&format!("{}\n", row.category.bold()));
            current_category = Some(row.category.as_str());
        }

        let enabled = if row.enabled {
            "●".green()
        } else {
            "○".dimmed()
        };
        let badges = row
            .addons
            .iter()
            .map(badge)
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let padding = badge_width - badge_text_width(&row.addons);
        let live = if row.live {
            "running".green()
        } else {
            "-".dimmed()
        };

        out.push_str(&format!(
            "  {} {:<name_width$}  {}{}  {}\n",
            enabled,
            row.option,
            badges,
            " ".repeat(padding),
            live
        ));
    }
    out
}

fn badge(addon: &AddonRow) -> ColoredString {
    if !addon.active {
        return addon.label.dimmed();
    }
    match addon.color {
        BadgeColor::Blue => addon.label.blue().bold(),
        BadgeColor::Magenta => addon.label.magenta().bold(),
        BadgeColor::Yellow => addon.label.yellow().bold(),
    }
}

/// Printed width of a badge list, ignoring color codes.
fn badge_text_width(addons: &[AddonRow]) -> usize {
    let labels: usize = addons.iter().map(|a| a.label.chars().count()).sum();
    labels + addons.len().saturating_sub(1)
}
