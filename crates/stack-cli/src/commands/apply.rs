//! Apply commands: compose up/down and per-option engine actions

use colored::Colorize;
use stack_core::{OptionDef, OptionRef, Reconciler, ResourceKind, extract_names, image_names};
use stack_engine::LiveState;

use crate::context::AppContext;
use crate::error::Result;

/// Whole-document compose actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    Up,
    Down,
}

impl ComposeAction {
    fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Up => &["up", "-d"],
            Self::Down => &["down"],
        }
    }
}

/// Per-option container actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectAction {
    Start,
    Stop,
    Restart,
}

impl DirectAction {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

/// Run the up and down commands
pub fn run_compose(ctx: &AppContext, action: ComposeAction) -> Result<()> {
    ctx.require_enabled()?;
    let document = ctx.resolver().global();
    ctx.runner().compose(&document, action.args())?;

    let state = refreshed_state(ctx);
    let reconciler = Reconciler::new(ctx.resolver(), &state);
    let live = ctx
        .resolver()
        .enabled_options()
        .filter(|option| reconciler.is_option_live(option))
        .count();
    let enabled = ctx.resolver().enabled_options().count();
    println!(
        "{} {} of {} enabled options running",
        "✓".green(),
        live.to_string().bold(),
        enabled
    );
    Ok(())
}

/// Run the start, stop and restart commands
pub fn run_direct(ctx: &AppContext, reference: &OptionRef, action: DirectAction) -> Result<()> {
    let option = ctx.option(reference)?;
    let document = ctx.resolver().resolve(option)?;
    let containers: Vec<String> = extract_names(&document, ResourceKind::Container)
        .into_iter()
        .collect();

    if containers.is_empty() {
        println!(
            "{} {} declares no containers",
            "warning:".yellow().bold(),
            reference.to_string().cyan()
        );
        return Ok(());
    }

    ctx.runner().run_direct(action.as_str(), &containers)?;
    report_option(ctx, option);
    Ok(())
}

/// Run the pull command
pub fn run_pull(ctx: &AppContext, reference: &OptionRef) -> Result<()> {
    let option = ctx.option(reference)?;
    let document = ctx.resolver().resolve(option)?;
    let images: Vec<String> = image_names(&document).into_iter().collect();

    if images.is_empty() {
        println!(
            "{} {} declares no images",
            "warning:".yellow().bold(),
            reference.to_string().cyan()
        );
        return Ok(());
    }

    // `pull` takes one image per invocation
    let runner = ctx.runner();
    for image in &images {
        runner.run_direct("pull", std::slice::from_ref(image))?;
    }
    println!(
        "{} pulled {} image(s) for {}",
        "✓".green(),
        images.len(),
        reference.to_string().cyan()
    );
    Ok(())
}

/// Poll once so the report reflects what the action just did.
fn refreshed_state(ctx: &AppContext) -> LiveState {
    let state = LiveState::new();
    state.poll(&ctx.query());
    state
}

fn report_option(ctx: &AppContext, option: &OptionDef) {
    let state = refreshed_state(ctx);
    let live = Reconciler::new(ctx.resolver(), &state).is_option_live(option);
    let status = if live {
        "running".green()
    } else {
        "not running".yellow()
    };
    println!(
        "{} {} {}",
        "✓".green(),
        option.reference().to_string().cyan(),
        status
    );
}
