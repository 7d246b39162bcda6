//! Status command: what the engine currently reports

use colored::Colorize;
use serde::Serialize;
use stack_core::ResourceKind;
use stack_engine::{LiveState, PollReport};
use std::collections::BTreeSet;

use crate::context::AppContext;
use crate::error::Result;

#[derive(Debug, Serialize)]
struct StatusReport {
    containers: BTreeSet<String>,
    networks: BTreeSet<String>,
    volumes: BTreeSet<String>,
    failed: Vec<ResourceKind>,
}

/// Run the status command
pub fn run_status(ctx: &AppContext, json: bool) -> Result<()> {
    let state = LiveState::new();
    let poll = state.poll(&ctx.query());
    let report = StatusReport::new(&state, &poll);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render());
    }
    Ok(())
}

impl StatusReport {
    fn new(state: &LiveState, poll: &PollReport) -> Self {
        let sorted = |kind: ResourceKind| -> BTreeSet<String> {
            state.snapshot(kind).iter().cloned().collect()
        };
        Self {
            containers: sorted(ResourceKind::Container),
            networks: sorted(ResourceKind::Network),
            volumes: sorted(ResourceKind::Volume),
            failed: poll.failed.iter().map(|(kind, _)| *kind).collect(),
        }
    }

    fn render(&self) -> String {
        let sections = [
            (ResourceKind::Container, "Running containers", &self.containers),
            (ResourceKind::Network, "Networks", &self.networks),
            (ResourceKind::Volume, "Volumes", &self.volumes),
        ];

        let mut out = String::new();
        for (kind, heading, names) in sections {
            out.push_str(&format!("{}:\n", heading.bold()));
            if self.failed.contains(&kind) {
                out.push_str(&format!("  {}\n", "unavailable".red()));
            } else if names.is_empty() {
                out.push_str(&format!("  {}\n", "none".dimmed()));
            }
            for name in names {
                out.push_str(&format!("  {} {}\n", "+".green(), name));
            }
        }
        out
    }
}
