//! Watch command: continuous liveness table

use colored::Colorize;
use stack_core::settings::MIN_POLL_INTERVAL;
use stack_engine::{DockerCli, LiveState, PollReport, Poller};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::list::{OptionRow, collect_rows, render_table};
use crate::context::AppContext;
use crate::error::Result;

/// Run the watch command
///
/// Blocks until stdin yields a line or reaches end of file.
pub fn run_watch(ctx: AppContext, interval: Option<u64>) -> Result<()> {
    let interval = match interval {
        Some(secs) => Duration::from_secs(secs.max(MIN_POLL_INTERVAL)),
        None => ctx.settings.poll_interval(),
    };
    println!(
        "{} every {}s, press Enter to stop",
        "Watching".bold(),
        interval.as_secs()
    );

    let AppContext {
        catalog,
        selection,
        engine,
        ..
    } = ctx;
    let state = Arc::new(LiveState::new());
    let presence = Arc::clone(&state);
    let mut refreshes = 0usize;

    let handle = Poller::spawn(
        state,
        DockerCli::new(engine),
        interval,
        move |report: &PollReport| {
            refreshes += 1;
            let rows = collect_rows(&catalog, &selection, &*presence);
            let frame = render_frame(refreshes, &rows, report);
            let mut stdout = std::io::stdout().lock();
            // A closed stdout only loses the display
            let _ = stdout.write_all(frame.as_bytes());
            let _ = stdout.flush();
        },
    )?;

    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line);
    handle.stop();
    read?;
    Ok(())
}

fn render_frame(refresh: usize, rows: &[OptionRow], report: &PollReport) -> String {
    let mut out = format!("{}\n", format!("-- refresh {refresh} --").dimmed());
    for (kind, message) in &report.failed {
        out.push_str(&format!(
            "{} {} query failed: {}\n",
            "warning:".yellow().bold(),
            kind,
            message
        ));
    }
    if rows.is_empty() {
        out.push_str(&format!("{}\n", "No options found".yellow()));
    } else {
        out.push_str(&render_table(rows));
    }
    out
}
