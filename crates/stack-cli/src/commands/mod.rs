//! Command implementations for stack-cli

pub mod apply;
pub mod list;
pub mod select;
pub mod show;
pub mod status;
pub mod watch;

pub use apply::{ComposeAction, DirectAction, run_compose, run_direct, run_pull};
pub use list::run_list;
pub use select::{EnableAction, run_set_addon, run_set_enabled};
pub use show::{run_global, run_names, run_show};
pub use status::run_status;
pub use watch::run_watch;
