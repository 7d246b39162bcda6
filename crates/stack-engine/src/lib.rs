//! Container engine layer for stackmix
//!
//! - [`LiveState`]: cached, concurrently readable view of engine resources
//! - [`Poller`]: background thread keeping a [`LiveState`] fresh
//! - [`EngineQuery`] / [`DockerCli`]: where listings come from
//! - [`ComposeRunner`]: applying documents and per-option actions

pub mod compose;
pub mod error;
pub mod poller;
pub mod query;
pub mod tracker;

pub use compose::{ComposeRunner, OutputMode, write_compose_file};
pub use error::{Error, Result};
pub use poller::{Poller, PollerHandle};
pub use query::{DockerCli, EngineQuery, parse_listing};
pub use tracker::{LiveState, PollReport};
