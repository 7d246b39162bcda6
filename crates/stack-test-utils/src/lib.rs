//! Shared test utilities for the stackmix workspace.
//!
//! This crate provides fragment store fixtures so crate test suites do
//! not each hand-roll directory trees. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`store`]: [`TestStore`] builder for fragment trees and state files

pub mod store;

pub use store::TestStore;
