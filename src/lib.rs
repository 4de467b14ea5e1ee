//! nyan-review — GitHub webhook bot that scores pull-request complexity
//! and posts a cat-themed review comment.
//!
//! The analysis core (`analysis`, `comment`) is pure and synchronous;
//! the webhook handler wires it to the GitHub REST API.

pub mod analysis;
pub mod comment;
pub mod config;
pub mod github;
pub mod webhook;

pub use webhook::{router, AppState};
