//! SIGMA-Q quality-control classification core.
//!
//! Library surface for the dashboard-facing operations. The binary exposes
//! the same operations as subcommands; the runnable examples call straight
//! into [`commands`].

pub mod commands;
