//! Handler for the `stats` command group.

mod format;

pub mod handler;
