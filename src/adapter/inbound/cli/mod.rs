//! CLI module graph.

pub mod arb;
pub mod bets;
pub mod books;
pub mod command;
pub mod config;
pub mod convert;
pub mod dispatch;
pub mod ev;
pub mod feed;
pub mod output;
pub mod paths;
pub mod sharp;
pub mod stats;
