//! Sportsbook listing.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::domain::sportsbook;
use crate::error::Result;

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "Sportsbook")]
    name: &'static str,
    #[tabled(rename = "Tracker")]
    source: String,
}

/// List configured sportsbooks and the tracker that imports each one.
pub fn list() -> Result<()> {
    if output::is_quiet() && !output::is_json() {
        return Ok(());
    }

    if output::is_json() {
        let books: Vec<_> = sportsbook::configured()
            .map(|(name, source)| json!({ "name": name, "source": source }))
            .collect();
        output::json_output(json!({
            "command": "books.list",
            "sportsbooks": books,
        }));
        return Ok(());
    }

    output::section("Sportsbooks");
    let rows: Vec<BookRow> = sportsbook::configured()
        .map(|(name, source)| BookRow {
            name,
            source: source.to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::hint("bets at other books are read from OddsJam");
    Ok(())
}
