//! Sportsbook naming and data-source routing.
//!
//! Regulated US books are tracked through Pikkit; offshore and specialty
//! books through OddsJam. Several books are spelled differently by the two
//! trackers, so names are folded to one canonical spelling before lookup.

use super::bet::BetSource;

/// Books whose bets are imported from Pikkit, by canonical name.
pub const PIKKIT_SPORTSBOOKS: &[&str] = &[
    "BetMGM",
    "Caesars",
    "DraftKings",
    "ESPN BET",
    "Fanatics",
    "FanDuel",
    "Fliff",
    "PrizePicks",
    "Underdog Fantasy",
    "Novig",
    "Onyx",
    "ProphetX",
    "Rebet",
    "Thrillzz",
];

/// Books whose bets are imported from OddsJam, by canonical name.
pub const ODDSJAM_SPORTSBOOKS: &[&str] = &[
    "BetNow",
    "BetOnline",
    "BetUS",
    "BookMaker",
    "Bovada",
    "Everygame",
    "MyBookie",
    "Sportzino",
    "Xbet",
    "bet105",
    "betwhale",
];

/// Alternate spelling to canonical spelling.
const ALIASES: &[(&str, &str)] = &[
    ("Prophet X", "ProphetX"),
    ("Draftkings Sportsbook", "DraftKings"),
    ("Fanduel Sportsbook", "FanDuel"),
    ("ESPNBet", "ESPN BET"),
    ("Onyx Odds", "Onyx"),
    ("Caesars Sportsbook", "Caesars"),
];

/// Canonical spelling of a sportsbook name. Unknown names are returned
/// trimmed but otherwise unchanged.
#[must_use]
pub fn canonical_name(name: &str) -> &str {
    let trimmed = name.trim();
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map_or(trimmed, |(_, canonical)| *canonical)
}

/// Two names refer to the same book.
#[must_use]
pub fn same_book(a: &str, b: &str) -> bool {
    canonical_name(a).eq_ignore_ascii_case(canonical_name(b))
}

/// Tracker that owns a book's bets. Unmapped and empty names fall back to
/// OddsJam.
#[must_use]
pub fn data_source_for(name: &str) -> BetSource {
    let canonical = canonical_name(name);
    if PIKKIT_SPORTSBOOKS
        .iter()
        .any(|book| book.eq_ignore_ascii_case(canonical))
    {
        BetSource::Pikkit
    } else {
        BetSource::OddsJam
    }
}

/// Every configured book with its tracker, Pikkit first.
pub fn configured() -> impl Iterator<Item = (&'static str, BetSource)> {
    PIKKIT_SPORTSBOOKS
        .iter()
        .map(|book| (*book, BetSource::Pikkit))
        .chain(ODDSJAM_SPORTSBOOKS.iter().map(|book| (*book, BetSource::OddsJam)))
}
