//! Bet records as served by the tracker backend.
//!
//! The backend merges two upstream trackers (OddsJam and Pikkit) into one
//! record shape. Odds are American integers; a closing line (`clv`) of
//! `null` or `0` means none was captured.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::ev::EvAnalysis;
use super::money::Money;
use super::odds::AmericanOdds;

/// Upstream tracker a record was imported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetSource {
    #[serde(rename = "oddsjam")]
    OddsJam,
    Pikkit,
}

impl BetSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OddsJam => "oddsjam",
            Self::Pikkit => "pikkit",
        }
    }
}

impl fmt::Display for BetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum BetStatus {
    #[default]
    Pending,
    Won,
    Lost,
    Push,
    Void,
    Refunded,
}

impl BetStatus {
    pub const ALL: [BetStatus; 6] = [
        Self::Pending,
        Self::Won,
        Self::Lost,
        Self::Push,
        Self::Void,
        Self::Refunded,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Won => "won",
            Self::Lost => "lost",
            Self::Push => "push",
            Self::Void => "void",
            Self::Refunded => "refunded",
        }
    }

    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Read a status in either provider's vocabulary. Unknown values are
    /// treated as pending.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WON" | "WIN" | "SETTLED_WIN" => Self::Won,
            "LOST" | "LOSS" | "SETTLED_LOSS" => Self::Lost,
            "PUSH" | "SETTLED_PUSH" => Self::Push,
            "VOID" | "SETTLED_VOID" => Self::Void,
            "REFUNDED" => Self::Refunded,
            _ => Self::Pending,
        }
    }

    /// Read a status as exported by a specific provider.
    ///
    /// OddsJam exports `PENDING|WON|LOST|REFUNDED`; Pikkit exports
    /// `PLACED|SETTLED_WIN|SETTLED_LOSS|SETTLED_PUSH|SETTLED_VOID`.
    #[must_use]
    pub fn from_provider(source: BetSource, raw: &str) -> Self {
        let upper = raw.trim().to_ascii_uppercase();
        match (source, upper.as_str()) {
            (BetSource::OddsJam, "WON") => Self::Won,
            (BetSource::OddsJam, "LOST") => Self::Lost,
            (BetSource::OddsJam, "REFUNDED") => Self::Refunded,
            (BetSource::Pikkit, "SETTLED_WIN") => Self::Won,
            (BetSource::Pikkit, "SETTLED_LOSS") => Self::Lost,
            (BetSource::Pikkit, "SETTLED_PUSH") => Self::Push,
            (BetSource::Pikkit, "SETTLED_VOID") => Self::Void,
            _ => Self::Pending,
        }
    }
}

impl From<String> for BetStatus {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl fmt::Display for BetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single bet or parlay. Provider-specific types (`positive_ev`,
/// `arbitrage`, `low_hold`, ...) are all straight bets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum BetType {
    #[default]
    Straight,
    Parlay,
}

impl BetType {
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("parlay") {
            Self::Parlay
        } else {
            Self::Straight
        }
    }
}

impl From<String> for BetType {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

/// One tracked bet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub source: Option<BetSource>,
    #[serde(default)]
    pub original_bet_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub sportsbook: String,
    #[serde(default, deserialize_with = "bet_type_or_default")]
    pub bet_type: BetType,
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: BetStatus,
    /// Placed odds, American.
    #[serde(default, deserialize_with = "i32_or_zero")]
    pub odds: i32,
    /// Closing-line odds, American.
    #[serde(default)]
    pub clv: Option<i32>,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub stake: Money,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub bet_profit: Money,
    #[serde(default, deserialize_with = "timestamp")]
    pub time_placed: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp")]
    pub time_settled: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "timestamp")]
    pub event_start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub bet_info: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub bet_name: Option<String>,
    #[serde(default)]
    pub market_name: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl BetRecord {
    /// Placed odds, if they form a valid American line.
    #[must_use]
    pub fn placed_odds(&self) -> Option<AmericanOdds> {
        AmericanOdds::try_new(self.odds).ok()
    }

    /// Closing line; absent, zero and invalid values all mean none.
    #[must_use]
    pub fn closing_line(&self) -> Option<AmericanOdds> {
        self.clv
            .filter(|clv| *clv != 0)
            .and_then(|clv| AmericanOdds::try_new(clv).ok())
    }

    /// EV against the closing line.
    #[must_use]
    pub fn ev(&self) -> EvAnalysis {
        match (self.placed_odds(), self.closing_line()) {
            (Some(placed), closing @ Some(_)) => EvAnalysis::compute(placed, closing, self.stake),
            _ => EvAnalysis::no_clv(),
        }
    }

    /// Player-prop markets are excluded from most EV views.
    #[must_use]
    pub fn is_player_prop(&self) -> bool {
        [&self.market_name, &self.bet_info]
            .into_iter()
            .flatten()
            .any(|text| text.to_ascii_lowercase().contains("player"))
    }

    /// Best available time for the event: start, else settlement, else placement.
    #[must_use]
    pub fn event_time(&self) -> Option<NaiveDateTime> {
        self.event_start_date
            .or(self.time_settled)
            .or(self.time_placed)
    }

    /// One-line description. Uses `bet_info` when present, otherwise joins
    /// selection, market and event names.
    #[must_use]
    pub fn description(&self) -> String {
        if let Some(info) = self.bet_info.as_deref().filter(|s| !s.trim().is_empty()) {
            return info.trim().to_string();
        }
        [&self.bet_name, &self.market_name, &self.event_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A settled OddsJam bet (won, lost or refunded) not yet verified.
    #[must_use]
    pub fn awaits_verification(&self) -> bool {
        !self.verified
            && self.source == Some(BetSource::OddsJam)
            && matches!(
                self.status,
                BetStatus::Won | BetStatus::Lost | BetStatus::Refunded
            )
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn status_or_default<'de, D>(deserializer: D) -> Result<BetStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(BetStatus::from)
        .unwrap_or_default())
}

fn bet_type_or_default<'de, D>(deserializer: D) -> Result<BetType, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(BetType::from)
        .unwrap_or_default())
}

fn i32_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or_default())
}

fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `2025-03-16T21:13:00`, fractional seconds, a space separator,
/// RFC 3339 with an offset (kept as wall-clock time), or a bare date.
fn timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

/// Parse the timestamp shapes the backend emits.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_unified_record() {
        let json = r#"{
            "id": 7,
            "original_bet_id": "abc",
            "sportsbook": "BetOnline",
            "status": "won",
            "odds": 150,
            "clv": 120,
            "stake": 25.5,
            "bet_profit": 38.25,
            "time_settled": "2025-03-16T21:13:00",
            "bet_info": "Halys +5.5 Game Spread",
            "sport": "Tennis",
            "league": null,
            "verified": false,
            "source": "oddsjam",
            "bet_type": "positive_ev"
        }"#;
        let bet: BetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(bet.id, 7);
        assert_eq!(bet.source, Some(BetSource::OddsJam));
        assert_eq!(bet.status, BetStatus::Won);
        assert_eq!(bet.bet_type, BetType::Straight);
        assert_eq!(bet.stake, dec!(25.5));
        assert_eq!(bet.closing_line().unwrap().value(), 120);
        assert!(bet.time_settled.is_some());
        assert_eq!(bet.league, None);
    }

    #[test]
    fn tolerates_nulls_and_missing_fields() {
        let bet: BetRecord =
            serde_json::from_str(r#"{"id": 1, "stake": null, "status": null, "odds": null}"#)
                .unwrap();
        assert_eq!(bet.stake, Decimal::ZERO);
        assert_eq!(bet.status, BetStatus::Pending);
        assert_eq!(bet.odds, 0);
        assert!(bet.placed_odds().is_none());
    }

    #[test]
    fn zero_clv_means_no_closing_line() {
        let bet = BetRecord {
            odds: -110,
            clv: Some(0),
            stake: dec!(10),
            ..Default::default()
        };
        assert!(bet.closing_line().is_none());
        assert!(!bet.ev().has_ev());
    }

    #[test]
    fn provider_statuses_normalize() {
        use BetSource::{OddsJam, Pikkit};
        assert_eq!(BetStatus::from_provider(OddsJam, "PENDING"), BetStatus::Pending);
        assert_eq!(BetStatus::from_provider(OddsJam, "won"), BetStatus::Won);
        assert_eq!(BetStatus::from_provider(OddsJam, "LOST"), BetStatus::Lost);
        assert_eq!(BetStatus::from_provider(OddsJam, "REFUNDED"), BetStatus::Refunded);
        assert_eq!(BetStatus::from_provider(Pikkit, "PLACED"), BetStatus::Pending);
        assert_eq!(BetStatus::from_provider(Pikkit, "SETTLED_WIN"), BetStatus::Won);
        assert_eq!(BetStatus::from_provider(Pikkit, "SETTLED_LOSS"), BetStatus::Lost);
        assert_eq!(BetStatus::from_provider(Pikkit, "SETTLED_PUSH"), BetStatus::Push);
        assert_eq!(BetStatus::from_provider(Pikkit, "SETTLED_VOID"), BetStatus::Void);
        assert_eq!(BetStatus::from_provider(Pikkit, "WON"), BetStatus::Pending);
        assert_eq!(BetStatus::from_provider(OddsJam, "mystery"), BetStatus::Pending);
    }

    #[test]
    fn only_settled_oddsjam_bets_await_verification() {
        let won = BetRecord {
            status: BetStatus::Won,
            source: Some(BetSource::OddsJam),
            ..Default::default()
        };
        assert!(won.awaits_verification());

        let refunded = BetRecord {
            status: BetStatus::Refunded,
            ..won.clone()
        };
        assert!(refunded.awaits_verification());

        let pending = BetRecord {
            status: BetStatus::Pending,
            ..won.clone()
        };
        assert!(!pending.awaits_verification());

        let pushed = BetRecord {
            status: BetStatus::Push,
            ..won.clone()
        };
        assert!(!pushed.awaits_verification());

        let verified = BetRecord {
            verified: true,
            ..won.clone()
        };
        assert!(!verified.awaits_verification());

        let pikkit = BetRecord {
            source: Some(BetSource::Pikkit),
            ..won.clone()
        };
        assert!(!pikkit.awaits_verification());

        let unknown = BetRecord { source: None, ..won };
        assert!(!unknown.awaits_verification());
    }

    #[test]
    fn bet_type_normalizes_to_straight_or_parlay() {
        assert_eq!(BetType::normalize("PARLAY"), BetType::Parlay);
        assert_eq!(BetType::normalize("low_hold"), BetType::Straight);
        assert_eq!(BetType::normalize(""), BetType::Straight);
    }

    #[test]
    fn player_prop_detection() {
        let bet = BetRecord {
            market_name: Some("Player Points".into()),
            ..Default::default()
        };
        assert!(bet.is_player_prop());
        assert!(!BetRecord::default().is_player_prop());
    }

    #[test]
    fn description_falls_back_to_parts() {
        let bet = BetRecord {
            bet_name: Some("Quentin Halys".into()),
            market_name: Some("+5.5 Game Spread".into()),
            event_name: Some("Holger Rune @ Quentin Halys".into()),
            ..Default::default()
        };
        assert_eq!(
            bet.description(),
            "Quentin Halys +5.5 Game Spread Holger Rune @ Quentin Halys"
        );
    }

    #[test]
    fn parses_timestamp_shapes() {
        assert!(parse_timestamp("2025-05-29T21:56:40").is_some());
        assert!(parse_timestamp("2025-05-29T21:56:40.123").is_some());
        assert!(parse_timestamp("2025-05-29 21:56:40").is_some());
        assert!(parse_timestamp("2025-05-29T21:56:40-05:00").is_some());
        assert!(parse_timestamp("2025-05-29").is_some());
        assert!(parse_timestamp("05/29/2025").is_none());
    }

    #[test]
    fn event_time_prefers_start() {
        let start = parse_timestamp("2025-01-02T10:00:00");
        let settled = parse_timestamp("2025-01-03T10:00:00");
        let bet = BetRecord {
            event_start_date: start,
            time_settled: settled,
            ..Default::default()
        };
        assert_eq!(bet.event_time(), start);
    }
}
