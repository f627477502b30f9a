//! Handler for the `arb` command.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ArbArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{validate_stake, ArbitrageSet, DomainError, OddsFormat, OddsQuote};
use crate::error::Result;
use crate::infrastructure::config::ArbitrageConfig;

#[derive(Tabled)]
struct LegRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Outcome")]
    label: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Implied")]
    implied: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Payout")]
    payout: String,
}

/// Parse every line in `args` into a labelled arbitrage set.
pub fn build_set(args: &ArbArgs, config: &ArbitrageConfig) -> Result<ArbitrageSet> {
    let total_stake = validate_stake(args.stake.unwrap_or(config.default_total_stake))?;

    let quotes = args
        .odds
        .iter()
        .map(|raw| {
            let format = args.format.map_or_else(|| OddsFormat::detect(raw), Into::into);
            OddsQuote::parse_as(format, raw)
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut set = ArbitrageSet::from_quotes(quotes, total_stake);
    for (index, book) in args.books.iter().enumerate().take(set.legs().len()) {
        set.set_leg_label(index, book.as_str())?;
    }
    Ok(set)
}

/// Execute `arb`.
pub fn execute(args: &ArbArgs, config: &ArbitrageConfig) -> Result<()> {
    let set = build_set(args, config)?;
    let Some(result) = set.calculate() else {
        return Err(DomainError::TooFewLegs.into());
    };
    tracing::debug!(
        legs = result.legs.len(),
        total_implied = %result.total_implied,
        is_arbitrage = result.is_arbitrage,
        "sized arbitrage set"
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "arb",
            "result": serde_json::to_value(&result)?,
            "payout": result.payout(),
        }));
        return Ok(());
    }

    let rows: Vec<LegRow> = result
        .legs
        .iter()
        .enumerate()
        .map(|(index, leg)| LegRow {
            index: index + 1,
            label: leg.label.clone().unwrap_or_else(|| "-".to_string()),
            odds: format!("{} ({})", leg.odds, OddsQuote::from(leg.odds).to_american()),
            implied: format!(
                "{:.2}%",
                leg.implied_probability * Decimal::ONE_HUNDRED
            ),
            stake: output::money(leg.stake),
            payout: output::money(leg.payout),
        })
        .collect();

    output::section("Legs");
    output::lines(&Table::new(rows).to_string());

    output::section("Result");
    output::field("Total stake", output::money(result.total_stake));
    output::field(
        "Total implied",
        format!("{:.2}%", result.total_implied * Decimal::ONE_HUNDRED),
    );
    if result.is_arbitrage {
        output::field(
            "Edge",
            output::positive(format!("{:.2}%", result.edge_percent)),
        );
        output::field("Payout", output::money(result.payout()));
        output::field("Profit", output::signed_money(result.guaranteed_profit));
        output::success("Arbitrage found");
    } else {
        output::field(
            "Margin",
            output::negative(format!("{:.2}%", -result.edge_percent)),
        );
        output::field("Payout", output::money(result.payout()));
        output::field("Loss", output::signed_money(result.guaranteed_profit));
        output::warning("No arbitrage: implied probabilities sum to 100% or more");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn args(odds: &[&str]) -> ArbArgs {
        ArbArgs {
            odds: odds.iter().map(ToString::to_string).collect(),
            format: None,
            stake: None,
            books: Vec::new(),
        }
    }

    #[test]
    fn default_stake_comes_from_config() {
        let set = build_set(&args(&["+120", "-110"]), &ArbitrageConfig::default()).unwrap();
        assert_eq!(set.total_stake(), dec!(100));
    }

    #[test]
    fn books_label_legs_in_order() {
        let mut args = args(&["2.2", "1.9"]);
        args.books = vec!["FanDuel".into(), "Bovada".into()];
        let set = build_set(&args, &ArbitrageConfig::default()).unwrap();
        assert_eq!(set.legs()[0].label.as_deref(), Some("FanDuel"));
        assert_eq!(set.legs()[1].label.as_deref(), Some("Bovada"));
    }

    #[test]
    fn mixed_formats_are_detected_per_line() {
        let set = build_set(&args(&["+120", "1.9", "5/2"]), &ArbitrageConfig::default()).unwrap();
        let formats: Vec<_> = set
            .legs()
            .iter()
            .filter_map(|leg| leg.odds.map(|quote| quote.format()))
            .collect();
        assert_eq!(
            formats,
            [OddsFormat::American, OddsFormat::Decimal, OddsFormat::Fractional]
        );
    }

    #[test]
    fn rejects_non_positive_stake() {
        let mut args = args(&["+120", "-110"]);
        args.stake = Some(dec!(-5));
        assert!(build_set(&args, &ArbitrageConfig::default()).is_err());
    }

    #[test]
    fn rejects_stake_past_limit() {
        let mut args = args(&["+120", "-110"]);
        args.stake = Some(Decimal::MAX);
        assert!(matches!(
            build_set(&args, &ArbitrageConfig::default()),
            Err(crate::error::Error::Domain(DomainError::ExceedsLimit { .. }))
        ));
    }

    #[test]
    fn execute_reports_non_arbitrage_without_error() {
        assert!(execute(&args(&["-110", "-110"]), &ArbitrageConfig::default()).is_ok());
    }
}
