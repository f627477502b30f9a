//! Handler for the `ev` command.

use rust_decimal::Decimal;
use serde_json::json;

use crate::adapter::inbound::cli::command::EvArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{validate_stake, AmericanOdds, EvAnalysis};
use crate::error::Result;

/// Analyse the line in `args`.
pub fn analyze(args: &EvArgs) -> Result<EvAnalysis> {
    validate_stake(args.stake)?;
    let placed = AmericanOdds::parse(&args.odds)?;
    let closing = args
        .clv
        .as_deref()
        .map(AmericanOdds::parse)
        .transpose()?;
    Ok(EvAnalysis::compute(placed, closing, args.stake))
}

/// Execute `ev`.
pub fn execute(args: &EvArgs) -> Result<()> {
    let analysis = analyze(args)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "ev",
            "odds": args.odds,
            "clv": args.clv,
            "stake": args.stake,
            "analysis": analysis,
        }));
        return Ok(());
    }

    output::section("Expected Value");
    output::field("Placed", &args.odds);
    output::field("Closing", args.clv.as_deref().unwrap_or("-"));
    output::field("Stake", output::money(args.stake));

    let (Some(ev), Some(expected)) = (analysis.ev_percent_display(), analysis.expected_profit)
    else {
        output::field("Category", output::muted(analysis.category));
        output::hint("pass --clv with the closing line to compute EV");
        return Ok(());
    };

    output::field(
        "Implied",
        output::percent(analysis.implied_prob.map(|p| p * Decimal::ONE_HUNDRED), 2),
    );
    output::field(
        "Closing implied",
        output::percent(
            analysis.clv_implied_prob.map(|p| p * Decimal::ONE_HUNDRED),
            2,
        ),
    );
    let ev_text = format!("{ev:.2}%");
    output::field(
        "EV",
        if ev >= Decimal::ZERO {
            output::positive(ev_text)
        } else {
            output::negative(ev_text)
        },
    );
    output::field("Expected profit", output::signed_money(expected));
    output::field("Category", output::highlight(analysis.category));
    if analysis.beat_clv == Some(true) {
        output::success("Beat the closing line");
    } else {
        output::warning("Did not beat the closing line");
    }

    Ok(())
}
