//! Handler for the `sharp` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::SharpArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::sharp::SizingTier;
use crate::domain::{AmericanOdds, SharpCopy};
use crate::error::Result;
use crate::infrastructure::config::SharpConfig;

/// Apply command-line overrides to the configured sizing parameters.
///
/// Overrides pass the same checks as the `[sharp]` section.
pub fn effective_config(args: &SharpArgs, config: &SharpConfig) -> Result<SharpConfig> {
    let mut config = config.clone();
    if let Some(max_bet) = args.max_bet {
        config.linear.max_bet = max_bet;
    }
    if let Some(scale) = args.scale {
        config.linear.scale_factor = scale;
    }
    if let Some(min_stake) = args.min_stake {
        config.threshold.min_stake = min_stake;
    }
    config.validate()?;
    Ok(config)
}

/// Infer the sharp position and size the copy.
pub fn compute(args: &SharpArgs, config: &SharpConfig) -> Result<SharpCopy> {
    let odds = AmericanOdds::parse(&args.odds)?;
    let copier = effective_config(args, config)?.copier(args.policy.map(Into::into));
    Ok(copier.copy(odds, args.liquidity)?)
}

/// Execute `sharp`.
pub fn execute(args: &SharpArgs, config: &SharpConfig) -> Result<()> {
    let copy = compute(args, config)?;
    tracing::debug!(
        policy = copy.policy,
        payout = %copy.position.sharp_payout,
        stake = %copy.recommendation.stake,
        "sized sharp copy"
    );

    if output::is_json() {
        output::json_output(json!({
            "command": "sharp",
            "copy": copy,
        }));
        return Ok(());
    }

    output::section("Sharp Position");
    output::field("Observed odds", copy.position.observed_odds);
    output::field("Liquidity", output::money(copy.position.liquidity));
    output::field("Sharp odds", output::highlight(copy.position.sharp_odds));
    output::field("Sharp stake", output::money(copy.position.sharp_stake));
    output::field("Sharp payout", output::money(copy.position.sharp_payout));

    output::section("Recommendation");
    output::field("Policy", copy.policy);
    output::field("Tier", copy.recommendation.tier);
    if copy.recommendation.tier == SizingTier::GrayArea {
        output::warning("Skip: payout falls in the gray area");
        return Ok(());
    }
    if copy.recommendation.is_skip() {
        output::warning("Skip: recommended stake is zero");
        return Ok(());
    }
    output::field(
        "Stake",
        output::positive(output::money(copy.recommendation.stake)),
    );
    output::field("Potential profit", output::money(copy.potential_profit));

    Ok(())
}
