//! Handler for the `convert` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::ConvertArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{OddsConverter, OddsFormat};
use crate::error::{Error, Result};

/// Execute `convert`.
pub fn execute(args: &ConvertArgs) -> Result<()> {
    let format = args
        .from
        .map_or_else(|| OddsFormat::detect(&args.value), Into::into);

    let mut converter = OddsConverter::new();
    if let Some(stake) = args.stake {
        converter.set_stake(&stake.to_string())?;
    }
    converter.edit(format, &args.value)?;
    let Some(quote) = converter.quote() else {
        return Err(Error::Parse(format!("no odds parsed from '{}'", args.value)));
    };
    tracing::debug!(input = %args.value, %format, "converted odds");

    if output::is_json() {
        output::json_output(json!({
            "command": "convert",
            "input": args.value,
            "format": format,
            "american": quote.render(OddsFormat::American),
            "decimal": quote.render(OddsFormat::Decimal),
            "fractional": quote.render(OddsFormat::Fractional),
            "probability": quote.render(OddsFormat::Probability),
            "implied_probability": quote.implied_probability().percent(),
            "wager": converter.wager(),
        }));
        return Ok(());
    }

    output::section("Odds");
    for other in OddsFormat::ALL {
        let text = converter.field(other);
        let label = match other {
            OddsFormat::American => "American",
            OddsFormat::Decimal => "Decimal",
            OddsFormat::Fractional => "Fractional",
            OddsFormat::Probability => "Implied",
        };
        if other == format {
            output::field(label, output::highlight(text));
        } else {
            output::field(label, text);
        }
    }

    if let Some(wager) = converter.wager() {
        output::section("Wager");
        output::field("Stake", output::money(wager.stake));
        output::field("To win", output::positive(output::money(wager.to_win)));
        output::field("Payout", output::money(wager.payout));
    }

    Ok(())
}
