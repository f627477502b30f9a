use clap::Parser;
use linewise::adapter::inbound::cli::command::Cli;
use linewise::adapter::inbound::cli::output::{self, OutputConfig};
use linewise::adapter::inbound::cli::dispatch;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure_color(&cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = dispatch::execute(cli).await {
        tracing::error!(error = %e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
