use clap::{Arg, Command};
use tracing::info;

use fiat::config::Config;
use fiat::session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = Command::new("fiat")
        .about("AI code generation studio - fiat lux, let there be code")
        .long_about(
            "fiat turns natural-language prompts into source files: it asks a \
             generative model for code, saves and optionally formats the result, \
             keeps a history of every run, and can publish files as gists",
        )
        .arg(
            Arg::new("set-api-key")
                .long("set-api-key")
                .help("Set the Anthropic API key")
                .value_name("API_KEY")
                .num_args(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Show configuration information")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Handle configuration commands
    if let Some(api_key) = matches.get_one::<String>("set-api-key") {
        let mut config = Config::load()?;
        config.set_api_key(api_key.clone())?;
        println!("✅ API key saved successfully");
        return Ok(());
    }

    if matches.get_flag("config") {
        Config::show_config_info()?;
        return Ok(());
    }

    // No maintenance flag: enter the interactive session
    let config = Config::load()?;
    info!("Starting interactive session");

    let session = Session::from_config(&config);
    session.run().await
}
