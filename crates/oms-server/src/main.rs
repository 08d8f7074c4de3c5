use clap::Parser;

mod bootstrap;
mod cli;
mod error;
mod pages;
mod routes;
mod session;
mod state;

#[cfg(test)]
mod test_support;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("oms error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = bootstrap::load_config(cli.config.as_deref())?;

    match cli.command {
        cli::Commands::Serve(args) => bootstrap::serve(config, &args).await,
        cli::Commands::Migrate => bootstrap::migrate(&config).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("OMS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
