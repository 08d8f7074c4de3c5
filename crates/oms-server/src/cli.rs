use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for the `oms` binary.
#[derive(Debug, Parser)]
#[command(name = "oms", version, about = "Textile order and inventory management server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Explicit config file used in place of `./oms.toml`
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Open the store, apply migrations, and serve the HTTP pages.
    Serve(ServeArgs),
    /// Open the store and apply migrations, then exit.
    Migrate,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Listen address, overriding `server.bind`
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["oms", "serve", "--bind", "127.0.0.1:8080", "--verbose"])
            .expect("cli should parse");

        assert!(cli.verbose);
        assert!(!cli.quiet);
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.bind.as_deref(), Some("127.0.0.1:8080")),
            Commands::Migrate => panic!("expected serve"),
        }
    }

    #[test]
    fn migrate_takes_config_path() {
        let cli = Cli::try_parse_from(["oms", "--config", "prod.toml", "migrate"])
            .expect("cli should parse");
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));
        assert!(matches!(cli.command, Commands::Migrate));
    }
}
