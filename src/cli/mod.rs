pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Korean Parking Information CLI
#[derive(Parser, Debug)]
#[command(
    name = "jucha",
    about = "Korean Parking Information CLI - Find nearby parking lots and realtime availability from the terminal",
    version,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Markdown format
    Markdown,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search parking lots near an address or coordinate
    #[command(alias = "n")]
    Nearby(args::NearbyArgs),

    /// Show detail for one parking lot
    #[command(alias = "i")]
    Info(args::InfoArgs),

    /// Browse the national parking registry (전국주차장정보표준데이터)
    #[command(alias = "r")]
    Registry(args::RegistryArgs),

    /// Manage configuration
    #[command(alias = "c")]
    Config(args::ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    fn generate_completions(shell: Shell) {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
    }

    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        if cli.verbose {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .init();
        } else {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }

        let result = match cli.command {
            Commands::Nearby(args) => commands::nearby::execute(args, cli.format).await,
            Commands::Info(args) => commands::info::execute(args, cli.format).await,
            Commands::Registry(args) => commands::registry::execute(args, cli.format).await,
            Commands::Config(args) => commands::config::execute(args).await,
            Commands::Version => {
                commands::version::execute();
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::generate_completions(shell);
                Ok(())
            }
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) => {
                use crate::error::JuchaError;
                match &e {
                    JuchaError::NotConfigured { provider } => {
                        eprintln!("Error: No API key configured for {provider}.");
                        eprintln!("\nConfigure one with:");
                        eprintln!("  jucha config set {provider}.key YOUR_API_KEY");
                    }
                    JuchaError::Network(err) => {
                        eprintln!("Network error: {}", err);
                        eprintln!("\nPlease check your internet connection and try again.");
                    }
                    JuchaError::BadResponse { provider, message } => {
                        eprintln!("Error parsing {provider} response: {message}");
                        if !cli.verbose {
                            eprintln!("\nRun with --verbose for more details.");
                        }
                    }
                    _ => {
                        eprintln!("Error: {}", e);
                    }
                }
                Err(e)
            }
        }
    }
}
