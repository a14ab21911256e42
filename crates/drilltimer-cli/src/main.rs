use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod display;
mod logging;
mod platform;

#[derive(Parser)]
#[command(name = "drilltimer", version, about = "Interval timers with audible cues")]
struct Cli {
    /// Debug-level log output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timer in real time (Ctrl-C stops and resets)
    Run(commands::run::RunArgs),
    /// Print the scheduler's view of one elapsed value as JSON
    Status(commands::status::StatusArgs),
    /// Print the events of a run as JSON lines, without waiting
    Simulate(commands::simulate::SimulateArgs),
    /// Built-in timer variants
    Variant {
        #[command(subcommand)]
        action: commands::variant::VariantAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Status(args) => commands::status::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Variant { action } => commands::variant::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "drilltimer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
