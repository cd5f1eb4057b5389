use bikescore::config::{ModelWeights, ScoringModel};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, warn, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scores street segments for bicycle infrastructure", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scoring model JSON (category tables for the three dimensions)
    #[arg(global = true, short, long)]
    model: Option<String>,

    /// Aggregation weights JSON; individual --weight-* flags override it
    #[arg(global = true, short, long)]
    weights: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a GeoJSON FeatureCollection
    Score(cmd::score::ScoreArgs),
    /// Check a model and weights for problems
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let model = match &cli.model {
        Some(path) => {
            info!("📂 Loading Model: {}", path);
            ScoringModel::load_from_file(path).unwrap_or_else(|e| {
                error!("❌ {}", e);
                process::exit(1);
            })
        }
        None => {
            warn!("⚠️  No model file given. Using the built-in starter model.");
            ScoringModel::default()
        }
    };

    let (cli_weights, sub_name) = match &cli.command {
        Commands::Score(args) => (&args.weights, "score"),
        Commands::Validate(args) => (&args.weights, "validate"),
    };
    let weights = resolve_weights(cli.weights.as_deref(), cli_weights, &matches, sub_name);

    let code = match cli.command {
        Commands::Score(args) => cmd::score::run(args, model, weights),
        Commands::Validate(args) => cmd::validate::run(args, &model, &weights),
    };
    process::exit(code);
}

/// File weights form the base; flags typed on the command line win.
fn resolve_weights(
    path: Option<&str>,
    cli_weights: &ModelWeights,
    matches: &clap::ArgMatches,
    sub_name: &str,
) -> ModelWeights {
    let Some(path) = path else {
        return cli_weights.clone();
    };

    info!("⚖️  Loading Weights from: {}", path);
    let mut file_weights = ModelWeights::load_from_file(path).unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });
    if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
        file_weights.merge_from_cli(cli_weights, sub_matches);
    }
    file_weights
}
