use crate::reports;
use bikescore::config::{ModelWeights, ScoringModel};
use bikescore::export;
use bikescore::features::FeatureCollection;
use bikescore::scorer::{DiagnosticTally, Scorer, TracingObserver};
use bikescore::summary::ScoreSummary;
use clap::Args;
use std::time::Instant;
use tracing::{error, info};

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub weights: ModelWeights,

    /// GeoJSON FeatureCollection of street segments
    #[arg(short, long)]
    pub input: String,

    /// Where to write the scored GeoJSON
    #[arg(short, long)]
    pub output: Option<String>,

    /// Also write one CSV row of scores per feature
    #[arg(long)]
    pub csv: Option<String>,

    /// Fill a missing separation_level from the raw cycleway tags
    #[arg(long, default_value_t = false)]
    pub derive_separation: bool,

    /// How many scored features to log in full
    #[arg(long, default_value_t = bikescore::consts::DEFAULT_SAMPLE_LIMIT)]
    pub sample: usize,
}

pub fn run(args: ScoreArgs, model: ScoringModel, weights: ModelWeights) -> i32 {
    let mut collection = match FeatureCollection::load_from_file(&args.input) {
        Ok(c) => c,
        Err(e) => {
            error!("❌ Could not load features from '{}': {}", args.input, e);
            return 1;
        }
    };

    if args.derive_separation {
        let derived = collection.derive_separation_levels();
        info!("🚲 Derived separation_level for {} features", derived);
    }

    let scorer = Scorer::new(model, weights);
    let tally = DiagnosticTally::new();
    let observer = (TracingObserver::new(args.sample), &tally);

    let start = Instant::now();
    let records = scorer.score_collection(&mut collection, &observer);
    info!(
        "✅ Scored {} features in {:?}",
        records.len(),
        start.elapsed()
    );

    if let Some(path) = &args.output {
        if let Err(e) = collection.save_to_file(path) {
            error!("❌ Could not write '{}': {}", path, e);
            return 1;
        }
    }
    if let Some(path) = &args.csv {
        if let Err(e) = export::write_scores_to_file(path, &collection, &records) {
            error!("❌ Could not write '{}': {}", path, e);
            return 1;
        }
    }

    reports::print_weights(&scorer.weights);
    reports::print_summary(&ScoreSummary::from_records(&records), &tally.snapshot());
    0
}
