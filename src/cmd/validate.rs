use crate::reports;
use bikescore::config::{ModelWeights, ScoringModel};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub weights: ModelWeights,

    /// Exit non-zero when any issue is found
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, model: &ScoringModel, weights: &ModelWeights) -> i32 {
    println!("\n🔎 === MODEL AUDIT === 🔎");
    reports::print_model(model);
    reports::print_weights(weights);

    let mut issues = model.validate();
    issues.extend(weights.validate());
    reports::print_issues(&issues);

    if args.strict && !issues.is_empty() {
        1
    } else {
        0
    }
}
