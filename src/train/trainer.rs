use crate::data::loader::DataLoader;
use crate::data::sample::Sample;
use crate::error::Result;
use crate::network::variants::{ModelVariant, XorModel};
use crate::optim::sgd::Sgd;
use crate::train::history::History;
use crate::train::loop_fn::train_loop;
use crate::train::train_config::TrainConfig;

/// A trained model together with the curves recorded while training it.
#[derive(Debug, Clone)]
pub struct TrainedRun {
    pub name: String,
    pub model: XorModel,
    pub history: History,
}

/// Wraps `train` in a fresh `DataLoader` and trains `model` with plain SGD.
///
/// The loader is seeded from `config.shuffle_seed`, so two calls with equal
/// inputs produce identical histories.
pub fn train_model(
    mut model: XorModel,
    learning_rate: f64,
    train: &[Sample],
    valid: &[Sample],
    config: &TrainConfig,
) -> Result<TrainedRun> {
    let mut loader = DataLoader::new(train, config.batch_size, config.shuffle, config.shuffle_seed)?;
    let optimizer = Sgd::new(learning_rate);
    let history = train_loop(&mut model, &optimizer, &mut loader, valid, config)?;
    Ok(TrainedRun { name: config.name.clone(), model, history })
}

/// Builds `variant` from `init_seed` and trains it at the variant's own
/// learning rate.
pub fn train_variant(
    variant: ModelVariant,
    init_seed: u64,
    train: &[Sample],
    valid: &[Sample],
    config: &TrainConfig,
) -> Result<TrainedRun> {
    let model = variant.build(init_seed)?;
    let config = config.clone().with_name(variant.label());
    train_model(model, variant.learning_rate(), train, valid, &config)
}
