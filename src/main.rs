use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use ferrite_xor::data::samples_to_matrices;
use ferrite_xor::report::figure::{accuracy_panel, compose, decision_regions, loss_panel};
use ferrite_xor::report::{print_summary, serve, write_figure, Gallery};
use ferrite_xor::{
    train_model, ModelVariant, NetworkSpec, Sample, TrainConfig, TrainedRun, XorDataset, XorModel,
};

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    All,
    Logistic,
    Mlp,
    ModuleList,
}

impl VariantArg {
    fn variants(self) -> Vec<ModelVariant> {
        match self {
            VariantArg::All => ModelVariant::ALL.to_vec(),
            VariantArg::Logistic => vec![ModelVariant::Logistic],
            VariantArg::Mlp => vec![ModelVariant::Mlp],
            VariantArg::ModuleList => vec![ModelVariant::ModuleList],
        }
    }
}

/// Trains small feed-forward networks on an XOR-like point cloud and renders
/// their loss and accuracy curves.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of points to generate
    #[arg(long, default_value = "200")]
    samples: usize,

    /// How many of the generated points are used for training
    #[arg(long, default_value = "100")]
    train: usize,

    /// Mini-batch size
    #[arg(long, default_value = "2")]
    batch_size: usize,

    /// Training epochs per model
    #[arg(long, default_value = "200")]
    epochs: usize,

    /// Seed for generating the point cloud
    #[arg(long, default_value = "1")]
    seed: u64,

    /// Seed for weight initialization and batch shuffling
    #[arg(long, default_value = "2")]
    init_seed: u64,

    /// L1 penalty on layer weights added to the training loss (0 = off)
    #[arg(long, default_value = "0.0")]
    l1: f64,

    /// Which built-in model(s) to train
    #[arg(long, value_enum, default_value = "all")]
    variant: VariantArg,

    /// Train a custom architecture from a NetworkSpec JSON file instead
    #[arg(long, value_name = "JSON")]
    spec: Option<PathBuf>,

    /// Directory receiving the SVG figures
    #[arg(long, default_value = "reports")]
    out_dir: PathBuf,

    /// Also write each trained model and its history as JSON
    #[arg(long)]
    save_models: bool,

    /// Serve the figures over HTTP on this address after training
    #[arg(long, value_name = "ADDR")]
    serve: Option<String>,

    /// Print a progress line every N epochs (0 = quiet)
    #[arg(long, default_value = "20")]
    log_every: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dataset = XorDataset::generate(cli.samples, cli.seed);
    let (train, valid) = dataset.split(cli.train)?;
    println!(
        "Generated {} points ({:.0}% class 1): {} train / {} validation",
        dataset.len(),
        dataset.positive_rate() * 100.0,
        train.len(),
        valid.len()
    );

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    let config = TrainConfig::new(cli.epochs, cli.batch_size)
        .with_shuffle_seed(cli.init_seed)
        .with_log_every(cli.log_every)
        .with_l1(cli.l1);

    let mut jobs: Vec<(XorModel, f64, String)> = Vec::new();
    if let Some(path) = &cli.spec {
        let spec = NetworkSpec::load_json(&path.to_string_lossy())
            .with_context(|| format!("loading network spec {}", path.display()))?;
        if spec.input_size() != 2 {
            bail!("network '{}' expects {} inputs, the XOR data has 2", spec.name, spec.input_size());
        }
        jobs.push((XorModel::from_spec(&spec, cli.init_seed)?, spec.learning_rate, spec.name.clone()));
    } else {
        for variant in cli.variant.variants() {
            jobs.push((variant.build(cli.init_seed)?, variant.learning_rate(), variant.label().to_owned()));
        }
    }

    let mut gallery = Gallery::default();
    for (model, learning_rate, name) in jobs {
        println!("\n{}", model);
        let run_config = config.clone().with_name(name.as_str());
        let mut run = train_model(model, learning_rate, train, valid, &run_config)?;
        print_summary(&run.name, &run.history);
        report_predictions(&mut run, valid);

        let svg = compose(&run.name, &[
            loss_panel(&run.history),
            accuracy_panel(&run.history),
            decision_regions(&mut run.model, valid, 40),
        ]);
        let fig_path = cli.out_dir.join(format!("{}.svg", run.name));
        write_figure(&fig_path, &svg).with_context(|| format!("writing {}", fig_path.display()))?;
        println!("Wrote {}", fig_path.display());

        if cli.save_models {
            save_run(&cli.out_dir, &run)?;
        }
        gallery.add(run.name.clone(), svg);
    }

    if let Some(addr) = &cli.serve {
        serve(addr, &gallery).with_context(|| format!("serving on {}", addr))?;
    }

    Ok(())
}

/// For the module-list classifier, checks `predict` against the labels.
fn report_predictions(run: &mut TrainedRun, valid: &[Sample]) {
    if let XorModel::Classifier(classifier) = &mut run.model {
        let (inputs, labels) = samples_to_matrices(valid);
        let predicted = classifier.predict(&inputs);
        let correct = predicted.iter().zip(labels.col(0)).filter(|(p, y)| **p == *y).count();
        println!("predict(): {}/{} validation points correct", correct, valid.len());
    }
}

fn save_run(out_dir: &Path, run: &TrainedRun) -> Result<()> {
    let model_path = out_dir.join(format!("{}.model.json", run.name));
    run.model
        .save_json(&model_path.to_string_lossy())
        .with_context(|| format!("writing {}", model_path.display()))?;
    let history_path = out_dir.join(format!("{}.history.json", run.name));
    run.history
        .save_json(&history_path.to_string_lossy())
        .with_context(|| format!("writing {}", history_path.display()))?;
    println!("Saved {} and {}", model_path.display(), history_path.display());
    Ok(())
}
