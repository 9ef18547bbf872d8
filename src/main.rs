use holdout::generate;
use holdout::{Dataset, Loss, Matrix, SplitOptions};
use serde::Serialize;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Hastie,
    Friedman1,
}

impl std::str::FromStr for Target {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hastie" => Ok(Self::Hastie),
            "friedman1" => Ok(Self::Friedman1),
            _ => anyhow::bail!("unknown target {:?} (expected hastie or friedman1)", s),
        }
    }
}

/// Generates a synthetic dataset and splits it into training and validation rows.
#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(long, default_value = "150")]
    rows: usize,

    #[structopt(long, default_value = "10")]
    cols: usize,

    /// hastie (Gaussian features) or friedman1 (uniform features)
    #[structopt(long, default_value = "friedman1")]
    target: Target,

    /// Standard deviation of the noise added to friedman1 targets
    #[structopt(long, default_value = "1.0")]
    noise: f64,

    #[structopt(long, default_value = "0.2")]
    val_fraction: f64,

    #[structopt(long)]
    seed: Option<u64>,

    #[structopt(long)]
    parallel: bool,

    /// Rows of each subset to include in the output
    #[structopt(long, default_value = "3")]
    preview: usize,

    /// Loss used to score the training-mean baseline on the validation rows
    #[structopt(long, default_value = "squared-error")]
    loss: Loss,
}

#[derive(Debug, Serialize)]
struct Summary {
    n_total: usize,
    n_train: usize,
    n_val: usize,
    n_dims: usize,
    val_indices: Vec<usize>,
    train_label_mean: f64,
    val_label_mean: f64,
    loss: String,
    baseline_val_loss: f64,
    train_preview: Vec<Row>,
    val_preview: Vec<Row>,
}

#[derive(Debug, Serialize)]
struct Row {
    index: usize,
    features: Vec<f64>,
    label: f64,
}

fn preview(indices: &[usize], features: &Matrix, labels: &[f64], n: usize) -> Vec<Row> {
    indices
        .iter()
        .zip(features.iter_rows())
        .zip(labels)
        .take(n)
        .map(|((&index, features), &label)| Row {
            index,
            features: features.to_vec(),
            label,
        })
        .collect()
}

fn label_mean(labels: &[f64]) -> anyhow::Result<f64> {
    holdout::mean(labels.iter().copied()).ok_or_else(|| anyhow::anyhow!("no labels to average"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("holdout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Opt::from_args();

    let seed = opt.seed.unwrap_or_else(rand::random);
    let mut rng = holdout::seeded_rng(Some(seed));
    let (features, labels) = match opt.target {
        Target::Hastie => {
            let x = generate::gaussian_matrix(opt.rows, opt.cols, &mut rng)?;
            let y = generate::hastie_targets(&x)?;
            (x, y)
        }
        Target::Friedman1 => {
            let x = generate::uniform_matrix(opt.rows, opt.cols, &mut rng)?;
            let y = generate::friedman1_targets(&x, opt.noise, &mut rng)?;
            (x, y)
        }
    };
    tracing::info!(seed, rows = opt.rows, cols = opt.cols, target = ?opt.target, "generated data");

    let data: Dataset = SplitOptions::new()
        .val_fraction(opt.val_fraction)
        .parallel(opt.parallel)
        .split_with_rng(&features, &labels, &mut rng)?;
    tracing::info!("{}", data);

    let train_mean = label_mean(data.train_labels())?;
    let baseline = vec![train_mean; data.n_val()];
    let summary = Summary {
        n_total: data.n_total(),
        n_train: data.n_train(),
        n_val: data.n_val(),
        n_dims: data.n_dims(),
        val_indices: data.val_indices().to_vec(),
        train_label_mean: train_mean,
        val_label_mean: label_mean(data.val_labels())?,
        loss: opt.loss.to_string(),
        baseline_val_loss: opt.loss.average(data.val_labels(), &baseline)?,
        train_preview: preview(
            data.train_indices(),
            data.train_features(),
            data.train_labels(),
            opt.preview,
        ),
        val_preview: preview(
            data.val_indices(),
            data.val_features(),
            data.val_labels(),
            opt.preview,
        ),
    };
    serde_json::to_writer_pretty(std::io::stdout().lock(), &summary)?;
    println!();

    Ok(())
}
