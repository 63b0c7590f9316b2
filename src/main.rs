use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info};
use sizetime::{
    backend::{Backend, CpuBackend},
    chart::FigurePresenter,
    config::DemoConfig,
    dataset::Series,
    demo,
    error::DemoError,
    model::InferenceModel,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "sizetime",
    about = "Fit processing time against file size and chart the training progress",
    version
)]
struct Cli {
    /// JSON config file; missing fields keep their defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Training series as CSV with `size_mb,time_sec` headers
    #[arg(long, value_name = "PATH")]
    train_csv: Option<PathBuf>,

    /// Test series as CSV with `size_mb,time_sec` headers
    #[arg(long, value_name = "PATH")]
    test_csv: Option<PathBuf>,

    /// Override the number of training epochs
    #[arg(long)]
    epochs: Option<usize>,

    /// Override the SGD learning rate
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Output directory for charts, report and model
    #[arg(long, value_name = "DIR", default_value = "out")]
    out_dir: PathBuf,

    /// Skip writing the SVG charts
    #[arg(long)]
    no_render: bool,

    /// Numerical backend
    #[arg(long, value_enum, default_value_t = BackendKind::Cpu)]
    backend: BackendKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    Cpu,
    #[cfg(feature = "ndarray")]
    Ndarray,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::from_path(path)?,
        None => DemoConfig::default(),
    };
    if let Some(epochs) = cli.epochs {
        config.epochs = epochs;
    }
    if let Some(lr) = cli.learning_rate {
        config.learning_rate = lr;
    }

    let train = match &cli.train_csv {
        Some(path) => Series::from_csv_path(path)?,
        None => Series::train(),
    };
    let test = match &cli.test_csv {
        Some(path) => Series::from_csv_path(path)?,
        None => Series::test(),
    };

    std::fs::create_dir_all(&cli.out_dir)?;

    match cli.backend {
        BackendKind::Cpu => execute::<CpuBackend>(&config, &train, &test, &cli.out_dir, !cli.no_render),
        #[cfg(feature = "ndarray")]
        BackendKind::Ndarray => execute::<sizetime::backend::NdarrayBackend>(
            &config,
            &train,
            &test,
            &cli.out_dir,
            !cli.no_render,
        ),
    }
}

fn execute<B: Backend>(
    config: &DemoConfig,
    train: &Series,
    test: &Series,
    out_dir: &Path,
    render: bool,
) -> Result<(), DemoError> {
    let mut presenter = FigurePresenter::new();
    let outcome = demo::run::<B, _>(config, train, test, &mut presenter)?;

    let model_path = out_dir.join("model.bin");
    outcome.model.save_to_file(&model_path)?;
    info!("wrote {}", model_path.display());

    let report_path = out_dir.join("report.json");
    std::fs::write(&report_path, serde_json::to_string_pretty(&outcome.report)?)?;
    info!("wrote {}", report_path.display());

    let figures_path = out_dir.join("figures.json");
    std::fs::write(&figures_path, presenter.to_json()?)?;
    info!("wrote {}", figures_path.display());

    if render {
        for path in presenter.render_all(out_dir)? {
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}
