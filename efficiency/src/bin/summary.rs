use std::path::{Path, PathBuf};

use efficiency::{
    EvaluationConfig, Trial, TrialRow,
    summary::{self, ConditionSummaryRow},
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file location with trials
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("trials.csv"), required = false)]
    pub input: PathBuf,
    /// Output directory. _Note_: will truncate old files if exist
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("summary"), required = false)]
    pub output: PathBuf,
    /// Step height in meters for stair trials without one
    #[arg(long, default_value_t = mechanical_power::STAIRMASTER_STEP_HEIGHT_M)]
    pub step_height: f64,
    /// Treadmill trials with |grade| at or below this percent are dropped
    #[arg(long, default_value_t = 0.0)]
    pub flat_tolerance: f64,
    /// Keep flat treadmill trials
    #[arg(long, default_value_t = false)]
    pub keep_flat: bool,
    /// Write a single json file instead of csv tables
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print result to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

#[derive(Debug, serde::Serialize)]
struct Summary {
    config: EvaluationConfig,
    conditions: Vec<summary::ConditionSummary>,
    treadmill: Vec<summary::TreadmillSummary>,
    stair: Vec<summary::StairSummary>,
}

fn load_trials(
    file_path: impl AsRef<Path>,
    config: &EvaluationConfig,
) -> Result<Vec<Trial>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(file_path.as_ref())
        .map_err(|e| format!("Failed to open input file. Reason: {e}"))?;

    Ok(reader
        .deserialize::<TrialRow>()
        .filter_map(|row| match row {
            Ok(row) => row
                .into_trial(config)
                .inspect_err(|e| tracing::warn!("Skipping row. Reason: {e}"))
                .ok(),
            Err(e) => {
                tracing::warn!("Skipping row. Reason: {e}");
                None
            }
        })
        .collect())
}

fn write_csv<T: serde::Serialize>(
    path: impl AsRef<Path>,
    rows: impl IntoIterator<Item = T>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let mut wrt = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to open {}. Reason: {e}", path.to_string_lossy()))?;

    for row in rows {
        wrt.serialize(row)?;
    }

    wrt.flush()?;
    tracing::info!("Saved {}", path.to_string_lossy());

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Args {
        input,
        output,
        step_height,
        flat_tolerance,
        keep_flat,
        json,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    let config = EvaluationConfig::default().with_step_height(step_height);

    let trials = load_trials(input, &config)?;
    let total = trials.len();

    let trials = match keep_flat {
        true => trials,
        false => efficiency::remove_flat_treadmill(trials, flat_tolerance),
    };

    tracing::info!(
        "Number of trials: {} ({} flat treadmill trials removed)",
        trials.len(),
        total - trials.len()
    );

    let evaluated = efficiency::evaluate_all(trials, &config);

    let tables = Summary {
        config,
        conditions: summary::condition_summary(&evaluated),
        treadmill: summary::treadmill_summary(&evaluated),
        stair: summary::stair_summary(&evaluated),
    };

    if print {
        println!("Treadmill: efficiency vs grade");
        for this in &tables.treadmill {
            println!(
                "{:>5.1} mph {:>5.1}% | n: {:3} | measured: {:>6} | ACSM theory: {:.3}",
                this.speed_mph,
                this.grade_pct,
                this.n,
                this.eff_measured
                    .map(|this| format!("{this:.3}"))
                    .unwrap_or_else(|| "-".to_owned()),
                this.eff_theory,
            );
        }

        println!("Stair: wearable vs ACSM NET by spm");
        for this in &tables.stair {
            println!(
                "{:>5.0} spm | n: {:3} | wearable: {:>6} kcal/min | ACSM NET: {:.2} kcal/min | theory eff ~ {:.3}",
                this.spm,
                this.n,
                this.aw
                    .map(|this| format!("{this:.2}"))
                    .unwrap_or_else(|| "-".to_owned()),
                this.net,
                this.efficiency_theory,
            );
        }
    }

    if !dry {
        std::fs::create_dir_all(&output)
            .map_err(|e| format!("Failed to create output directory. Reason: {e}"))?;

        match json {
            true => {
                let path = output.join("summary.json");
                std::fs::write(
                    &path,
                    serde_json::to_string_pretty(&tables).expect("serde serialization can't fail"),
                )
                .map_err(|e| format!("Failed to save summary. Reason: {e}"))?;
                tracing::info!("Saved {}", path.to_string_lossy());
            }
            false => {
                write_csv(
                    output.join("conditions.csv"),
                    tables.conditions.iter().map(ConditionSummaryRow::from),
                )?;
                write_csv(output.join("treadmill.csv"), &tables.treadmill)?;
                write_csv(output.join("stair.csv"), &tables.stair)?;
            }
        }
    }

    tracing::info!("Done!");

    Ok(())
}
