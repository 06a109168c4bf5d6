use std::{io::Write, path::PathBuf};

use efficiency::{AgreementTiers, EvaluationConfig, Trial, TrialRow};
use tracing_subscriber::EnvFilter;

/// One output line per trial, ACSM theory next to the wearable reading.
#[derive(Debug, serde::Serialize)]
struct ReportRow {
    id: Option<String>,
    modality: String,
    mass_kg: f64,
    speed_mph: Option<f64>,
    grade_pct: Option<f64>,
    spm: Option<f64>,
    step_height_m: Option<f64>,
    vo2_gross: f64,
    vo2_net: f64,
    theory_net_kcal_min: f64,
    met_power_w: f64,
    mech_power_w: f64,
    efficiency_theory_net: f64,
    aw_active_kcal_min: Option<f64>,
    efficiency_measured: Option<f64>,
    agreement: Option<f64>,
}

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file location with trials
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("trials.csv"), required = false)]
    pub input: PathBuf,
    /// Output csv file. _Note_: will truncate old file if exists
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("report.csv"), required = false)]
    pub output: PathBuf,
    /// Step height in meters for stair trials without one
    #[arg(long, default_value_t = mechanical_power::STAIRMASTER_STEP_HEIGHT_M)]
    pub step_height: f64,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print result to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Args {
        input,
        output,
        step_height,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    let config = EvaluationConfig::default().with_step_height(step_height);

    let mut rdr = csv::Reader::from_path(&input)
        .map_err(|e| format!("Failed to read input file. Reason: {e}"))?;

    let trials = rdr
        .deserialize::<TrialRow>()
        .enumerate()
        .filter_map(|(line, row)| {
            let trial = row
                .map_err(|e| e.to_string())
                .and_then(|row| row.into_trial(&config).map_err(|e| e.to_string()));

            match trial {
                Ok(trial) => Some(trial),
                Err(e) => {
                    tracing::warn!(line = line + 2, "Skipping row. Reason: {e}");
                    None
                }
            }
        })
        .collect::<Vec<Trial>>();

    tracing::info!("Total: {} trials", trials.len());

    let evaluated = efficiency::evaluate_all(trials, &config);

    let mut wrt = match dry {
        true => None,
        false => Some(
            csv::Writer::from_path(&output)
                .map_err(|e| format!("Failed to open output file. Reason: {e}"))?,
        ),
    };

    let mut io = match print {
        true => {
            let mut io = std::io::stdout().lock();

            writeln!(io, "id,modality,mass_kg,met_power_w,mech_power_w,efficiency_theory_net,efficiency_measured")?;

            Some(io)
        }
        false => None,
    };

    let mut tiers = AgreementTiers::default();

    for this in &evaluated {
        let (trial, energetics) = (&this.trial, &this.energetics);
        let measured = energetics.measured.as_ref();

        if let Some(measured) = measured {
            tiers.record_measured(measured);
        }

        let (speed_mph, grade_pct, spm, step_height_m) = match trial.condition {
            efficiency::Condition::Treadmill {
                speed_mph,
                grade_pct,
            } => (Some(speed_mph), Some(grade_pct), None, None),
            efficiency::Condition::Stair { spm, step_height_m } => {
                (None, None, Some(spm), Some(step_height_m))
            }
        };

        let row = ReportRow {
            id: trial.id.clone(),
            modality: trial.modality().to_string(),
            mass_kg: trial.mass_kg,
            speed_mph,
            grade_pct,
            spm,
            step_height_m,
            vo2_gross: energetics.vo2_gross,
            vo2_net: energetics.vo2_net,
            theory_net_kcal_min: energetics.theory_net_kcal_min,
            met_power_w: energetics.metabolic_power_w,
            mech_power_w: energetics.mechanical_power_w,
            efficiency_theory_net: energetics.efficiency_theory_net,
            aw_active_kcal_min: measured.map(|this| this.kcal_min),
            efficiency_measured: measured.and_then(|this| this.efficiency),
            agreement: measured.and_then(|this| this.agreement),
        };

        if let Some(io) = &mut io {
            writeln!(
                io,
                "{},{},{:.2},{:.2},{:.2},{:.3},{}",
                row.id.as_deref().unwrap_or_default(),
                row.modality,
                row.mass_kg,
                row.met_power_w,
                row.mech_power_w,
                row.efficiency_theory_net,
                row.efficiency_measured
                    .map(|this| format!("{this:.3}"))
                    .unwrap_or_default(),
            )?;
        }

        if let Some(wrt) = &mut wrt {
            wrt.serialize(row)?;
        }
    }

    let total = tiers.total();
    for (f, count, count_total) in tiers.tiers() {
        println!(
            "> {f}: {count:5} records | total: {count_total:5} - {}%",
            match total {
                0 => 0.0,
                _ => ((count_total as f64 / total as f64) * 100.0).floor(),
            }
        )
    }
    println!("< 0.1: {:5} records", tiers.below());

    if let Some(mut wrt) = wrt {
        tracing::info!("Saving to {}", output.to_string_lossy());
        wrt.flush()?;
    }

    tracing::info!("Done!");

    Ok(())
}
