use anyhow::{bail, Context, Result};
use sampling_rs::interpolate::InterpKind;
use sampling_rs::kernel::KernelLifecycle;
use sampling_rs::signal::glue::{GlueConfig, GlueKernel};
use sampling_rs::signal::linspace;
use sampling_rs::signal::reconstruct::{ReconstructKernel, ReconstructionMethod};
use sampling_rs::signal::sampler::{SamplerKernel, SamplingConfig};
use sampling_rs::signal::spectral::alias_frequency;
use sampling_rs::signal::traits::{Glue1D, Reconstruct1D, Sample1D};
use sampling_rs::stats::{max_abs_error, mean_abs_error, root_mean_squared_error};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const POINTS: usize = 1000;
const MAX_TIME: f64 = 1.0;
const TONES: [(f64, f64); 2] = [(5.0, 1.0), (15.0, 0.5)];
const RATE_MULTIPLES: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
const BENCH_ITERS: usize = 20;

#[derive(Debug, Serialize, Deserialize, Clone)]
struct ContractRow {
    case_id: String,
    method: String,
    rate: usize,
    samples: usize,
    aliased_f_max: f64,
    pearson_r: f64,
    mae: f64,
    rmse: f64,
    max_abs: f64,
    interior_mae: f64,
    candidate_ns: f64,
    baseline_ns: f64,
    speedup_vs_baseline: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContractBundle {
    generated_epoch_seconds: u64,
    points: usize,
    max_time: f64,
    tones: Vec<(f64, f64)>,
    rows: Vec<ContractRow>,
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("contracts") => run_contracts(),
        _ => {
            eprintln!("Usage:");
            eprintln!("  cargo run -p xtask -- contracts");
            Ok(())
        }
    }
}

fn run_contracts() -> Result<()> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let out_dir = PathBuf::from("target/contracts");
    fs::create_dir_all(&out_dir).context("creating contract output directory")?;

    let time = linspace(0.0, MAX_TIME, POINTS);
    let truth: Vec<f64> = time
        .iter()
        .map(|&t| {
            TONES
                .iter()
                .map(|&(f, a)| a * (2.0 * PI * f * t).sin())
                .sum()
        })
        .collect();
    let f_max = TONES.iter().map(|t| t.0).fold(0.0, f64::max);

    let mut rows = Vec::new();
    for multiple in RATE_MULTIPLES {
        let rate = (multiple * f_max).round() as usize;
        let sampler = SamplerKernel::try_new(SamplingConfig::new(rate, MAX_TIME))?;
        let (sample_times, sample_values) = sampler.run_alloc(&truth, &time)?;

        let baseline = ReconstructKernel::try_new(ReconstructionMethod::Linear.into())?;
        let baseline_ns = benchmark_avg_ns(BENCH_ITERS, || {
            baseline.run_alloc(&sample_times, &sample_values, &time)?;
            Ok(())
        })?;

        for method in ReconstructionMethod::ALL {
            let kernel = ReconstructKernel::try_new(method.into())?;
            let candidate = kernel.run_alloc(&sample_times, &sample_values, &time)?;
            let candidate_ns = benchmark_avg_ns(BENCH_ITERS, || {
                kernel.run_alloc(&sample_times, &sample_values, &time)?;
                Ok(())
            })?;
            let case_id = format!("reconstruct_{}_x{multiple}", slug(method.display_name()));
            rows.push(build_row(RowBuildInput {
                case_id: &case_id,
                method: method.display_name(),
                rate,
                samples: sample_times.len(),
                aliased_f_max: alias_frequency(f_max, rate as f64)?,
                candidate: &candidate,
                reference: &truth,
                candidate_ns,
                baseline_ns,
            })?);
        }
    }

    let left: Vec<f64> = truth[..POINTS / 2].to_vec();
    let right: Vec<f64> = truth[POINTS / 2..].to_vec();
    for gap in [-20isize, 0, 20] {
        for order in InterpKind::ALL {
            let kernel = GlueKernel::try_new(GlueConfig::new(gap, order))?;
            let glued = kernel.run_alloc(&left, &right)?;
            let overlap = kernel.overlap(left.len(), right.len());
            let keep = left.len() - overlap;
            let candidate_ns = benchmark_avg_ns(BENCH_ITERS, || {
                kernel.run_alloc(&left, &right)?;
                Ok(())
            })?;
            // Only the untouched head is comparable with the source signal.
            rows.push(build_row(RowBuildInput {
                case_id: &format!("glue_{order}_gap{gap}"),
                method: order.name(),
                rate: 0,
                samples: glued.len(),
                aliased_f_max: f_max,
                candidate: &glued[..keep],
                reference: &truth[..keep],
                candidate_ns,
                baseline_ns: candidate_ns,
            })?);
        }
    }

    let bundle = ContractBundle {
        generated_epoch_seconds: ts,
        points: POINTS,
        max_time: MAX_TIME,
        tones: TONES.to_vec(),
        rows,
    };

    let csv_path = out_dir.join("reconstruction_summary.csv");
    let json_path = out_dir.join("reconstruction_summary.json");
    write_summary_csv(&csv_path, &bundle.rows)?;
    fs::write(
        &json_path,
        serde_json::to_vec_pretty(&bundle).context("serializing summary bundle")?,
    )
    .with_context(|| format!("writing {}", json_path.display()))?;

    println!("Contract artifacts generated in: {}", out_dir.display());
    println!("  - {}", csv_path.display());
    println!("  - {}", json_path.display());
    println!("  - cases: {}", bundle.rows.len());

    Ok(())
}

fn slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            ' ' | '-' => Some('_'),
            _ => None,
        })
        .collect()
}

fn ensure_same_length(case_id: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        bail!(
            "case {case_id} has mismatched output lengths: left={}, right={}",
            a.len(),
            b.len()
        );
    }
    Ok(())
}

fn benchmark_avg_ns<F>(iters: usize, mut f: F) -> Result<f64>
where
    F: FnMut() -> Result<()>,
{
    let start = Instant::now();
    for _ in 0..iters {
        f()?;
    }
    Ok(start.elapsed().as_nanos() as f64 / iters as f64)
}

struct RowBuildInput<'a> {
    case_id: &'a str,
    method: &'a str,
    rate: usize,
    samples: usize,
    aliased_f_max: f64,
    candidate: &'a [f64],
    reference: &'a [f64],
    candidate_ns: f64,
    baseline_ns: f64,
}

fn build_row(args: RowBuildInput<'_>) -> Result<ContractRow> {
    ensure_same_length(args.case_id, args.candidate, args.reference)?;
    let n = args.candidate.len();
    let edge = n / 4;
    Ok(ContractRow {
        case_id: args.case_id.to_string(),
        method: args.method.to_string(),
        rate: args.rate,
        samples: args.samples,
        aliased_f_max: args.aliased_f_max,
        pearson_r: pearson(args.candidate, args.reference),
        mae: mean_abs_error(args.candidate, args.reference)?,
        rmse: root_mean_squared_error(args.candidate, args.reference)?,
        max_abs: max_abs_error(args.candidate, args.reference)?,
        interior_mae: mean_abs_error(
            &args.candidate[edge..n - edge],
            &args.reference[edge..n - edge],
        )?,
        candidate_ns: args.candidate_ns,
        baseline_ns: args.baseline_ns,
        speedup_vs_baseline: args.baseline_ns / args.candidate_ns,
    })
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = *x - mean_a;
        let db = *y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }
    if var_a == 0.0 || var_b == 0.0 {
        if a == b {
            1.0
        } else {
            0.0
        }
    } else {
        cov / (var_a.sqrt() * var_b.sqrt())
    }
}

fn write_summary_csv(path: &Path, rows: &[ContractRow]) -> Result<()> {
    let mut out = String::new();
    out.push_str("case_id,method,rate,samples,aliased_f_max,pearson_r,mae,rmse,max_abs,interior_mae,candidate_ns,baseline_ns,speedup_vs_baseline\n");
    for row in rows {
        out.push_str(&format!(
            "{},{},{},{},{:.6},{:.12},{:.12},{:.12},{:.12},{:.12},{:.3},{:.3},{:.6}\n",
            row.case_id,
            row.method,
            row.rate,
            row.samples,
            row.aliased_f_max,
            row.pearson_r,
            row.mae,
            row.rmse,
            row.max_abs,
            row.interior_mae,
            row.candidate_ns,
            row.baseline_ns,
            row.speedup_vs_baseline,
        ));
    }
    fs::write(path, out).with_context(|| format!("writing {}", path.display()))
}
