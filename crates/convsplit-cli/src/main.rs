//! convsplit CLI: estimate, recommend and sweep CPU/GPU row splits for a 2D
//! convolution.
//!
//! ## Usage
//! ```bash
//! # Recommend a split from a scenario file
//! convsplit recommend --scenario scenarios/large.yaml
//!
//! # Estimate one split from flags
//! convsplit estimate --rows 1000 --cols 1000 --kernel 5 \
//!     --cpu-ops 500 --gpu-ops 2000 --bandwidth 100 --offload 480
//!
//! # Dump the cost curve every 10 rows as JSON
//! convsplit sweep --scenario scenarios/large.yaml --step 10 --json
//! ```

use clap::{Args, Parser, Subcommand};
use convsplit_core::prelude::{ElementType, PerfProfile, ProblemSpec, SearchStrategy, SplitConfig};
use convsplit_model::{breakdown, CostBreakdown};
use convsplit_planner::exhaustive::best_split_exhaustive;
use convsplit_planner::{
    best_split_fast_with_threshold, cost_curve, curve_minimum, is_unimodal, parse_yaml_scenario,
    recommend, verify, ConfigDef, Recommendation, Scenario,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "convsplit")]
#[command(about = "Cost model and split planner for CPU/GPU row-partitioned 2D convolution", long_about = None)]
struct Cli {
    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate execution time for one split
    Estimate {
        #[command(flatten)]
        input: ProblemArgs,

        /// Leading input rows offloaded to the GPU (overrides the scenario)
        #[arg(long, allow_hyphen_values = true)]
        offload: Option<i64>,
    },

    /// Recommend the split with the lowest estimate
    Recommend {
        #[command(flatten)]
        input: ProblemArgs,

        /// Search strategy: auto, exhaustive or ternary (overrides config)
        #[arg(long)]
        strategy: Option<String>,

        /// Row count below which `auto` scans exhaustively (overrides config)
        #[arg(long)]
        threshold: Option<u64>,

        /// Check the result against neighboring candidates
        #[arg(long)]
        verify: bool,
    },

    /// Print the cost curve over [0, M]
    Sweep {
        #[command(flatten)]
        input: ProblemArgs,

        /// Distance between sampled row counts
        #[arg(long, default_value_t = 1)]
        step: u64,
    },

    /// Validate a scenario YAML file
    Validate {
        /// Path to the scenario YAML file
        #[arg(short, long)]
        scenario: PathBuf,
    },
}

/// Problem and profile, from a scenario file and/or flags. Flags win.
#[derive(Args, Debug, Clone, Default)]
struct ProblemArgs {
    /// Path to a scenario YAML file
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Input height M
    #[arg(long)]
    rows: Option<u64>,

    /// Input width N
    #[arg(long)]
    cols: Option<u64>,

    /// Kernel size K
    #[arg(long)]
    kernel: Option<u64>,

    /// Element type: f16, f32 or f64
    #[arg(long)]
    element: Option<String>,

    /// CPU throughput (ops per time unit)
    #[arg(long)]
    cpu_ops: Option<u64>,

    /// GPU throughput (ops per time unit)
    #[arg(long)]
    gpu_ops: Option<u64>,

    /// Host/device bandwidth (bytes per time unit)
    #[arg(long)]
    bandwidth: Option<u64>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Everything a command needs after layering env, scenario and flags.
struct Inputs {
    problem: ProblemSpec,
    profile: PerfProfile,
    config: SplitConfig,
    offload_rows: Option<i64>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Estimate { input, offload } => run_estimate(&input, offload),
        Commands::Recommend {
            input,
            strategy,
            threshold,
            verify,
        } => run_recommend(&input, strategy.as_deref(), threshold, verify),
        Commands::Sweep { input, step } => run_sweep(&input, step),
        Commands::Validate { scenario } => validate_scenario(&scenario).map(|s| {
            println!("✓ Scenario is valid: {}", s.problem);
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scenario(path: &Path) -> CliResult<Scenario> {
    let yaml_content = fs::read_to_string(path)?;
    Ok(parse_yaml_scenario(&yaml_content)?)
}

fn validate_scenario(path: &Path) -> CliResult<Scenario> {
    load_scenario(path)
}

/// Flags that override the search config, when the command has them.
#[derive(Debug, Clone, Copy, Default)]
struct ConfigFlags<'a> {
    strategy: Option<&'a str>,
    threshold: Option<u64>,
}

fn resolve_inputs(args: &ProblemArgs, flags: ConfigFlags<'_>) -> CliResult<Inputs> {
    let scenario = args.scenario.as_deref().map(load_scenario).transpose()?;

    let file_config = scenario.as_ref().map(|s| s.config).unwrap_or_default();
    let config = layer_config(SplitConfig::from_env(), &file_config, flags)?;

    let pick = |flag: Option<u64>, from_file: Option<u64>, name: &str| -> CliResult<u64> {
        flag.or(from_file)
            .ok_or_else(|| format!("missing --{name} (or a --scenario that provides it)").into())
    };

    let file_problem = scenario.as_ref().map(|s| s.problem);
    let file_profile = scenario.as_ref().map(|s| s.profile);

    let element = match args.element.as_deref() {
        Some(s) => s.parse::<ElementType>()?,
        None => file_problem.map(|p| p.element()).unwrap_or_default(),
    };

    let problem = ProblemSpec::new(
        pick(args.rows, file_problem.map(|p| p.rows()), "rows")?,
        pick(args.cols, file_problem.map(|p| p.cols()), "cols")?,
        pick(args.kernel, file_problem.map(|p| p.kernel()), "kernel")?,
    )?
    .with_element(element);

    let profile = PerfProfile::new(
        pick(args.cpu_ops, file_profile.map(|p| p.cpu_ops()), "cpu-ops")?,
        pick(args.gpu_ops, file_profile.map(|p| p.gpu_ops()), "gpu-ops")?,
        pick(args.bandwidth, file_profile.map(|p| p.bandwidth()), "bandwidth")?,
    )?;

    tracing::info!(
        problem = %problem,
        strategy = %config.strategy,
        threshold = config.fast_search_threshold,
        "resolved inputs"
    );

    Ok(Inputs {
        problem,
        profile,
        config,
        offload_rows: scenario.and_then(|s| s.offload_rows),
    })
}

/// Environment, then scenario file, then flags; later layers win.
fn layer_config(env: SplitConfig, file: &ConfigDef, flags: ConfigFlags<'_>) -> CliResult<SplitConfig> {
    let mut config = env;
    file.apply_to(&mut config);
    if let Some(s) = flags.strategy {
        config.strategy = s.parse::<SearchStrategy>()?;
    }
    if let Some(t) = flags.threshold {
        config.fast_search_threshold = t;
    }
    Ok(config)
}

fn run_estimate(args: &ProblemArgs, offload: Option<i64>) -> CliResult<()> {
    let inputs = resolve_inputs(args, ConfigFlags::default())?;
    let rows = offload
        .or(inputs.offload_rows)
        .ok_or("missing --offload (or offload_rows in the scenario)")?;
    let cost = breakdown(&inputs.problem, &inputs.profile, rows);

    if args.json {
        let doc = json!({
            "problem": inputs.problem,
            "profile": inputs.profile,
            "offload_rows": rows,
            "estimate": cost.total(),
            "breakdown": cost,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Problem: {}", inputs.problem);
    println!("Offloaded rows: {}", rows);
    print_breakdown(&cost);
    Ok(())
}

fn run_recommend(
    args: &ProblemArgs,
    strategy: Option<&str>,
    threshold: Option<u64>,
    check: bool,
) -> CliResult<()> {
    let inputs = resolve_inputs(args, ConfigFlags { strategy, threshold })?;

    let rec = recommend(&inputs.problem, &inputs.profile, &inputs.config);
    if check {
        verify::check_local_optimum(&inputs.problem, &inputs.profile, rec.rows)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }

    print_recommendation(&inputs.problem, &rec);
    Ok(())
}

fn run_sweep(args: &ProblemArgs, step: u64) -> CliResult<()> {
    let inputs = resolve_inputs(args, ConfigFlags::default())?;
    let points = cost_curve(&inputs.problem, &inputs.profile, step);
    let times: Vec<u64> = points.iter().map(|p| p.time).collect();
    let unimodal = is_unimodal(&times);
    let minimum = curve_minimum(&points);
    // The sweep already costs O(M), so compare the two searches directly.
    let exhaustive_rows = best_split_exhaustive(&inputs.problem, &inputs.profile);
    let ternary_rows = best_split_fast_with_threshold(&inputs.problem, &inputs.profile, 0);

    if args.json {
        let doc = json!({
            "problem": inputs.problem,
            "profile": inputs.profile,
            "unimodal": unimodal,
            "minimum": minimum,
            "exhaustive_rows": exhaustive_rows,
            "ternary_rows": ternary_rows,
            "points": points,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Cost Curve");
    println!("==========");
    println!("Problem: {}", inputs.problem);
    println!();
    for p in &points {
        println!("  {:>8} rows  {:>12}", p.rows, p.time);
    }
    println!();
    if let Some(min) = minimum {
        println!("Sampled minimum: {} at {} rows", min.time, min.rows);
    }
    if unimodal {
        println!("✓ Sampled curve is unimodal");
    } else {
        println!("✗ Sampled curve has several local minima");
    }
    if ternary_rows == exhaustive_rows {
        println!("✓ Ternary search agrees with the full scan ({} rows)", ternary_rows);
    } else {
        println!(
            "✗ Ternary search picks {} rows, the full scan {}; prefer --strategy exhaustive",
            ternary_rows, exhaustive_rows
        );
    }
    Ok(())
}

fn print_breakdown(cost: &CostBreakdown) {
    println!("Output grid: {} x {}", cost.grid.height, cost.grid.width);
    println!("Ops per position: {}", cost.ops_per_position);
    println!();
    println!("CPU path:");
    println!("  Output rows: {}", cost.cpu_output_rows);
    println!("  Operations: {}", cost.cpu_total_ops());
    println!("  Time: {:.3}", cost.cpu_time);
    println!();
    println!("GPU path:");
    println!("  Output rows: {}", cost.gpu_output_rows);
    println!(
        "  Rows transferred: {} ({} bytes in, {} bytes out)",
        cost.rows_to_transfer, cost.transfer_in_bytes, cost.transfer_out_bytes
    );
    println!("  Transfer in: {:.3}", cost.transfer_in_time);
    println!("  Compute: {:.3}", cost.gpu_compute_time);
    println!("  Transfer out: {:.3}", cost.transfer_out_time);
    println!("  Time: {:.3}", cost.gpu_time());
    println!();
    println!("Estimate: {} ({:?}-bound)", cost.total(), cost.bottleneck());
}

fn print_recommendation(problem: &ProblemSpec, rec: &Recommendation) {
    println!("Split Recommendation");
    println!("====================");
    println!("Problem: {}", problem);
    println!(
        "Offload {} of {} rows to the GPU ({} strategy, {} evaluations)",
        rec.rows,
        problem.rows(),
        rec.strategy,
        rec.evaluations
    );
    println!();
    print_breakdown(&rec.breakdown);
}
