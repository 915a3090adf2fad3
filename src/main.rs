use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use u_preempt::models::{TaskSpec, TickRecord};
use u_preempt::scheduler::{PreemptiveScheduler, SchedulerConfig};
use u_preempt::workload::{generate_workload, resolve_task_count, WorkloadConfig, MAX_GENERATED_TASKS};

/// Preemptive priority scheduling simulator.
#[derive(Debug, Parser)]
#[command(name = "u-preempt", version, about)]
struct Args {
    /// Number of tasks to schedule. Unrecognized values schedule all.
    /// Prompted on stdin when omitted.
    #[arg(short, long)]
    count: Option<String>,

    /// Seed for the random workload.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Load task descriptors from a JSON array instead of generating them.
    #[arg(short, long)]
    tasks: Option<PathBuf>,

    /// Print the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Ticks between priority aging.
    #[arg(long, default_value_t = 3)]
    reset_interval: u64,

    /// Aging ratio in round(priority × ratio × tick³).
    #[arg(long, default_value_t = 0.01)]
    aging_ratio: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let available = match &args.tasks {
        Some(path) => load_specs(path)?,
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            generate_workload(MAX_GENERATED_TASKS, &WorkloadConfig::default(), &mut rng)?
        }
    };

    let request = match args.count {
        Some(text) => text,
        None => prompt_count()?,
    };
    let count = resolve_task_count(&request, available.len());
    let specs = &available[..count];
    info!(count, "scheduling tasks");

    let config = SchedulerConfig::new()
        .with_reset_interval(args.reset_interval)
        .with_aging_ratio(args.aging_ratio);
    let scheduler = PreemptiveScheduler::with_config(specs, config)?;

    if args.json {
        let report = scheduler.run()?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_specs(specs);
    println!();
    println!("{:<8}{:<8}Waiting", "Tick", "CPU");
    let report = scheduler.run_with(&mut print_tick)?;

    println!();
    for note in &report.aging {
        println!("{note}");
    }

    let kpi = report.kpi();
    println!();
    println!(
        "ticks: {}  avg turnaround: {:.2}  avg waiting: {:.2}  preemptions: {}",
        kpi.makespan, kpi.avg_turnaround, kpi.avg_waiting, kpi.total_preemptions
    );
    Ok(())
}

fn load_specs(path: &Path) -> Result<Vec<TaskSpec>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn prompt_count() -> Result<String> {
    print!("Number of tasks to schedule: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read task count")?;
    Ok(line)
}

fn print_specs(specs: &[TaskSpec]) {
    println!("{:<8}{:<10}{:<10}Priority", "Task", "Arrival", "Duration");
    for s in specs {
        println!(
            "{:<8}{:<10}{:<10}{}",
            s.name, s.arrival_tick, s.duration, s.priority
        );
    }
}

fn print_tick(record: &TickRecord) {
    println!(
        "{:<8}{:<8}[{}]",
        record.tick,
        record.running,
        record.waiting.join(", ")
    );
}
