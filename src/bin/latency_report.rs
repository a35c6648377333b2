use clap::Parser;
use graph_scratch::{Arena, ClearSpec, Region, RegionPair};
use hdrhistogram::Histogram;
use std::time::Instant;

/// Per-run latency of arena reset plus dual-stack churn.
#[derive(Parser, Debug)]
#[command(name = "latency-report")]
struct Args {
    /// Graph size for each run
    #[arg(long, default_value_t = 10_000)]
    size: usize,

    /// Number of runs to measure
    #[arg(long, default_value_t = 10_000)]
    iterations: u64,

    /// Pin the measuring thread to the last CPU core
    #[arg(long)]
    pin: bool,
}

fn pin_to_last_core() {
    if let Some(core_ids) = core_affinity::get_core_ids() {
        if let Some(last_core) = core_ids.last() {
            core_affinity::set_for_current(*last_core);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    if args.pin {
        pin_to_last_core();
    }

    println!("Preparing Latency Benchmark...");

    // Alternate between two sizes so half the runs re-slice in place
    let sizes = [args.size, args.size / 2];
    let mut arena = Arena::new(args.size);
    let mut histogram = Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3)
        .expect("histogram bounds are valid");

    println!("Running {} iterations of size {}...", args.iterations, args.size);

    let mut total_duration = std::time::Duration::new(0, 0);

    for run in 0..args.iterations {
        let size = sizes[(run % 2) as usize];

        // Critical measurement section
        let start = Instant::now();

        arena.reset(size, ClearSpec::none().zero(Region::C));
        let views = arena.views();
        let mut stack = views.dual_stack(RegionPair::AB);
        for v in 0..size {
            stack.push_or_promote(v);
        }
        for v in (0..size).step_by(2) {
            stack.push_or_promote(v);
        }
        while let Some(v) = stack.pop_primary() {
            std::hint::black_box(v);
        }
        while let Some(v) = stack.pop_promoted() {
            std::hint::black_box(v);
        }

        let elapsed = start.elapsed();

        histogram.record(elapsed.as_nanos() as u64).unwrap_or(());
        total_duration += elapsed;
    }

    println!("\n=== Latency Report (ns per run) ===");
    println!("Total Runs: {}", args.iterations);
    println!("Throughput: {:.2} runs/sec", args.iterations as f64 / total_duration.as_secs_f64());
    println!("-----------------------------------");
    println!("Min:    {:10} ns", histogram.min());
    println!("P50:    {:10} ns", histogram.value_at_quantile(0.50));
    println!("P90:    {:10} ns", histogram.value_at_quantile(0.90));
    println!("P99:    {:10} ns", histogram.value_at_quantile(0.99));
    println!("P99.9:  {:10} ns", histogram.value_at_quantile(0.999));
    println!("Max:    {:10} ns", histogram.max());
    println!("-----------------------------------");
}
