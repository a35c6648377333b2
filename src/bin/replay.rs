use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use graph_scratch::trace::read_trace_path;
use graph_scratch::Replayer;

/// Replay a recorded arena operation trace and print its digest.
#[derive(Parser, Debug)]
#[command(name = "replay")]
struct Args {
    /// CSV trace with header `op,arg,a,b,c`
    trace: PathBuf,

    /// Graph size for operations before the first `reset`
    #[arg(long, default_value_t = 0)]
    size: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let ops = match read_trace_path(&args.trace) {
        Ok(ops) => ops,
        Err(err) => {
            tracing::error!(path = %args.trace.display(), %err, "failed to read trace");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(ops = ops.len(), "trace loaded");

    let mut replayer = Replayer::new(args.size);
    match replayer.run(&ops) {
        Ok(summary) => {
            println!("runs:       {}", summary.runs);
            println!("ops:        {}", summary.ops);
            println!("popped:     {}", summary.popped);
            println!("capacity:   {}", replayer.arena().capacity());
            println!("state_hash: {:016x}", summary.state_hash);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
