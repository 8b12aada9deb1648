use insights_probe_runner::prelude::*;

fn main() -> ProbeRunResult<()> {
    let cli = init();
    let context = RunContext::from_cli(env!("CARGO_PKG_NAME"), cli);

    let summary = run(&context)?;

    println!(
        "Final crash count for {} after {} seconds is {}",
        summary.node_id,
        summary.observed_s(),
        summary.final_crash_count
    );

    Ok(())
}
