use std::sync::Arc;

use colored::Colorize;
use dojo_core::SystemClock;
use dojo_training::TrainingScheduler;

pub async fn run(ctx: &super::Context, once: bool) -> Result<(), String> {
    let store = ctx.store()?;
    let scheduler = TrainingScheduler::new(store, Arc::new(SystemClock), ctx.training.clone());

    if once {
        let report = scheduler.tick_all().map_err(|e| e.to_string())?;
        for (player, e) in &report.failures {
            eprintln!("  {} {player}: {e}", "warning:".yellow().bold());
        }
        println!(
            "  {} players: {} trained, {} finished, {} stalled, {} repaired, {} idle",
            report.total(),
            report.trained,
            report.finished,
            report.stalled,
            report.repaired,
            report.idle,
        );
        return Ok(());
    }

    println!(
        "  Training every {}s. Press Ctrl-C to stop.",
        scheduler.config().interval.as_secs()
    );
    scheduler
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "cannot listen for Ctrl-C");
            }
        })
        .await;
    Ok(())
}
