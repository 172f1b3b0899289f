use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use dojo_core::{Clock, SystemClock};
use dojo_fiction::{ActionResolver, Renderer};
use dojo_training::TrainingScheduler;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;

use crate::render::TextRenderer;

/// Read action numbers from stdin until `quit` or end of input.
///
/// Training ticks keep running in the background for the whole session, so
/// a player who starts a training sees it progress with `look`.
pub async fn run(ctx: &super::Context, player: &str, scene: &str) -> Result<(), String> {
    let player = super::parse_player(player)?;
    let store = ctx.store()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let resolver = ActionResolver::new(ctx.catalog()?, Arc::clone(&store), Arc::clone(&clock));
    let scheduler = TrainingScheduler::new(store, clock, ctx.training.clone());

    let (stop, stopped) = oneshot::channel::<()>();
    let background = tokio::spawn(async move {
        scheduler
            .run_until(async {
                let _ = stopped.await;
            })
            .await;
    });

    let result = session(&resolver, &player, scene).await;

    let _ = stop.send(());
    if let Err(e) = background.await {
        tracing::error!(error = %e, "training task failed");
    }
    result
}

async fn session(
    resolver: &ActionResolver,
    player: &dojo_core::PlayerId,
    scene: &str,
) -> Result<(), String> {
    let (mut current, state) = resolver.enter(player, scene).map_err(|e| e.to_string())?;
    print!("{}", TextRenderer.render(&current, &state));
    println!("  {}", "Enter an action number, 'look' or 'quit'.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            println!();
            break;
        };
        match line.trim() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "look" | "l" => {
                let (scene, state) = resolver
                    .enter(player, &current.id)
                    .map_err(|e| e.to_string())?;
                print!("{}", TextRenderer.render(&scene, &state));
            }
            input => {
                let Some(index) = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
                else {
                    println!("  {}", format!("'{input}' is not an action number").yellow());
                    continue;
                };
                match resolver.resolve(player, &current, index) {
                    Ok(resolution) => current = super::present(resolution, current),
                    Err(e) => println!("  {}", super::describe_rejection(e).yellow()),
                }
            }
        }
    }
    Ok(())
}
