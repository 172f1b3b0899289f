use colored::Colorize;

pub fn run(ctx: &super::Context) -> Result<(), String> {
    let catalog = ctx.catalog()?;

    if !catalog.contains(super::DEFAULT_SCENE) {
        eprintln!(
            "  {} no '{}' scene; players must be started in another scene",
            "warning:".yellow().bold(),
            super::DEFAULT_SCENE
        );
    }

    let dangling = catalog.dangling_references();
    for reference in &dangling {
        let hint = catalog
            .suggest(&reference.target)
            .map(|id| format!(" (did you mean '{id}'?)"))
            .unwrap_or_default();
        eprintln!(
            "  {} scene '{}', action {}: next scene '{}' does not exist{hint}",
            "error:".red().bold(),
            reference.scene,
            reference.action + 1,
            reference.target,
        );
    }

    if !dangling.is_empty() {
        return Err(format!(
            "{} dangling scene reference{}",
            dangling.len(),
            if dangling.len() == 1 { "" } else { "s" }
        ));
    }

    println!("  All checks passed for '{}'.", ctx.world.display());
    println!("  {} scenes", catalog.len());
    Ok(())
}
