use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(ctx: &super::Context, player: &str) -> Result<(), String> {
    let player = super::parse_player(player)?;
    let store = ctx.store()?;

    let known = store
        .player_ids()
        .map_err(|e| e.to_string())?
        .contains(&player);
    let state = store.get(&player).map_err(|e| e.to_string())?;

    println!("  {} {}", "Player".dimmed(), player.as_str().bold());
    if !known {
        println!("  {}", "(no saved record; showing defaults)".dimmed());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Value"]);
    for (field, value) in state.iter() {
        table.add_row(vec![field.to_string(), value.to_string()]);
    }
    println!("{table}");

    Ok(())
}
