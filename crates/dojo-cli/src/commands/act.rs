pub fn run(ctx: &super::Context, player: &str, scene: &str, action: usize) -> Result<(), String> {
    let player = super::parse_player(player)?;
    let index = action
        .checked_sub(1)
        .ok_or("actions are numbered from 1")?;

    let resolver = ctx.resolver()?;
    let current = resolver.catalog().scene_or_missing(scene).into_owned();
    let resolution = resolver
        .resolve(&player, &current, index)
        .map_err(super::describe_rejection)?;
    super::present(resolution, current);
    Ok(())
}
