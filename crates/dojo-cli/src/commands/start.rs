use dojo_fiction::Renderer;

use crate::render::TextRenderer;

pub fn run(ctx: &super::Context, player: &str, scene: &str) -> Result<(), String> {
    let player = super::parse_player(player)?;
    let resolver = ctx.resolver()?;
    let (scene, state) = resolver.enter(&player, scene).map_err(|e| e.to_string())?;
    print!("{}", TextRenderer.render(&scene, &state));
    Ok(())
}
