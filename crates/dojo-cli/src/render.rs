//! Plain-text presentation of scenes.

use colored::Colorize;
use dojo_core::{ActionKind, PlayerState, Scene, skill_display_name};
use dojo_fiction::Renderer;

/// Renders a scene as terminal text: title, body, numbered actions and a
/// stats footer.
pub struct TextRenderer;

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, player: &PlayerState) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n  {} {}\n", "▶".dimmed(), scene.title.bold()));
        if !scene.body.is_empty() {
            out.push('\n');
            for line in scene.body.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
        if let Some(image) = &scene.image {
            out.push_str(&format!("  {}\n", format!("[image: {image}]").dimmed()));
        }

        if !scene.actions.is_empty() {
            out.push('\n');
            for (i, action) in scene.actions.iter().enumerate() {
                let mut line = format!("  [{}] {}", i + 1, action.label);
                if action.kind == ActionKind::Activity {
                    line.push_str(&format!(" {}", "(activity)".dimmed()));
                }
                if !action.requires.is_empty() {
                    let needs: Vec<String> = action
                        .requires
                        .iter()
                        .map(|(stat, threshold)| format!("{threshold} {}", skill_display_name(stat)))
                        .collect();
                    line.push_str(&format!(" {}", format!("(needs {})", needs.join(", ")).dimmed()));
                }
                out.push_str(&line);
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(&format!("  {}\n", footer(player).dimmed()));
        out
    }
}

/// `HP: 100 | Mana: 500 | Gold: 0 | XP: 0`, plus the current training.
pub fn footer(player: &PlayerState) -> String {
    let mut stats = vec![
        format!("HP: {}", player.hp()),
        format!("Mana: {}", player.mana()),
        format!("Gold: {}", player.gold()),
        format!("XP: {}", player.xp()),
    ];
    if let Some(skill) = player.active_training() {
        stats.push(format!("Training: {}", skill_display_name(skill)));
    }
    stats.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::{Action, EffectValue, FieldValue};

    #[test]
    fn footer_shows_stats() {
        let player = PlayerState::default();
        assert_eq!(footer(&player), "HP: 100 | Mana: 500 | Gold: 0 | XP: 0");
    }

    #[test]
    fn footer_shows_training() {
        let mut player = PlayerState::default();
        player.set("active_training", FieldValue::Text("seal_stillness".into()));
        assert!(footer(&player).ends_with("| Training: Stillness"));
    }

    #[test]
    fn actions_are_numbered_from_one() {
        colored::control::set_override(false);
        let scene = Scene::new("dojo", "Dojo")
            .with_body("Mats and incense.")
            .with_action(Action::new("Leave").with_next_scene("town_square"))
            .with_action(
                Action::new("Train Flame")
                    .with_kind(ActionKind::Activity)
                    .with_requirement("mana", 10.0)
                    .with_effect("active_training", EffectValue::Set("seal_flame".into())),
            );
        let text = TextRenderer.render(&scene, &PlayerState::default());
        assert!(text.contains("▶ Dojo"));
        assert!(text.contains("Mats and incense."));
        assert!(text.contains("[1] Leave"));
        assert!(text.contains("[2] Train Flame (activity) (needs 10 Mana)"));
        assert!(text.contains("HP: 100"));
    }
}
