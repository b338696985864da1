//! Per-kind body shapes
//!
//! Every entity kind is drawn procedurally from rectangles and circles around
//! its position `p`. Offsets are in pixels; positive y points down.
//!
//! | Kind           | Silhouette                                   |
//! |----------------|----------------------------------------------|
//! | Player         | red gourd with a leaf on top                 |
//! | EnemySoldier   | green uniform, cap, rifle, overhead bar      |
//! | EnemyKing      | red robe, gold crown, overhead bar           |
//! | PlayerSkill    | white twin bolt                              |
//! | EnemySkill     | red arrow                                    |
//! | Neutral        | tree: trunk plus the entity's descriptor     |

use crate::components::{LifeFeatureComponent, RenderDescriptor, Shape};
use crate::entity::Entity;
use crate::math::Vector2;
use crate::render::{Color, Renderer};
use crate::ui::OverheadBar;

const GOURD_RED: Color = Color::rgb(1.0, 0.0, 0.0);
const UNIFORM_GREEN: Color = Color::rgb(0.12, 0.40, 0.18);
const ROBE_RED: Color = Color::rgb(0.8, 0.2, 0.2);
const GOLD: Color = Color::rgb(1.0, 0.8, 0.0);
const TRUNK_BROWN: Color = Color::rgb(0.54, 0.27, 0.07);
const LEAF_GREEN: Color = Color::rgb(0.0, 0.5, 0.0);

/// The hulu gourd
pub fn draw_player(entity: &Entity, renderer: &mut dyn Renderer) {
    let Some(p) = entity.position() else {
        return;
    };

    // Lower and upper body
    renderer.draw_circle(p.x, p.y + 5.0, 10.0, 32, GOURD_RED);
    renderer.draw_circle(p.x, p.y - 8.0, 6.0, 32, GOURD_RED);

    // Stem and leaf
    renderer.draw_rect(p.x - 0.75, p.y - 20.0, 1.5, 5.0, Color::rgb(0.10, 0.45, 0.10));
    renderer.draw_circle(p.x + 3.0, p.y - 20.0, 3.4, 27, Color::rgb(0.15, 0.70, 0.20));

    for dx in [-3.0, 3.0] {
        renderer.draw_circle(p.x + dx, p.y - 10.0, 1.8, 16, Color::WHITE);
        renderer.draw_circle(p.x + dx, p.y - 10.0, 0.8, 12, Color::BLACK);
    }
    renderer.draw_rect(p.x - 2.0, p.y - 7.0, 4.0, 2.0, Color::BLACK);
}

pub fn draw_soldier(entity: &Entity, renderer: &mut dyn Renderer) {
    let Some(p) = entity.position() else {
        return;
    };

    // Torso, head, cap
    renderer.draw_rect(p.x - 8.0, p.y - 2.0, 16.0, 20.0, UNIFORM_GREEN);
    renderer.draw_circle(p.x, p.y - 14.0, 6.0, 24, Color::rgb(1.0, 0.86, 0.72));
    renderer.draw_rect(p.x - 7.0, p.y - 19.0, 14.0, 6.0, Color::rgb(0.10, 0.30, 0.12));
    renderer.draw_rect(p.x - 7.0, p.y - 14.0, 14.0, 2.0, Color::rgb(0.08, 0.25, 0.10));

    renderer.draw_circle(p.x - 2.0, p.y - 14.0, 0.8, 12, Color::BLACK);
    renderer.draw_circle(p.x + 2.0, p.y - 14.0, 0.8, 12, Color::BLACK);

    // Arms and belt
    renderer.draw_rect(p.x - 14.0, p.y - 2.0, 6.0, 14.0, UNIFORM_GREEN);
    renderer.draw_rect(p.x + 8.0, p.y - 2.0, 6.0, 14.0, UNIFORM_GREEN);
    renderer.draw_rect(p.x - 8.0, p.y + 6.0, 16.0, 2.0, Color::rgb(0.05, 0.05, 0.05));

    // Legs and boots
    let trousers = Color::rgb(0.10, 0.35, 0.15);
    renderer.draw_rect(p.x - 6.0, p.y + 12.0, 6.0, 12.0, trousers);
    renderer.draw_rect(p.x, p.y + 12.0, 6.0, 12.0, trousers);
    renderer.draw_rect(p.x - 6.0, p.y + 22.0, 6.0, 3.0, Color::BLACK);
    renderer.draw_rect(p.x, p.y + 22.0, 6.0, 3.0, Color::BLACK);

    // Rifle
    let gunmetal = Color::rgb(0.1, 0.1, 0.1);
    renderer.draw_rect(p.x + 12.0, p.y - 2.0, 14.0, 2.0, gunmetal);
    renderer.draw_rect(p.x + 12.0, p.y, 3.0, 6.0, gunmetal);

    draw_overhead_bar(entity, renderer, p, OverheadBar::soldier());
}

pub fn draw_king(entity: &Entity, renderer: &mut dyn Renderer) {
    let Some(p) = entity.position() else {
        return;
    };

    renderer.draw_rect(p.x - 10.0, p.y - 10.0, 20.0, 30.0, ROBE_RED);
    renderer.draw_circle(p.x, p.y - 20.0, 8.0, 24, Color::rgb(1.0, 0.8, 0.6));
    renderer.draw_rect(p.x - 10.0, p.y - 28.0, 20.0, 6.0, GOLD);

    renderer.draw_circle(p.x - 3.0, p.y - 20.0, 1.0, 12, Color::BLACK);
    renderer.draw_circle(p.x + 3.0, p.y - 20.0, 1.0, 12, Color::BLACK);
    renderer.draw_rect(p.x - 3.0, p.y - 15.0, 6.0, 2.0, Color::BLACK);

    // Sleeves and hands
    renderer.draw_rect(p.x - 15.0, p.y - 10.0, 5.0, 20.0, ROBE_RED);
    renderer.draw_rect(p.x + 10.0, p.y - 10.0, 5.0, 20.0, ROBE_RED);
    let skin = Color::rgb(0.8, 0.6, 0.4);
    renderer.draw_rect(p.x - 20.0, p.y - 10.0, 5.0, 5.0, skin);
    renderer.draw_rect(p.x + 15.0, p.y - 10.0, 5.0, 5.0, skin);

    // Legs, boots, toes
    let legs = Color::rgb(0.5, 0.5, 0.5);
    renderer.draw_rect(p.x - 6.0, p.y + 20.0, 6.0, 12.0, legs);
    renderer.draw_rect(p.x, p.y + 20.0, 6.0, 12.0, legs);
    let boots = Color::rgb(0.3, 0.3, 0.3);
    renderer.draw_rect(p.x - 6.0, p.y + 32.0, 6.0, 3.0, boots);
    renderer.draw_rect(p.x, p.y + 32.0, 6.0, 3.0, boots);
    let toes = Color::rgb(0.2, 0.2, 0.2);
    renderer.draw_rect(p.x - 6.0, p.y + 35.0, 3.0, 2.0, toes);
    renderer.draw_rect(p.x + 3.0, p.y + 35.0, 3.0, 2.0, toes);

    draw_overhead_bar(entity, renderer, p, OverheadBar::king());
}

pub fn draw_player_bolt(entity: &Entity, renderer: &mut dyn Renderer) {
    let Some(p) = entity.position() else {
        return;
    };
    renderer.draw_rect(p.x + 5.0, p.y - 4.0, 5.0, 3.0, Color::WHITE);
    renderer.draw_rect(p.x + 5.0, p.y + 1.0, 5.0, 3.0, Color::WHITE);
}

pub fn draw_enemy_arrow(entity: &Entity, renderer: &mut dyn Renderer) {
    let Some(p) = entity.position() else {
        return;
    };
    let red = Color::rgb(1.0, 0.0, 0.0);
    // Shaft, then the two-layer head
    renderer.draw_rect(p.x - 10.0, p.y - 1.0, 14.0, 3.0, red);
    renderer.draw_rect(p.x + 5.0, p.y - 4.0, 5.0, 3.0, red);
    renderer.draw_rect(p.x + 5.0, p.y + 1.0, 5.0, 3.0, red);
    renderer.draw_rect(p.x + 7.0, p.y - 2.0, 3.0, 2.0, red);
    renderer.draw_rect(p.x + 7.0, p.y + 1.0, 3.0, 2.0, red);
}

/// A trunk with the entity's descriptor as the crown
///
/// Without a descriptor the crown is the default green disc.
pub fn draw_scenery(entity: &Entity, renderer: &mut dyn Renderer) {
    let Some(p) = entity.position() else {
        return;
    };
    renderer.draw_rect(p.x - 1.0, p.y, 2.0, 10.0, TRUNK_BROWN);

    let crown = entity
        .get::<RenderDescriptor>()
        .copied()
        .unwrap_or_else(|| RenderDescriptor::new(Shape::Circle, Vector2::new(8.0, 8.0), LEAF_GREEN));
    crown.draw(renderer, p + Vector2::new(0.0, -5.0));
}

fn draw_overhead_bar(entity: &Entity, renderer: &mut dyn Renderer, p: Vector2, bar: OverheadBar) {
    if let Some(life) = entity.get::<LifeFeatureComponent>() {
        bar.render(renderer, p, life.health(), life.max_health());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::TransformComponent;
    use crate::config::GameConfig;
    use crate::entity::EntityKind;
    use crate::game::prefabs;
    use crate::render::{DrawCall, RecordingRenderer};

    #[test]
    fn test_soldier_draws_overhead_bar() {
        let config = GameConfig::default();
        let mut soldier = prefabs::enemy_soldier(&config, Vector2::new(100.0, 100.0), Vector2::ZERO);
        if let Some(life) = soldier.get_mut::<LifeFeatureComponent>() {
            life.take_damage(30);
        }
        let mut renderer = RecordingRenderer::new(1600, 1200);
        soldier.render(&mut renderer);

        assert_eq!(renderer.health_bars(), vec![(70, 100)]);
    }

    #[test]
    fn test_tree_crown_sits_above_trunk() {
        let tree = prefabs::tree(Vector2::new(50.0, 50.0));
        let mut renderer = RecordingRenderer::new(100, 100);
        tree.render(&mut renderer);

        assert_eq!(renderer.calls.len(), 2);
        assert!(matches!(
            renderer.calls[1],
            DrawCall::Circle { x, y, radius, .. } if x == 50.0 && y == 45.0 && radius == 8.0
        ));
    }

    #[test]
    fn test_no_transform_draws_nothing() {
        let bare = Entity::new(EntityKind::EnemyKing);
        let mut renderer = RecordingRenderer::new(100, 100);
        draw_king(&bare, &mut renderer);
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn test_player_is_centred_on_position() {
        let player = Entity::new(EntityKind::Player)
            .with(TransformComponent::new(Vector2::new(10.0, 20.0)));
        let mut renderer = RecordingRenderer::new(100, 100);
        draw_player(&player, &mut renderer);

        assert_eq!(
            renderer.calls[0],
            DrawCall::Circle { x: 10.0, y: 25.0, radius: 10.0, segments: 32, color: GOURD_RED }
        );
    }
}
