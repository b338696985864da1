//! Per-kind behaviour table
//!
//! Each [`EntityKind`] maps to one static [`KindBehavior`]: an update hook run
//! after the generic component update, and a render function drawing the
//! kind's silhouette. Only the king has a non-trivial update hook (its opening
//! volley); every kind has its own silhouette.

use crate::components::WeaponComponent;
use crate::entity::{Entity, EntityKind};
use crate::game::{GameRng, prefabs};
use crate::math::Vector2;
use crate::registry::Spawner;
use crate::render::{Renderer, silhouettes};

/// Explicit per-tick context handed to update hooks
pub struct UpdateContext<'a> {
    pub delta_time: f32,
    pub rng: &'a mut GameRng,
    /// Player position committed by the previous tick, if a player is alive
    pub player_position: Option<Vector2>,
}

pub type UpdateFn = fn(&mut Entity, &mut Spawner, &mut UpdateContext);
pub type RenderFn = fn(&Entity, &mut dyn Renderer);

/// Update hook and silhouette for one entity kind
pub struct KindBehavior {
    pub update: UpdateFn,
    pub render: RenderFn,
}

static PLAYER: KindBehavior = KindBehavior {
    update: no_update,
    render: silhouettes::draw_player,
};

static ENEMY_SOLDIER: KindBehavior = KindBehavior {
    update: no_update,
    render: silhouettes::draw_soldier,
};

static ENEMY_KING: KindBehavior = KindBehavior {
    update: king_update,
    render: silhouettes::draw_king,
};

static PLAYER_SKILL: KindBehavior = KindBehavior {
    update: no_update,
    render: silhouettes::draw_player_bolt,
};

static ENEMY_SKILL: KindBehavior = KindBehavior {
    update: no_update,
    render: silhouettes::draw_enemy_arrow,
};

static NEUTRAL: KindBehavior = KindBehavior {
    update: no_update,
    render: silhouettes::draw_scenery,
};

pub fn behavior_for(kind: EntityKind) -> &'static KindBehavior {
    match kind {
        EntityKind::Player => &PLAYER,
        EntityKind::EnemySoldier => &ENEMY_SOLDIER,
        EntityKind::EnemyKing => &ENEMY_KING,
        EntityKind::PlayerSkill => &PLAYER_SKILL,
        EntityKind::EnemySkill => &ENEMY_SKILL,
        EntityKind::Neutral => &NEUTRAL,
    }
}

fn no_update(_entity: &mut Entity, _spawner: &mut Spawner, _ctx: &mut UpdateContext) {}

/// The king opens fire on its first update, then the enemy attack phase
/// takes over on the weapon's period
fn king_update(entity: &mut Entity, spawner: &mut Spawner, ctx: &mut UpdateContext) {
    let Some(origin) = entity.position() else {
        return;
    };
    let Some(weapon) = entity.get_mut::<WeaponComponent>() else {
        return;
    };
    if weapon.volleys_fired() > 0 {
        return;
    }

    for projectile in prefabs::enemy_volley(origin, weapon, ctx.player_position, ctx.rng) {
        spawner.spawn(projectile);
    }
    weapon.record_volley();
    log::debug!("{} opened fire", entity.id());
}
