/// 目標解析 - 瞄準點修正與敵對陣營目標查詢

use skill_system::SkillDefinition;
use specs::{Entity, Join};
use vek::Vec2;

use super::SkillContext;
use crate::comp::{try_normalized, Faction, Pos, Vitals};

/// 將瞄準點限制在技能射程內
///
/// 射程內直接回傳原始瞄準點（範圍技能以精確位置落點），
/// 超出時沿施法者→瞄準點方向截到射程邊緣。
pub fn resolve_target_point(
    caster_pos: Vec2<f32>,
    skill: &SkillDefinition,
    raw_aim: Vec2<f32>,
) -> Vec2<f32> {
    let offset = raw_aim - caster_pos;
    if offset.magnitude() <= skill.range() {
        return raw_aim;
    }
    match try_normalized(offset) {
        Some(dir) => caster_pos + dir * skill.range(),
        None => raw_aim,
    }
}

/// 以 `center` 為中心、`radius` 內所有存活的敵對陣營角色
///
/// 結果不保證順序。
pub fn find_targets_in_radius(
    ctx: &SkillContext,
    center: Vec2<f32>,
    radius: f32,
    caster_faction: Faction,
    exclude: Option<Entity>,
) -> Vec<Entity> {
    (&ctx.entities, &ctx.positions, &ctx.factions, &ctx.vitals)
        .join()
        .filter(|(e, pos, faction, vitals)| {
            is_target(*e, pos, **faction, vitals, center, radius, caster_faction, exclude)
        })
        .map(|(e, ..)| e)
        .collect()
}

/// 列舉時第一個命中的目標（投射物用）
pub fn first_target_in_radius(
    ctx: &SkillContext,
    center: Vec2<f32>,
    radius: f32,
    caster_faction: Faction,
    exclude: Option<Entity>,
) -> Option<Entity> {
    (&ctx.entities, &ctx.positions, &ctx.factions, &ctx.vitals)
        .join()
        .find(|(e, pos, faction, vitals)| {
            is_target(*e, pos, **faction, vitals, center, radius, caster_faction, exclude)
        })
        .map(|(e, ..)| e)
}

pub fn any_target_in_radius(
    ctx: &SkillContext,
    center: Vec2<f32>,
    radius: f32,
    caster_faction: Faction,
    exclude: Option<Entity>,
) -> bool {
    first_target_in_radius(ctx, center, radius, caster_faction, exclude).is_some()
}

fn is_target(
    e: Entity,
    pos: &Pos,
    faction: Faction,
    vitals: &Vitals,
    center: Vec2<f32>,
    radius: f32,
    caster_faction: Faction,
    exclude: Option<Entity>,
) -> bool {
    Some(e) != exclude
        && caster_faction.opposes(faction)
        && vitals.is_alive()
        && (pos.0 - center).magnitude_squared() <= radius * radius
}
