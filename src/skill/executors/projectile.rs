/// 投射物執行器
///
/// 朝修正後瞄準點的方向生成一個獨立飛行的實體，之後由 projectile tick 推進。
/// 實體每 tick 檢查碰撞半徑，第一個命中的敵對單位受到傷害後消失；
/// 飛完射程或存活時間 (range / speed) 用盡則無效果消失。

use std::sync::Arc;

use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::{apply_hit, begin_cast, HitOptions, KnockbackFallback, SkillExecutor};
use crate::comp::*;
use crate::skill::{target, EffectSink, SkillContext, SkillError};

pub struct ProjectileExecutor {
    def: Arc<SkillDefinition>,
    sink: Arc<dyn EffectSink>,
}

impl ProjectileExecutor {
    pub fn new(def: Arc<SkillDefinition>, sink: Arc<dyn EffectSink>) -> Self {
        Self { def, sink }
    }
}

impl SkillExecutor for ProjectileExecutor {
    fn definition(&self) -> &Arc<SkillDefinition> {
        &self.def
    }

    fn sink(&self) -> &Arc<dyn EffectSink> {
        &self.sink
    }

    fn threat_reach(&self) -> Option<f32> {
        Some(self.def.range())
    }

    fn execute(
        &self,
        caster: Entity,
        target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError> {
        let faction = ctx.faction(caster).ok_or(SkillError::CasterUnavailable)?;
        let origin = ctx.position(caster).ok_or(SkillError::CasterUnavailable)?;
        let aim = target::resolve_target_point(origin, &self.def, target_point);
        // 瞄準自己時朝正前方 (+y) 發射
        let dir = try_normalized(aim - origin).unwrap_or_else(Vec2::unit_y);
        begin_cast(ctx, self.sink.as_ref(), caster, &self.def);

        let projectile = ctx.entities.create();
        let inserted = ctx.projectiles.insert(
            projectile,
            Projectile {
                owner: caster,
                owner_faction: faction,
                skill: self.def.clone(),
                sink: self.sink.clone(),
                pos: origin,
                dir,
                traveled: 0.0,
                time_left: self.def.projectile_lifetime(),
                hit_radius: ctx.tuning.projectile_hit_radius,
            },
        );
        if let Err(e) = inserted {
            log::warn!("無法生成投射物 {}: {}", self.def.id(), e);
            return Ok(());
        }

        self.sink.emit(Outcome::ProjectileSpawned {
            projectile,
            owner: caster,
            pos: origin,
            dir,
        });
        self.sink
            .request_effect(origin, dir, self.def.color(), self.def.projectile_lifetime(), false);
        Ok(())
    }
}

/// 推進單一投射物，命中或結束時回傳 true（呼叫端負責刪除實體）
pub(crate) fn advance(ctx: &mut SkillContext, projectile: Entity, dt: f32) -> bool {
    let (step, owner, faction, radius) = match ctx.projectiles.get_mut(projectile) {
        Some(p) => (p.advance(dt), p.owner, p.owner_faction, p.hit_radius),
        None => return false,
    };

    if let Some(hit) = target::first_target_in_radius(ctx, step.pos, radius, faction, Some(owner)) {
        if let Some(p) = ctx.projectiles.remove(projectile) {
            apply_hit(
                ctx,
                p.sink.as_ref(),
                p.owner,
                hit,
                &p.skill,
                HitOptions {
                    knockback: Some((step.pos, KnockbackFallback::Direction(p.dir))),
                    stun: false,
                },
            );
        }
        return true;
    }

    if step.expired {
        if let Some(p) = ctx.projectiles.remove(projectile) {
            log::debug!("投射物 {} 飛行 {:.2} 後消失", p.skill.id(), step.traveled);
            p.sink.emit(Outcome::ProjectileExpired {
                projectile,
                pos: step.pos,
                traveled: step.traveled,
            });
        }
        return true;
    }
    false
}
