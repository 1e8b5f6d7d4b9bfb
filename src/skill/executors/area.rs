/// 範圍執行器
///
/// 瞄準點經射程修正後作為爆炸中心，中等延遲後對半徑內敵對單位結算。
/// 中心在施放時決定，之後與施法者位置無關。

use std::sync::Arc;

use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::{apply_hit, begin_cast, delay_for, HitOptions, SkillExecutor};
use crate::comp::*;
use crate::skill::{target, EffectSink, SkillContext, SkillError};

pub struct AreaExecutor {
    def: Arc<SkillDefinition>,
    sink: Arc<dyn EffectSink>,
}

impl AreaExecutor {
    pub fn new(def: Arc<SkillDefinition>, sink: Arc<dyn EffectSink>) -> Self {
        Self { def, sink }
    }
}

impl SkillExecutor for AreaExecutor {
    fn definition(&self) -> &Arc<SkillDefinition> {
        &self.def
    }

    fn sink(&self) -> &Arc<dyn EffectSink> {
        &self.sink
    }

    fn threat_reach(&self) -> Option<f32> {
        Some(self.def.range() + self.def.area_radius())
    }

    fn execute(
        &self,
        caster: Entity,
        target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError> {
        let faction = ctx.faction(caster).ok_or(SkillError::CasterUnavailable)?;
        let caster_pos = ctx.position(caster).ok_or(SkillError::CasterUnavailable)?;
        let center = target::resolve_target_point(caster_pos, &self.def, target_point);
        begin_cast(ctx, self.sink.as_ref(), caster, &self.def);

        let delay = delay_for(&self.def, ctx.tuning.area_delay);
        // 落點預警
        self.sink
            .request_effect(center, Vec2::zero(), self.def.color(), delay, false);
        let due = ctx.now() + delay as f64;
        ctx.pending.push(PendingEffect {
            due,
            caster,
            caster_faction: faction,
            skill: self.def.clone(),
            sink: self.sink.clone(),
            kind: PendingEffectKind::AreaBlast { center },
        });
        Ok(())
    }
}

/// 範圍爆炸，施法者死亡也照常結算
pub(crate) fn detonate(ctx: &mut SkillContext, effect: &PendingEffect, center: Vec2<f32>) {
    let def = effect.skill.as_ref();
    effect
        .sink
        .request_effect(center, Vec2::zero(), def.color(), 0.6, false);

    let targets = target::find_targets_in_radius(
        ctx,
        center,
        def.area_radius(),
        effect.caster_faction,
        Some(effect.caster),
    );
    log::debug!("{} 於 {:?} 爆炸，命中 {} 個目標", def.id(), center, targets.len());
    for t in targets {
        apply_hit(
            ctx,
            effect.sink.as_ref(),
            effect.caster,
            t,
            def,
            HitOptions {
                knockback: None,
                stun: true,
            },
        );
    }
}
