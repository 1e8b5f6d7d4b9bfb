/// 近戰執行器
///
/// 以施法者自身位置為目標，短暫延遲後對射程內所有敵對單位結算。
/// 判定使用生效當下施法者的位置。

use std::sync::Arc;

use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::{apply_hit, begin_cast, delay_for, HitOptions, KnockbackFallback, SkillExecutor};
use crate::comp::*;
use crate::skill::{target, EffectSink, SkillContext, SkillError};

pub struct MeleeExecutor {
    def: Arc<SkillDefinition>,
    sink: Arc<dyn EffectSink>,
}

impl MeleeExecutor {
    pub fn new(def: Arc<SkillDefinition>, sink: Arc<dyn EffectSink>) -> Self {
        Self { def, sink }
    }
}

impl SkillExecutor for MeleeExecutor {
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
        _target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError> {
        let faction = ctx.faction(caster).ok_or(SkillError::CasterUnavailable)?;
        begin_cast(ctx, self.sink.as_ref(), caster, &self.def);

        let due = ctx.now() + delay_for(&self.def, ctx.tuning.melee_delay) as f64;
        ctx.pending.push(PendingEffect {
            due,
            caster,
            caster_faction: faction,
            skill: self.def.clone(),
            sink: self.sink.clone(),
            kind: PendingEffectKind::MeleeStrike,
        });
        log::debug!("{:?} 施放近戰 {}，{:.2} 秒後命中", caster, self.def.id(), due - ctx.now());
        Ok(())
    }
}

/// 近戰命中判定
pub(crate) fn strike(ctx: &mut SkillContext, effect: &PendingEffect) {
    if !ctx.is_alive(effect.caster) {
        log::debug!("{:?} 已不存在，取消 {} 的命中判定", effect.caster, effect.skill.id());
        return;
    }
    let center = match ctx.position(effect.caster) {
        Some(p) => p,
        None => return,
    };
    let def = effect.skill.as_ref();
    effect
        .sink
        .request_effect(center, Vec2::zero(), def.color(), 0.3, false);

    let targets = target::find_targets_in_radius(
        ctx,
        center,
        def.range(),
        effect.caster_faction,
        Some(effect.caster),
    );
    for t in targets {
        apply_hit(
            ctx,
            effect.sink.as_ref(),
            effect.caster,
            t,
            def,
            HitOptions {
                knockback: Some((center, KnockbackFallback::Random)),
                stun: true,
            },
        );
    }
}
