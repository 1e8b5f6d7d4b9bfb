/// 輔助執行器：短暫延遲後治療施法者自身

use std::sync::Arc;

use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::{apply_heal, begin_cast, delay_for, SkillExecutor};
use crate::comp::*;
use crate::skill::{EffectSink, SkillContext, SkillError};

pub struct SupportExecutor {
    def: Arc<SkillDefinition>,
    sink: Arc<dyn EffectSink>,
}

impl SupportExecutor {
    pub fn new(def: Arc<SkillDefinition>, sink: Arc<dyn EffectSink>) -> Self {
        Self { def, sink }
    }
}

impl SkillExecutor for SupportExecutor {
    fn definition(&self) -> &Arc<SkillDefinition> {
        &self.def
    }

    fn sink(&self) -> &Arc<dyn EffectSink> {
        &self.sink
    }

    fn execute(
        &self,
        caster: Entity,
        _target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError> {
        let faction = ctx.faction(caster).ok_or(SkillError::CasterUnavailable)?;
        begin_cast(ctx, self.sink.as_ref(), caster, &self.def);

        let due = ctx.now() + delay_for(&self.def, ctx.tuning.support_delay) as f64;
        ctx.pending.push(PendingEffect {
            due,
            caster,
            caster_faction: faction,
            skill: self.def.clone(),
            sink: self.sink.clone(),
            kind: PendingEffectKind::SupportPulse,
        });
        Ok(())
    }
}

pub(crate) fn pulse(ctx: &mut SkillContext, effect: &PendingEffect) {
    if !ctx.is_alive(effect.caster) {
        return;
    }
    let healed = apply_heal(ctx, effect.sink.as_ref(), effect.caster, &effect.skill);
    log::debug!("{:?} 的 {} 回復 {}", effect.caster, effect.skill.id(), healed);
}
