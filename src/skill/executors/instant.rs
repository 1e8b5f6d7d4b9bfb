/// 瞬發執行器：同步治療施法者，沒有預覽也沒有延遲

use std::sync::Arc;

use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::{apply_heal, begin_cast, SkillExecutor};
use crate::skill::{EffectSink, SkillContext, SkillError};

pub struct InstantExecutor {
    def: Arc<SkillDefinition>,
    sink: Arc<dyn EffectSink>,
}

impl InstantExecutor {
    pub fn new(def: Arc<SkillDefinition>, sink: Arc<dyn EffectSink>) -> Self {
        Self { def, sink }
    }
}

impl SkillExecutor for InstantExecutor {
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
        begin_cast(ctx, self.sink.as_ref(), caster, &self.def);
        apply_heal(ctx, self.sink.as_ref(), caster, &self.def);
        Ok(())
    }
}
