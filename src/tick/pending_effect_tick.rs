use specs::System;

use crate::skill::executors::apply_pending;
use crate::skill::SkillContext;

/// 觸發到期的延遲效果（近戰命中、範圍爆炸、輔助治療）
#[derive(Default)]
pub struct Sys;

impl<'a> System<'a> for Sys {
    type SystemData = SkillContext<'a>;

    fn run(&mut self, mut ctx: Self::SystemData) {
        let now = ctx.now();
        let due = ctx.pending.drain_due(now);
        if due.is_empty() {
            return;
        }
        log::trace!("{:.3}s 觸發 {} 個延遲效果", now, due.len());
        for effect in due {
            apply_pending(&mut ctx, effect);
        }
    }
}
