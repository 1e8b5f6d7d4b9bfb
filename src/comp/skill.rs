use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::Faction;
use crate::skill::EffectSink;

/// 按鍵階段
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyPhase {
    Down,
    Held,
    Up,
}

/// 技能輸入 - 每 tick 由輸入層或 AI 送入
///
/// `aim` 為當下的瞄準點（玩家為游標投影到世界的位置）。
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillInput {
    pub slot: usize,
    pub phase: KeyPhase,
    pub aim: Vec2<f32>,
}

impl SkillInput {
    pub fn new(slot: usize, phase: KeyPhase, aim: Vec2<f32>) -> Self {
        SkillInput { slot, phase, aim }
    }
}

/// 待處理的技能輸入（由 input tick 消化）
#[derive(Default)]
pub struct SkillInputQueue(pub Vec<(Entity, SkillInput)>);

/// 延遲生效的效果種類
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PendingEffectKind {
    MeleeStrike,                       // 生效當下以施法者位置判定
    AreaBlast { center: Vec2<f32> },   // 施放時已決定中心
    SupportPulse,
}

/// 延遲生效的技能效果
pub struct PendingEffect {
    pub due: f64,
    pub caster: Entity,
    pub caster_faction: Faction,
    pub skill: Arc<SkillDefinition>,
    pub sink: Arc<dyn EffectSink>,
    pub kind: PendingEffectKind,
}

/// 延遲效果佇列，依虛擬時間觸發
#[derive(Default)]
pub struct PendingEffects {
    queue: Vec<PendingEffect>,
}

impl PendingEffects {
    pub fn push(&mut self, effect: PendingEffect) {
        self.queue.push(effect);
    }

    /// 取出所有到期的效果，維持排程順序
    pub fn drain_due(&mut self, now: f64) -> Vec<PendingEffect> {
        let (due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.queue)
            .into_iter()
            .partition(|e| e.due <= now);
        self.queue = rest;
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
