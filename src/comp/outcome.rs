use serde::{Deserialize, Serialize};
use specs::Entity as EcsEntity;
use vek::*;

/// 音效種類
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    Cast,
    Impact,
}

/// 引擎對外輸出的事件
///
/// 動畫、音效、特效由外部系統消費；傷害/治療/擊退/暈眩為已結算的結果通知。
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    AnimationTrigger {
        actor: EcsEntity,
        trigger: String,
    },
    SoundCue {
        actor: EcsEntity,
        clip: String,
        kind: SoundKind,
    },
    VisualEffect {
        pos: Vec2<f32>,
        dir: Vec2<f32>,
        color: [f32; 4],
        lifetime: f32,
        critical: bool,
    },
    Damage {
        source: EcsEntity,
        target: EcsEntity,
        amount: f32,
        critical: bool,
    },
    Heal {
        target: EcsEntity,
        amount: f32,
    },
    Knockback {
        target: EcsEntity,
        force: f32,
        dir: Vec2<f32>,
    },
    Stun {
        target: EcsEntity,
        duration: f32,
    },
    Death {
        pos: Vec2<f32>,
        ent: EcsEntity,
    },
    ProjectileSpawned {
        projectile: EcsEntity,
        owner: EcsEntity,
        pos: Vec2<f32>,
        dir: Vec2<f32>,
    },
    ProjectileExpired {
        projectile: EcsEntity,
        pos: Vec2<f32>,
        traveled: f32,
    },
    // 範圍指示器，預覽/按住期間每次更新
    Preview {
        actor: EcsEntity,
        slot: usize,
        center: Vec2<f32>,
        radius: f32,
    },
    PreviewEnded {
        actor: EcsEntity,
        slot: usize,
    },
    SlotUnlocked {
        actor: EcsEntity,
        slot: usize,
    },
}

impl Outcome {
    pub fn is_damage(&self) -> bool {
        matches!(self, Outcome::Damage { .. })
    }

    /// 位置是更新用的
    pub fn get_pos(&self) -> Option<Vec2<f32>> {
        match self {
            Outcome::VisualEffect { pos, .. }
            | Outcome::Death { pos, .. }
            | Outcome::ProjectileSpawned { pos, .. }
            | Outcome::ProjectileExpired { pos, .. } => Some(*pos),
            Outcome::Preview { center, .. } => Some(*center),
            _ => None,
        }
    }
}
