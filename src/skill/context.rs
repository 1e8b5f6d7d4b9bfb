use specs::{
    shred::{ResourceId, World},
    Entities, Entity, Read, ReadStorage, SystemData, Write, WriteStorage,
};
use vek::Vec2;

use crate::comp::*;
use crate::config::SkillTuning;

/// 技能執行所需的世界資料
///
/// 執行器、延遲效果、投射物都透過這份 SystemData 讀寫角色，
/// 同一 tick 內的存取全部序列化。
#[derive(SystemData)]
pub struct SkillContext<'a> {
    pub entities: Entities<'a>,
    pub time: Read<'a, Time>,
    pub tuning: Read<'a, SkillTuning>,
    pub positions: ReadStorage<'a, Pos>,
    pub factions: ReadStorage<'a, Faction>,
    pub vitals: WriteStorage<'a, Vitals>,
    pub projectiles: WriteStorage<'a, Projectile>,
    pub pending: Write<'a, PendingEffects>,
    pub rng: Write<'a, SkillRng>,
}

impl<'a> SkillContext<'a> {
    pub fn now(&self) -> f64 {
        self.time.0
    }

    pub fn position(&self, e: Entity) -> Option<Vec2<f32>> {
        self.positions.get(e).map(|p| p.0)
    }

    pub fn faction(&self, e: Entity) -> Option<Faction> {
        self.factions.get(e).copied()
    }

    /// 實體存在且生命大於 0
    pub fn is_alive(&self, e: Entity) -> bool {
        self.entities.is_alive(e) && self.vitals.get(e).map_or(false, |v| v.is_alive())
    }
}
