use std::sync::Arc;

use skill_system::SkillDefinition;
use specs::{Component, DenseVecStorage};
use specs::Entity as EcsEntity;
use vek::Vec2;

use super::Faction;
use crate::skill::EffectSink;

/// 飛行中的投射物 - 每個實體各自保有飛行狀態
pub struct Projectile {
    pub owner: EcsEntity,
    pub owner_faction: Faction,
    pub skill: Arc<SkillDefinition>,
    pub sink: Arc<dyn EffectSink>,
    pub pos: Vec2<f32>,
    // 單位向量
    pub dir: Vec2<f32>,
    pub traveled: f32,
    pub time_left: f32,
    pub hit_radius: f32,
}

/// 單次推進後的快照
#[derive(Copy, Clone, Debug)]
pub struct ProjectileStep {
    pub pos: Vec2<f32>,
    pub traveled: f32,
    pub expired: bool,
}

impl Component for Projectile {
    type Storage = DenseVecStorage<Self>;
}

impl Projectile {
    /// 推進 dt 秒，不會超過技能射程
    pub fn advance(&mut self, dt: f32) -> ProjectileStep {
        let range = self.skill.range();
        let step = (self.skill.speed() * dt).min((range - self.traveled).max(0.0));
        self.pos += self.dir * step;
        self.traveled += step;
        self.time_left -= dt;

        ProjectileStep {
            pos: self.pos,
            traveled: self.traveled,
            expired: self.traveled >= range - 1e-4 || self.time_left <= 0.0,
        }
    }
}
