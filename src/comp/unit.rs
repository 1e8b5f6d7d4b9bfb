use serde::{Deserialize, Serialize};
use specs::storage::VecStorage;
use specs::Component;

/// 陣營組件 - 技能只影響敵對陣營
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum Faction {
    Player, // 玩家陣營
    Enemy,  // 敵對陣營
}

impl Faction {
    pub fn is_player(&self) -> bool {
        *self == Faction::Player
    }

    pub fn opposes(&self, other: Faction) -> bool {
        *self != other
    }
}

impl Component for Faction {
    type Storage = VecStorage<Self>;
}

/// 資源池（生命、法力）
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Pool {
    pub current: f32,
    pub max: f32,
    pub regen: f32, // 每秒回復
}

impl Pool {
    /// 滿值資源池
    pub fn new(max: f32, regen: f32) -> Self {
        Pool { current: max, max, regen }
    }

    pub fn with_current(mut self, current: f32) -> Self {
        self.current = current.clamp(0.0, self.max);
        self
    }

    /// 增加數值（不超過上限），回傳實際增加量
    pub fn add(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// 扣除數值（不低於 0），回傳實際扣除量
    pub fn sub(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }
}

/// 生命與法力
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Vitals {
    pub health: Pool,
    pub mana: Pool,
}

/// 受到傷害的結果
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DamageTaken {
    pub applied: f32,
    pub died: bool,
}

impl Component for Vitals {
    type Storage = VecStorage<Self>;
}

impl Vitals {
    pub fn new(health: Pool, mana: Pool) -> Self {
        Vitals { health, mana }
    }

    pub fn is_alive(&self) -> bool {
        self.health.current > 0.0
    }

    /// 受到傷害，生命歸零的那一次 `died` 為 true
    pub fn take_damage(&mut self, amount: f32) -> DamageTaken {
        let was_alive = self.is_alive();
        let applied = self.health.sub(amount);
        DamageTaken {
            applied,
            died: was_alive && !self.is_alive(),
        }
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() {
            return 0.0;
        }
        self.health.add(amount)
    }

    pub fn has_mana(&self, cost: f32) -> bool {
        self.mana.current >= cost
    }

    /// 法力足夠才扣除
    pub fn spend_mana(&mut self, cost: f32) -> bool {
        if !self.has_mana(cost) {
            return false;
        }
        self.mana.current -= cost;
        true
    }

    /// 自然回復，死亡單位不回復
    pub fn regen(&mut self, dt: f32) {
        if !self.is_alive() {
            return;
        }
        self.health.add(self.health.regen * dt);
        self.mana.add(self.mana.regen * dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_reports_death_once() {
        let mut v = Vitals::new(Pool::new(30.0, 0.0), Pool::new(10.0, 0.0));
        assert!(!v.take_damage(20.0).died);
        let hit = v.take_damage(20.0);
        assert!(hit.died);
        assert_eq!(hit.applied, 10.0);
        assert!(!v.take_damage(5.0).died);
        assert_eq!(v.health.current, 0.0);
    }

    #[test]
    fn test_heal_clamps_to_max() {
        let mut v = Vitals::new(Pool::new(100.0, 0.0).with_current(90.0), Pool::default());
        assert_eq!(v.heal(20.0), 10.0);
        assert_eq!(v.health.current, 100.0);
    }

    #[test]
    fn test_spend_mana_requires_full_cost() {
        let mut v = Vitals::new(Pool::new(100.0, 0.0), Pool::new(50.0, 0.0).with_current(10.0));
        assert!(!v.spend_mana(15.0));
        assert_eq!(v.mana.current, 10.0);
        assert!(v.spend_mana(10.0));
        assert_eq!(v.mana.current, 0.0);
    }

    #[test]
    fn test_regen_skips_dead() {
        let mut v = Vitals::new(Pool::new(100.0, 5.0).with_current(0.0), Pool::new(50.0, 5.0).with_current(0.0));
        v.regen(1.0);
        assert_eq!(v.health.current, 0.0);
        assert_eq!(v.mana.current, 0.0);
    }
}
