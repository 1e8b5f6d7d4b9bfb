/// 技能欄位
///
/// 擁有一組 (技能定義, 執行器)，兩者同時存在或同時為空，
/// 並記錄解鎖、冷卻與熱鍵狀態。

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skill_system::SkillDefinition;
use specs::Entity;
use vek::Vec2;

use super::executors::{create_executor, SkillExecutor};
use super::{EffectSink, SkillContext, SkillError};

/// 舊版數字列熱鍵
pub const LEGACY_HOTKEYS: &str = "1234567890";
/// 新版字母列熱鍵
pub const MODERN_HOTKEYS: &str = "QWERTYUIOP";

/// 欄位綁定的按鍵
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hotkey(pub char);

impl Hotkey {
    pub fn normalized(self) -> Hotkey {
        Hotkey(self.0.to_ascii_uppercase())
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 依欄位索引取得預設熱鍵，超出鍵盤列時回傳 None
pub fn default_hotkey(index: usize, legacy: bool) -> Option<Hotkey> {
    let row = if legacy { LEGACY_HOTKEYS } else { MODERN_HOTKEYS };
    row.chars().nth(index).map(Hotkey)
}

pub struct SkillSlot {
    index: usize,
    hotkey: Option<Hotkey>,
    unlocked: bool,
    equipped: Option<Box<dyn SkillExecutor>>,
    last_used: Option<f64>,
    on_cooldown: bool,
}

impl SkillSlot {
    pub fn new(index: usize, hotkey: Option<Hotkey>) -> Self {
        Self {
            index,
            hotkey,
            unlocked: false,
            equipped: None,
            last_used: None,
            on_cooldown: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn hotkey(&self) -> Option<Hotkey> {
        self.hotkey
    }

    /// 解鎖只會從 false 變 true
    pub fn unlock(&mut self) -> bool {
        let changed = !self.unlocked;
        self.unlocked = true;
        changed
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn skill(&self) -> Option<&Arc<SkillDefinition>> {
        self.equipped.as_ref().map(|e| e.definition())
    }

    pub fn executor(&self) -> Option<&dyn SkillExecutor> {
        self.equipped.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.equipped.is_none()
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.on_cooldown
    }

    pub fn last_used(&self) -> Option<f64> {
        self.last_used
    }

    /// 裝備技能
    ///
    /// 欄位鎖定或等級不足時失敗，原本的裝備不變。
    /// 成功時先卸下舊技能，再為新定義建立專屬執行器。
    pub fn equip_skill(
        &mut self,
        def: Arc<SkillDefinition>,
        caster_level: u32,
        sink: Arc<dyn EffectSink>,
    ) -> Result<(), SkillError> {
        if !self.unlocked {
            return Err(SkillError::SlotLocked);
        }
        if caster_level < def.required_level() {
            return Err(SkillError::BelowRequiredLevel {
                required: def.required_level(),
                current: caster_level,
            });
        }
        self.unequip_skill();
        log::debug!("欄位 {} 裝備 {}", self.index, def.id());
        self.equipped = Some(create_executor(def, sink));
        Ok(())
    }

    /// 卸下技能並重置冷卻
    pub fn unequip_skill(&mut self) -> Option<Arc<SkillDefinition>> {
        self.last_used = None;
        self.on_cooldown = false;
        self.equipped.take().map(|e| e.definition().clone())
    }

    /// 嘗試施放，任何拒絕都只記錄 debug 並回傳 false
    pub fn try_execute(&mut self, actor: Entity, target_point: Vec2<f32>, ctx: &mut SkillContext) -> bool {
        match self.execute_checked(actor, target_point, ctx) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("欄位 {} 拒絕施放: {}", self.index, e);
                false
            }
        }
    }

    /// 施放並回傳拒絕原因
    pub fn execute_checked(
        &mut self,
        actor: Entity,
        target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError> {
        let now = ctx.now();
        self.update_cooldown(now);
        if !self.unlocked {
            return Err(SkillError::SlotLocked);
        }
        let executor = self.equipped.as_ref().ok_or(SkillError::NoEquippedSkill)?;
        if self.on_cooldown {
            return Err(SkillError::OnCooldown);
        }
        executor.can_execute(actor, ctx)?;
        executor.execute(actor, target_point, ctx)?;

        if executor.cooldown() > 0.0 {
            self.last_used = Some(now);
            self.on_cooldown = true;
        }
        Ok(())
    }

    /// 每 tick 呼叫，冷卻時間到就解除
    pub fn update_cooldown(&mut self, now: f64) {
        if !self.on_cooldown {
            return;
        }
        let cooldown = self.skill().map_or(0.0, |s| s.cooldown()) as f64;
        match self.last_used {
            Some(t) if now - t < cooldown => {}
            _ => self.on_cooldown = false,
        }
    }

    /// 剩餘冷卻秒數，不會小於 0
    pub fn cooldown_remaining(&self, now: f64) -> f32 {
        if !self.on_cooldown {
            return 0.0;
        }
        match (self.last_used, self.skill()) {
            (Some(t), Some(skill)) => ((t + skill.cooldown() as f64 - now) as f32).max(0.0),
            _ => 0.0,
        }
    }

    /// 剩餘冷卻比例 (0..=1)，給 UI 畫冷卻遮罩
    pub fn cooldown_fraction(&self, now: f64) -> f32 {
        match self.skill() {
            Some(skill) if skill.cooldown() > 0.0 => {
                (self.cooldown_remaining(now) / skill.cooldown()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// 重新綁定按鍵，不檢查衝突
    pub fn update_hotkey(&mut self, key: Option<Hotkey>) {
        self.hotkey = key;
    }
}

impl fmt::Debug for SkillSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkillSlot")
            .field("index", &self.index)
            .field("hotkey", &self.hotkey)
            .field("unlocked", &self.unlocked)
            .field("skill", &self.skill().map(|s| s.id()))
            .field("on_cooldown", &self.on_cooldown)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::NullSink;
    use skill_system::{SkillArchetype, SkillDefinitionData};

    fn skill(required_level: u32) -> Arc<SkillDefinition> {
        Arc::new(
            SkillDefinition::new(SkillDefinitionData {
                id: "slam".to_string(),
                name: "Slam".to_string(),
                archetype: SkillArchetype::Melee,
                damage: 10.0,
                range: 2.0,
                cooldown: 3.0,
                required_level,
                ..Default::default()
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_default_hotkeys() {
        assert_eq!(default_hotkey(0, true), Some(Hotkey('1')));
        assert_eq!(default_hotkey(9, true), Some(Hotkey('0')));
        assert_eq!(default_hotkey(1, false), Some(Hotkey('W')));
        assert_eq!(default_hotkey(10, false), None);
    }

    #[test]
    fn test_equip_requires_unlock_and_level() {
        let mut slot = SkillSlot::new(0, default_hotkey(0, false));
        assert_eq!(
            slot.equip_skill(skill(1), 1, Arc::new(NullSink)),
            Err(SkillError::SlotLocked)
        );
        slot.unlock();
        assert!(matches!(
            slot.equip_skill(skill(5), 1, Arc::new(NullSink)),
            Err(SkillError::BelowRequiredLevel { required: 5, current: 1 })
        ));
        assert!(slot.is_empty());
        assert!(slot.equip_skill(skill(1), 1, Arc::new(NullSink)).is_ok());
        assert_eq!(slot.skill().unwrap().id(), "slam");
    }

    #[test]
    fn test_unequip_resets_cooldown() {
        let mut slot = SkillSlot::new(0, None);
        slot.unlock();
        slot.equip_skill(skill(1), 1, Arc::new(NullSink)).unwrap();
        slot.on_cooldown = true;
        slot.last_used = Some(1.0);
        assert_eq!(slot.unequip_skill().unwrap().id(), "slam");
        assert!(!slot.is_on_cooldown());
        assert_eq!(slot.cooldown_remaining(1.5), 0.0);
    }

    #[test]
    fn test_cooldown_bookkeeping() {
        let mut slot = SkillSlot::new(0, None);
        slot.unlock();
        slot.equip_skill(skill(1), 1, Arc::new(NullSink)).unwrap();
        slot.on_cooldown = true;
        slot.last_used = Some(10.0);

        assert!((slot.cooldown_remaining(11.0) - 2.0).abs() < 1e-6);
        assert!((slot.cooldown_fraction(11.5) - 0.5).abs() < 1e-6);
        slot.update_cooldown(12.9);
        assert!(slot.is_on_cooldown());
        slot.update_cooldown(13.0);
        assert!(!slot.is_on_cooldown());
        assert_eq!(slot.cooldown_remaining(20.0), 0.0);
    }
}
