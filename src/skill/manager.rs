/// 技能管理器
///
/// 一個角色一個，擁有固定數量的技能欄位，負責：
/// - 依等級解鎖欄位
/// - 預覽 → 按住 → 放開 的輸入流程（同時只允許一個欄位進行中）
/// - 熱鍵配置與衝突處理
/// - AI 直接施放的入口

use std::sync::Arc;

use skill_system::{SkillArchetype, SkillDatabase, SkillDefinition};
use specs::{Component, Entity, HashMapStorage};
use vek::Vec2;

use super::slot::{default_hotkey, Hotkey, SkillSlot};
use super::{target, EffectSink, SkillContext, SkillError};
use crate::comp::{KeyPhase, Outcome, SkillInput};

/// 輸入流程階段
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputPhase {
    #[default]
    Idle,
    Previewing,
    Holding,
}

pub struct SkillManager {
    owner: Entity,
    slots: Vec<SkillSlot>,
    levels_per_slot: u32,
    level: u32,
    legacy_hotkeys: bool,
    phase: InputPhase,
    active_preview_slot: Option<usize>,
    current_aim: Vec2<f32>,
    sink: Arc<dyn EffectSink>,
}

impl Component for SkillManager {
    type Storage = HashMapStorage<Self>;
}

/// 已解鎖欄位數 = min(level / levels_per_slot + 1, max_slots)
pub fn unlocked_count(level: u32, levels_per_slot: u32, max_slots: usize) -> usize {
    let per = levels_per_slot.max(1);
    ((level / per) as usize + 1).min(max_slots)
}

impl SkillManager {
    /// 建立管理器，起始等級 1
    pub fn new(
        owner: Entity,
        slot_count: usize,
        levels_per_slot: u32,
        legacy_hotkeys: bool,
        sink: Arc<dyn EffectSink>,
    ) -> Self {
        let slots = (0..slot_count)
            .map(|i| SkillSlot::new(i, default_hotkey(i, legacy_hotkeys)))
            .collect();
        let mut manager = Self {
            owner,
            slots,
            levels_per_slot: levels_per_slot.max(1),
            level: 0,
            legacy_hotkeys,
            phase: InputPhase::Idle,
            active_preview_slot: None,
            current_aim: Vec2::zero(),
            sink,
        };
        manager.set_level(1);
        manager
    }

    pub fn owner(&self) -> Entity {
        self.owner
    }

    pub fn slots(&self) -> &[SkillSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&SkillSlot> {
        self.slots.get(index)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> InputPhase {
        self.phase
    }

    pub fn active_preview_slot(&self) -> Option<usize> {
        self.active_preview_slot
    }

    /// 最近一次修正後的瞄準點
    pub fn current_aim(&self) -> Vec2<f32> {
        self.current_aim
    }

    pub fn legacy_hotkeys(&self) -> bool {
        self.legacy_hotkeys
    }

    /// 設定等級並解鎖對應欄位，回傳這次新解鎖的欄位
    ///
    /// 等級下降不會重新鎖住欄位。
    pub fn set_level(&mut self, level: u32) -> Vec<usize> {
        self.level = level;
        let count = unlocked_count(level, self.levels_per_slot, self.slots.len());
        let mut unlocked = Vec::new();
        for slot in self.slots.iter_mut().take(count) {
            if slot.unlock() {
                unlocked.push(slot.index());
            }
        }
        for &slot in &unlocked {
            log::info!("{:?} 等級 {} 解鎖欄位 {}", self.owner, level, slot);
            self.sink.emit(Outcome::SlotUnlocked {
                actor: self.owner,
                slot,
            });
        }
        unlocked
    }

    /// 以目前等級裝備技能，拒絕時記錄 debug
    pub fn equip(&mut self, index: usize, def: Arc<SkillDefinition>) -> Result<(), SkillError> {
        let level = self.level;
        let sink = self.sink.clone();
        let owner = self.owner;
        let id = def.id().to_string();
        self.slots
            .get_mut(index)
            .ok_or(SkillError::InvalidSlotIndex(index))
            .and_then(|slot| slot.equip_skill(def, level, sink))
            .inspect_err(|e| log::debug!("{:?} 欄位 {} 拒絕裝備 {}: {}", owner, index, id, e))?;
        if self.active_preview_slot == Some(index) {
            self.end_preview();
        }
        Ok(())
    }

    pub fn unequip(&mut self, index: usize) -> Option<Arc<SkillDefinition>> {
        let removed = self.slots.get_mut(index)?.unequip_skill();
        if self.active_preview_slot == Some(index) {
            self.end_preview();
        }
        removed
    }

    /// 每 tick 更新所有欄位冷卻
    pub fn update_cooldowns(&mut self, now: f64) {
        for slot in self.slots.iter_mut() {
            slot.update_cooldown(now);
        }
    }

    /// 處理一次按鍵事件，回傳是否真的施放了技能
    ///
    /// 瞬發技能在按下時直接施放，不進入預覽；
    /// 其他技能按下進入預覽，按住持續更新瞄準點，放開時一定施放。
    /// 有欄位進行中時，其他欄位的事件一律忽略。
    pub fn handle_input(&mut self, input: SkillInput, ctx: &mut SkillContext) -> bool {
        let index = input.slot;
        if index >= self.slots.len() {
            log::debug!("{:?} 忽略不存在的欄位 {}", self.owner, index);
            return false;
        }
        if let Some(active) = self.active_preview_slot {
            if active != index {
                log::trace!("欄位 {} 進行中，忽略欄位 {} 的 {:?}", active, index, input.phase);
                return false;
            }
        }

        let skill = match self.slots[index].skill() {
            Some(s) if self.slots[index].is_unlocked() => s.clone(),
            _ => {
                if input.phase == KeyPhase::Down {
                    log::debug!("{:?} 欄位 {} 未解鎖或沒有技能", self.owner, index);
                }
                return false;
            }
        };

        if !skill.archetype().has_preview() {
            if input.phase != KeyPhase::Down {
                return false;
            }
            let owner = self.owner;
            return self.slots[index].try_execute(owner, input.aim, ctx);
        }

        match (self.phase, input.phase) {
            (InputPhase::Idle, KeyPhase::Down) => {
                self.active_preview_slot = Some(index);
                self.phase = InputPhase::Previewing;
                self.update_preview(&skill, input.aim, ctx);
                false
            }
            (InputPhase::Idle, _) => false,
            (_, KeyPhase::Down) | (_, KeyPhase::Held) => {
                self.phase = InputPhase::Holding;
                self.update_preview(&skill, input.aim, ctx);
                false
            }
            (_, KeyPhase::Up) => {
                self.update_preview(&skill, input.aim, ctx);
                let owner = self.owner;
                let aim = self.current_aim;
                let executed = self.slots[index].try_execute(owner, aim, ctx);
                self.end_preview();
                executed
            }
        }
    }

    /// 以熱鍵處理按鍵事件
    pub fn handle_key(
        &mut self,
        key: Hotkey,
        phase: KeyPhase,
        aim: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> bool {
        match self.slot_for_key(key) {
            Some(index) => self.handle_input(SkillInput::new(index, phase, aim), ctx),
            None => false,
        }
    }

    /// AI 入口：略過預覽流程直接施放
    pub fn request_cast(
        &mut self,
        index: usize,
        target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError> {
        let owner = self.owner;
        self.slots
            .get_mut(index)
            .ok_or(SkillError::InvalidSlotIndex(index))
            .and_then(|slot| slot.execute_checked(owner, target_point, ctx))
            .inspect_err(|e| log::debug!("{:?} 欄位 {} 拒絕施放: {}", owner, index, e))
    }

    pub fn slot_for_key(&self, key: Hotkey) -> Option<usize> {
        let key = key.normalized();
        self.slots.iter().position(|s| s.hotkey() == Some(key))
    }

    /// 把技能綁到指定按鍵
    ///
    /// 按鍵已屬於欄位 B 時：技能已裝備在欄位 A 則 A、B 交換按鍵，
    /// 否則把技能裝備到 B。按鍵未被使用時只替已裝備該技能的欄位改鍵。
    pub fn bind_skill_to_key(&mut self, def: &Arc<SkillDefinition>, key: Hotkey) -> bool {
        let key = key.normalized();
        let source = self
            .slots
            .iter()
            .position(|s| s.skill().map_or(false, |d| d.id() == def.id()));
        let bound = self.slot_for_key(key);

        match (bound, source) {
            (Some(b), Some(a)) if a == b => true,
            (Some(b), Some(a)) => {
                let previous = self.slots[a].hotkey();
                self.slots[a].update_hotkey(Some(key));
                self.slots[b].update_hotkey(previous);
                log::debug!("欄位 {} 與 {} 交換按鍵", a, b);
                true
            }
            (Some(b), None) => self.equip(b, def.clone()).is_ok(),
            (None, Some(a)) => {
                self.slots[a].update_hotkey(Some(key));
                true
            }
            (None, None) => false,
        }
    }

    /// 切換新舊熱鍵配置，所有欄位回到該配置的預設按鍵
    pub fn use_legacy_hotkeys(&mut self, enabled: bool) {
        self.legacy_hotkeys = enabled;
        for slot in self.slots.iter_mut() {
            let key = default_hotkey(slot.index(), enabled);
            slot.update_hotkey(key);
        }
    }

    /// 每個欄位裝備技能在資料庫中的索引，空欄位為 -1
    pub fn equipped_skill_indices(&self, db: &SkillDatabase) -> Vec<i32> {
        self.slots
            .iter()
            .map(|slot| {
                slot.skill()
                    .and_then(|s| db.index_of(s))
                    .map_or(-1, |i| i as i32)
            })
            .collect()
    }

    fn update_preview(&mut self, skill: &SkillDefinition, raw_aim: Vec2<f32>, ctx: &SkillContext) {
        let caster = ctx.position(self.owner).unwrap_or(raw_aim);
        self.current_aim = target::resolve_target_point(caster, skill, raw_aim);
        let (center, radius) = match skill.archetype() {
            SkillArchetype::Area => (self.current_aim, skill.area_radius()),
            _ => (caster, skill.range()),
        };
        if let Some(slot) = self.active_preview_slot {
            self.sink.emit(Outcome::Preview {
                actor: self.owner,
                slot,
                center,
                radius,
            });
        }
    }

    fn end_preview(&mut self) {
        if let Some(slot) = self.active_preview_slot.take() {
            self.sink.emit(Outcome::PreviewEnded {
                actor: self.owner,
                slot,
            });
        }
        self.phase = InputPhase::Idle;
    }
}
