/// 引擎核心狀態

use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use skill_system::{SkillDatabase, SkillDefinition};
use specs::{Builder, Entity, Join, World, WorldExt};
use vek::Vec2;

use super::{StateInitializer, SystemDispatcher, TimeManager};
use crate::comp::*;
use crate::config::EngineConfig;
use crate::persist::SaveData;
use crate::skill::{ChannelSink, EffectSink, Hotkey, SkillContext, SkillError, SkillManager};

/// 技能引擎狀態
///
/// 擁有 ECS 世界與系統排程；技能事件經由注入的 [`EffectSink`] 送出，
/// 預設為 channel，以 [`State::drain_outcomes`] 取出。
pub struct State {
    /// ECS 世界
    ecs: World,
    /// 時間管理器
    time_manager: TimeManager,
    /// 系統分派器
    system_dispatcher: SystemDispatcher,
    database: SkillDatabase,
    config: EngineConfig,
    sink: Arc<dyn EffectSink>,
    outcomes: Option<Receiver<Outcome>>,
}

impl State {
    /// 建立狀態，事件送進內部 channel
    pub fn new(config: EngineConfig, database: SkillDatabase) -> Self {
        let (tx, rx) = unbounded();
        let mut state = Self::with_sink(config, database, Arc::new(ChannelSink::new(tx)));
        state.outcomes = Some(rx);
        state
    }

    /// 使用自訂事件輸出建立狀態
    pub fn with_sink(
        config: EngineConfig,
        database: SkillDatabase,
        sink: Arc<dyn EffectSink>,
    ) -> Self {
        let mut ecs = StateInitializer::setup_ecs_world(&config);
        let system_dispatcher = SystemDispatcher::new(&mut ecs);
        log::info!(
            "技能引擎啟動：{} 個技能，{} 個欄位，每 {} 級解鎖一格",
            database.len(),
            config.max_slots,
            config.levels_per_slot
        );
        Self {
            ecs,
            time_manager: TimeManager::new(config.tuning.max_delta_time),
            system_dispatcher,
            database,
            config,
            sink,
            outcomes: None,
        }
    }

    /// 推進虛擬時間 dt 秒
    ///
    /// 超過單步上限時拆成數個子步驟，每步都跑一次全部系統。
    pub fn tick(&mut self, dt: f32) -> anyhow::Result<()> {
        for step in self.time_manager.sub_steps(dt)? {
            self.time_manager.update(&mut self.ecs, step)?;
            self.system_dispatcher.run_systems(&self.ecs);
            self.ecs.maintain();
        }
        Ok(())
    }

    /// 已執行的步驟數
    pub fn tick_count(&self) -> u64 {
        self.ecs.read_resource::<Tick>().0
    }

    /// 生成帶有技能管理器的角色
    pub fn spawn_actor(
        &mut self,
        pos: Vec2<f32>,
        faction: Faction,
        vitals: Vitals,
        level: u32,
    ) -> anyhow::Result<Entity> {
        let entity = self
            .ecs
            .create_entity()
            .with(Pos(pos))
            .with(faction)
            .with(vitals)
            .build();

        let mut manager = SkillManager::new(
            entity,
            self.config.max_slots,
            self.config.levels_per_slot,
            false,
            self.sink.clone(),
        );
        manager.set_level(level);
        self.ecs
            .write_storage::<SkillManager>()
            .insert(entity, manager)
            .map_err(|e| anyhow::anyhow!("無法加入技能管理器: {}", e))?;

        log::debug!("生成 {:?} {:?} 於 {:?}", faction, entity, pos);
        Ok(entity)
    }

    /// 立即處理一次技能輸入，回傳是否施放
    pub fn apply_input(&mut self, actor: Entity, input: SkillInput) -> bool {
        let mut ctx = self.ecs.system_data::<SkillContext>();
        let mut managers = self.ecs.write_storage::<SkillManager>();
        match managers.get_mut(actor) {
            Some(manager) => manager.handle_input(input, &mut ctx),
            None => false,
        }
    }

    /// 以熱鍵立即處理按鍵
    pub fn handle_key(&mut self, actor: Entity, key: Hotkey, phase: KeyPhase, aim: Vec2<f32>) -> bool {
        let mut ctx = self.ecs.system_data::<SkillContext>();
        let mut managers = self.ecs.write_storage::<SkillManager>();
        match managers.get_mut(actor) {
            Some(manager) => manager.handle_key(key, phase, aim, &mut ctx),
            None => false,
        }
    }

    /// 放進輸入佇列，下一個 tick 處理
    pub fn queue_input(&mut self, actor: Entity, input: SkillInput) {
        self.ecs
            .write_resource::<SkillInputQueue>()
            .0
            .push((actor, input));
    }

    /// AI 施放入口，略過預覽流程
    pub fn request_cast(
        &mut self,
        actor: Entity,
        slot: usize,
        target_point: Vec2<f32>,
    ) -> Result<(), SkillError> {
        let mut ctx = self.ecs.system_data::<SkillContext>();
        let mut managers = self.ecs.write_storage::<SkillManager>();
        match managers.get_mut(actor) {
            Some(manager) => manager.request_cast(slot, target_point, &mut ctx),
            None => {
                log::debug!("{:?} 沒有技能管理器，拒絕施放", actor);
                Err(SkillError::CasterUnavailable)
            }
        }
    }

    /// 存取角色的技能管理器
    pub fn with_manager<R>(
        &self,
        actor: Entity,
        f: impl FnOnce(&mut SkillManager) -> R,
    ) -> Option<R> {
        self.ecs.write_storage::<SkillManager>().get_mut(actor).map(f)
    }

    pub fn equip(
        &mut self,
        actor: Entity,
        slot: usize,
        def: Arc<SkillDefinition>,
    ) -> Result<(), SkillError> {
        self.with_manager(actor, |m| m.equip(slot, def))
            .unwrap_or_else(|| {
                log::debug!("{:?} 沒有技能管理器，拒絕裝備", actor);
                Err(SkillError::CasterUnavailable)
            })
    }

    /// 以技能 id 裝備
    pub fn equip_by_id(&mut self, actor: Entity, slot: usize, id: &str) -> anyhow::Result<()> {
        let def = self
            .database
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("未知的技能: {}", id))?;
        self.equip(actor, slot, def)?;
        Ok(())
    }

    pub fn unequip(&mut self, actor: Entity, slot: usize) -> Option<Arc<SkillDefinition>> {
        self.with_manager(actor, |m| m.unequip(slot)).flatten()
    }

    /// 設定等級並解鎖欄位，回傳新解鎖的欄位
    pub fn set_level(&mut self, actor: Entity, level: u32) -> Vec<usize> {
        self.with_manager(actor, |m| m.set_level(level))
            .unwrap_or_default()
    }

    /// 存檔
    pub fn save<P: AsRef<Path>>(&self, actor: Entity, path: P) -> anyhow::Result<()> {
        let data = self
            .with_manager(actor, |m| SaveData::capture(m, &self.database))
            .ok_or_else(|| anyhow::anyhow!("{:?} 沒有技能管理器", actor))?;
        data.save_to_file(path)
    }

    /// 讀檔並套用到角色
    pub fn load<P: AsRef<Path>>(&mut self, actor: Entity, path: P) -> anyhow::Result<()> {
        let data = SaveData::load_from_file(path)?;
        self.apply_save(actor, &data)
    }

    pub fn apply_save(&mut self, actor: Entity, data: &SaveData) -> anyhow::Result<()> {
        self.with_manager(actor, |m| data.apply(m, &self.database))
            .ok_or_else(|| anyhow::anyhow!("{:?} 沒有技能管理器", actor))?;
        Ok(())
    }

    /// 取出目前累積的事件（使用自訂輸出時永遠為空）
    pub fn drain_outcomes(&self) -> Vec<Outcome> {
        match &self.outcomes {
            Some(rx) => rx.try_iter().collect(),
            None => Vec::new(),
        }
    }

    /// 目前虛擬時間
    pub fn now(&self) -> f64 {
        self.ecs.read_resource::<Time>().0
    }

    pub fn vitals(&self, actor: Entity) -> Option<Vitals> {
        self.ecs.read_storage::<Vitals>().get(actor).copied()
    }

    pub fn set_vitals(&mut self, actor: Entity, vitals: Vitals) {
        if let Some(v) = self.ecs.write_storage::<Vitals>().get_mut(actor) {
            *v = vitals;
        }
    }

    pub fn position(&self, actor: Entity) -> Option<Vec2<f32>> {
        self.ecs.read_storage::<Pos>().get(actor).map(|p| p.0)
    }

    pub fn set_position(&mut self, actor: Entity, pos: Vec2<f32>) {
        if let Some(p) = self.ecs.write_storage::<Pos>().get_mut(actor) {
            p.0 = pos;
        }
    }

    /// 飛行中的投射物數量
    pub fn projectile_count(&self) -> usize {
        self.ecs.read_storage::<Projectile>().join().count()
    }

    pub fn pending_effect_count(&self) -> usize {
        self.ecs.read_resource::<PendingEffects>().len()
    }

    pub fn database(&self) -> &SkillDatabase {
        &self.database
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sink(&self) -> &Arc<dyn EffectSink> {
        &self.sink
    }

    pub fn ecs(&self) -> &World {
        &self.ecs
    }

    pub fn ecs_mut(&mut self) -> &mut World {
        &mut self.ecs
    }
}
