use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// 預設設定檔
pub const CONFIG_FILE: &str = "skill_engine.toml";

/// 各原型延遲生效時間與投射物碰撞半徑
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SkillTuning {
    pub melee_delay: f32,
    pub area_delay: f32,
    pub support_delay: f32,
    pub projectile_hit_radius: f32,
    /// 單一 tick 最大時間步長，避免卡頓後一次跳過整段延遲
    pub max_delta_time: f32,
}

impl Default for SkillTuning {
    fn default() -> Self {
        Self {
            melee_delay: 0.25,
            area_delay: 0.6,
            support_delay: 0.3,
            projectile_hit_radius: 0.5,
            max_delta_time: 0.25,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// 每秒 tick 數
    pub tps: u32,
    pub max_slots: usize,
    pub levels_per_slot: u32,
    pub skills_path: String,
    pub save_path: String,
    /// 固定亂數種子（重播/測試用），None 時每次隨機
    pub rng_seed: Option<u64>,
    pub tuning: SkillTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 30,
            max_slots: 4,
            levels_per_slot: 2,
            skills_path: "skills.yaml".to_string(),
            save_path: "save.json".to_string(),
            rng_seed: None,
            tuning: SkillTuning::default(),
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(1..=10).contains(&self.max_slots) {
            anyhow::bail!("max_slots 必須在 1 到 10 之間: {}", self.max_slots);
        }
        if self.levels_per_slot == 0 {
            anyhow::bail!("levels_per_slot 必須大於 0");
        }
        if self.tps == 0 {
            anyhow::bail!("tps 必須大於 0");
        }
        let t = &self.tuning;
        for (name, value) in [
            ("melee_delay", t.melee_delay),
            ("area_delay", t.area_delay),
            ("support_delay", t.support_delay),
            ("projectile_hit_radius", t.projectile_hit_radius),
        ] {
            if !(value >= 0.0) {
                anyhow::bail!("{} 不可為負: {}", name, value);
            }
        }
        if !(t.max_delta_time > 0.0) {
            anyhow::bail!("max_delta_time 必須大於 0");
        }
        Ok(())
    }

    /// 每 tick 秒數
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tps as f32
    }
}

fn load_or_default() -> EngineConfig {
    match EngineConfig::load(CONFIG_FILE) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("無法讀取 {}，使用預設設定: {}", CONFIG_FILE, e);
            EngineConfig::default()
        }
    }
}

lazy_static! {
    pub static ref CONFIG: EngineConfig = load_or_default();
}
