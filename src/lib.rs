/// Skill Engine Library
///
/// 即時戰鬥技能引擎：技能欄位、冷卻、各原型執行策略、
/// 陣營目標查詢與 預覽 → 按住 → 放開 輸入流程

pub mod comp;
pub mod config;
pub mod persist;
pub mod skill;
pub mod state;
pub mod tick;

// Re-export commonly used types
pub use crate::comp::*;
pub use crate::config::{EngineConfig, SkillTuning};
pub use crate::persist::SaveData;
pub use crate::skill::{
    EffectSink, Hotkey, InputPhase, RecordingSink, SkillError, SkillManager, SkillSlot,
};
pub use crate::state::State;
pub use skill_system::{SkillArchetype, SkillDatabase, SkillDefinition, SkillDefinitionData};
