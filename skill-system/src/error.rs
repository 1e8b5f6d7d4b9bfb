use thiserror::Error;

use crate::types::SkillArchetype;

/// 技能定義驗證錯誤
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("技能名稱不可為空 (id: {0})")]
    EmptyName(String),
    #[error("技能 {id} 的 {field} 必須是有限數值: {value}")]
    NotFinite {
        id: String,
        field: &'static str,
        value: f32,
    },
    #[error("技能 {id} 的 {field} 不可為負數: {value}")]
    Negative {
        id: String,
        field: &'static str,
        value: f32,
    },
    #[error("技能 {id} 的 {field} 必須大於 0: {value}")]
    NonPositive {
        id: String,
        field: &'static str,
        value: f32,
    },
    #[error("技能 {id} 的暴擊率必須介於 0 與 1 之間: {value}")]
    CriticalChanceOutOfRange { id: String, value: f32 },
    #[error("技能 {id} 的暴擊倍率不可小於 1: {value}")]
    CriticalMultiplierTooLow { id: String, value: f32 },
    #[error("技能 {id} ({archetype}) 缺少必要欄位 {field}")]
    MissingForArchetype {
        id: String,
        archetype: SkillArchetype,
        field: &'static str,
    },
    #[error("重複的技能 id: {0}")]
    DuplicateId(String),
}
