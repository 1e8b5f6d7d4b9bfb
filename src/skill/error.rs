use thiserror::Error;

/// 技能操作被拒絕的原因
///
/// 全部是預期中的常見結果：記錄後靜默拒絕，狀態保持不變。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkillError {
    #[error("欄位索引超出範圍: {0}")]
    InvalidSlotIndex(usize),
    #[error("欄位尚未解鎖")]
    SlotLocked,
    #[error("法力不足")]
    InsufficientMana,
    #[error("技能冷卻中")]
    OnCooldown,
    #[error("欄位沒有裝備技能")]
    NoEquippedSkill,
    #[error("等級不足，需要 {required}，目前 {current}")]
    BelowRequiredLevel { required: u32, current: u32 },
    #[error("範圍內沒有有效目標")]
    NoValidTarget,
    #[error("施法者不存在或已死亡")]
    CasterUnavailable,
}
