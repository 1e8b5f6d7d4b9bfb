use serde::{Deserialize, Serialize};

/// 技能原型 - 決定目標選擇與時序策略
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillArchetype {
    Melee,      // 近戰：以施法者為中心
    Projectile, // 投射物：朝瞄準點飛行
    Area,       // 範圍：瞄準點爆發
    Support,    // 輔助：延遲作用於自身
    Instant,    // 瞬發：立即作用於自身，無預覽
}

impl SkillArchetype {
    pub const ALL: [SkillArchetype; 5] = [
        SkillArchetype::Melee,
        SkillArchetype::Projectile,
        SkillArchetype::Area,
        SkillArchetype::Support,
        SkillArchetype::Instant,
    ];

    /// 是否使用即時瞄準點（其他原型以施法者位置為目標）
    pub fn uses_aim_point(&self) -> bool {
        matches!(self, SkillArchetype::Projectile | SkillArchetype::Area)
    }

    /// 是否會進入預覽階段
    pub fn has_preview(&self) -> bool {
        !matches!(self, SkillArchetype::Instant)
    }

    /// 預設動畫觸發名稱
    pub fn default_trigger(&self) -> &'static str {
        match self {
            SkillArchetype::Melee => "melee",
            SkillArchetype::Projectile => "projectile",
            SkillArchetype::Area => "area",
            SkillArchetype::Support => "support",
            SkillArchetype::Instant => "instant",
        }
    }

    /// 預設特效顏色 (RGBA)
    pub fn default_color(&self) -> [f32; 4] {
        match self {
            SkillArchetype::Melee => [1.0, 0.55, 0.1, 1.0],
            SkillArchetype::Projectile => [0.2, 0.8, 1.0, 1.0],
            SkillArchetype::Area => [0.9, 0.15, 0.1, 1.0],
            SkillArchetype::Support => [0.2, 0.9, 0.3, 1.0],
            SkillArchetype::Instant => [1.0, 0.9, 0.2, 1.0],
        }
    }
}

impl std::fmt::Display for SkillArchetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.default_trigger())
    }
}
