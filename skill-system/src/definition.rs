use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::types::SkillArchetype;

/// 技能定義原始資料 - 直接對應內容檔案 (YAML / JSON)
///
/// 尚未驗證，需透過 [`SkillDefinition::new`] 轉換後才能裝備。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SkillDefinitionData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub archetype: SkillArchetype,

    /// 數值
    pub damage: f32,
    pub range: f32,
    pub area_radius: f32,
    pub speed: f32,
    pub cooldown: f32,
    pub mana_cost: f32,
    pub critical_chance: f32,
    pub critical_multiplier: f32,
    pub knockback_force: f32,
    pub stun_duration: f32,
    pub heal_amount: f32,
    pub required_level: u32,

    /// 表現（交給外部特效/音效/動畫系統）
    pub color: Option<[f32; 4]>,
    pub cast_sound: Option<String>,
    pub impact_sound: Option<String>,
    pub animation_trigger: Option<String>,
    /// 覆寫延遲生效時間（秒），None 時使用引擎設定
    pub cast_delay: Option<f32>,
}

impl Default for SkillDefinitionData {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            archetype: SkillArchetype::Melee,
            damage: 0.0,
            range: 1.0,
            area_radius: 0.0,
            speed: 0.0,
            cooldown: 0.0,
            mana_cost: 0.0,
            critical_chance: 0.0,
            critical_multiplier: 1.5,
            knockback_force: 0.0,
            stun_duration: 0.0,
            heal_amount: 0.0,
            required_level: 1,
            color: None,
            cast_sound: None,
            impact_sound: None,
            animation_trigger: None,
            cast_delay: None,
        }
    }
}

/// 技能定義 - 載入時驗證一次，之後唯讀
///
/// 可被多個欄位/角色同時共享（通常包在 `Arc` 裡），本身沒有任何執行期狀態。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillDefinition {
    data: SkillDefinitionData,
}

impl SkillDefinition {
    /// 驗證並建立技能定義，任何不合法的數值都直接拒絕
    pub fn new(mut data: SkillDefinitionData) -> Result<Self, DefinitionError> {
        if data.id.is_empty() {
            data.id = data.name.to_lowercase().replace(' ', "_");
        }
        if data.name.trim().is_empty() {
            return Err(DefinitionError::EmptyName(data.id));
        }

        let non_negative = [
            ("damage", data.damage),
            ("area_radius", data.area_radius),
            ("speed", data.speed),
            ("cooldown", data.cooldown),
            ("mana_cost", data.mana_cost),
            ("knockback_force", data.knockback_force),
            ("stun_duration", data.stun_duration),
            ("heal_amount", data.heal_amount),
        ];
        // inf 會讓投射物永遠不過期，NaN 會讓所有比較失敗
        let bounded = [
            ("range", data.range),
            ("critical_chance", data.critical_chance),
            ("critical_multiplier", data.critical_multiplier),
            ("cast_delay", data.cast_delay.unwrap_or(0.0)),
        ];
        for (field, value) in non_negative.iter().chain(bounded.iter()).copied() {
            if !value.is_finite() {
                return Err(DefinitionError::NotFinite {
                    id: data.id,
                    field,
                    value,
                });
            }
        }
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(DefinitionError::Negative {
                    id: data.id,
                    field,
                    value,
                });
            }
        }
        if !(data.range > 0.0) {
            return Err(DefinitionError::NonPositive {
                id: data.id,
                field: "range",
                value: data.range,
            });
        }
        if let Some(delay) = data.cast_delay {
            if !(delay >= 0.0) {
                return Err(DefinitionError::Negative {
                    id: data.id,
                    field: "cast_delay",
                    value: delay,
                });
            }
        }
        if !(0.0..=1.0).contains(&data.critical_chance) {
            return Err(DefinitionError::CriticalChanceOutOfRange {
                id: data.id,
                value: data.critical_chance,
            });
        }
        if !(data.critical_multiplier >= 1.0) {
            return Err(DefinitionError::CriticalMultiplierTooLow {
                id: data.id,
                value: data.critical_multiplier,
            });
        }

        match data.archetype {
            SkillArchetype::Projectile if data.speed <= 0.0 => {
                return Err(DefinitionError::MissingForArchetype {
                    id: data.id,
                    archetype: data.archetype,
                    field: "speed",
                });
            }
            SkillArchetype::Area if data.area_radius <= 0.0 => {
                return Err(DefinitionError::MissingForArchetype {
                    id: data.id,
                    archetype: data.archetype,
                    field: "area_radius",
                });
            }
            _ => {}
        }

        Ok(Self { data })
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn description(&self) -> &str {
        &self.data.description
    }

    pub fn archetype(&self) -> SkillArchetype {
        self.data.archetype
    }

    pub fn damage(&self) -> f32 {
        self.data.damage
    }

    pub fn range(&self) -> f32 {
        self.data.range
    }

    pub fn area_radius(&self) -> f32 {
        self.data.area_radius
    }

    pub fn speed(&self) -> f32 {
        self.data.speed
    }

    pub fn cooldown(&self) -> f32 {
        self.data.cooldown
    }

    pub fn mana_cost(&self) -> f32 {
        self.data.mana_cost
    }

    pub fn critical_chance(&self) -> f32 {
        self.data.critical_chance
    }

    pub fn critical_multiplier(&self) -> f32 {
        self.data.critical_multiplier
    }

    pub fn knockback_force(&self) -> f32 {
        self.data.knockback_force
    }

    pub fn stun_duration(&self) -> f32 {
        self.data.stun_duration
    }

    pub fn heal_amount(&self) -> f32 {
        self.data.heal_amount
    }

    pub fn required_level(&self) -> u32 {
        self.data.required_level
    }

    /// 特效顏色，未設定時使用原型預設色
    pub fn color(&self) -> [f32; 4] {
        self.data
            .color
            .unwrap_or_else(|| self.data.archetype.default_color())
    }

    pub fn cast_sound(&self) -> Option<&str> {
        self.data.cast_sound.as_deref()
    }

    pub fn impact_sound(&self) -> Option<&str> {
        self.data.impact_sound.as_deref()
    }

    /// 動畫觸發名稱，未設定時使用原型名稱
    pub fn animation_trigger(&self) -> &str {
        self.data
            .animation_trigger
            .as_deref()
            .unwrap_or_else(|| self.data.archetype.default_trigger())
    }

    pub fn cast_delay(&self) -> Option<f32> {
        self.data.cast_delay
    }

    /// 投射物最長存活時間 (range / speed)
    pub fn projectile_lifetime(&self) -> f32 {
        if self.data.speed > 0.0 {
            self.data.range / self.data.speed
        } else {
            0.0
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn fireball() -> SkillDefinitionData {
        SkillDefinitionData {
            id: "fireball".to_string(),
            name: "Fireball".to_string(),
            archetype: SkillArchetype::Projectile,
            damage: 30.0,
            range: 12.0,
            speed: 15.0,
            mana_cost: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_definition() {
        let def = SkillDefinition::new(fireball()).unwrap();
        assert_eq!(def.id(), "fireball");
        assert_eq!(def.archetype(), SkillArchetype::Projectile);
        assert_eq!(def.animation_trigger(), "projectile");
        assert!((def.projectile_lifetime() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_negative_damage() {
        let mut data = fireball();
        data.damage = -1.0;
        let err = SkillDefinition::new(data).unwrap_err();
        assert!(matches!(err, DefinitionError::Negative { field: "damage", .. }));
    }

    #[test]
    fn test_rejects_zero_range() {
        let mut data = fireball();
        data.range = 0.0;
        let err = SkillDefinition::new(data).unwrap_err();
        assert!(matches!(err, DefinitionError::NonPositive { field: "range", .. }));
    }

    #[test]
    fn test_rejects_projectile_without_speed() {
        let mut data = fireball();
        data.speed = 0.0;
        assert!(matches!(
            SkillDefinition::new(data),
            Err(DefinitionError::MissingForArchetype { field: "speed", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_critical() {
        let mut data = fireball();
        data.critical_chance = 1.5;
        assert!(SkillDefinition::new(data).is_err());

        let mut data = fireball();
        data.critical_multiplier = 0.5;
        assert!(SkillDefinition::new(data).is_err());
    }

    #[test]
    fn test_rejects_infinite_values() {
        let mut data = fireball();
        data.range = f32::INFINITY;
        assert!(matches!(
            SkillDefinition::new(data),
            Err(DefinitionError::NotFinite { field: "range", .. })
        ));

        let mut data = fireball();
        data.damage = f32::INFINITY;
        assert!(matches!(
            SkillDefinition::new(data),
            Err(DefinitionError::NotFinite { field: "damage", .. })
        ));

        let mut data = fireball();
        data.cast_delay = Some(f32::INFINITY);
        assert!(matches!(
            SkillDefinition::new(data),
            Err(DefinitionError::NotFinite { field: "cast_delay", .. })
        ));

        let mut data = fireball();
        data.cooldown = f32::NAN;
        assert!(SkillDefinition::new(data).is_err());
    }

    #[test]
    fn test_id_derived_from_name() {
        let mut data = fireball();
        data.id = String::new();
        data.name = "Chain Lightning".to_string();
        let def = SkillDefinition::new(data).unwrap();
        assert_eq!(def.id(), "chain_lightning");
    }
}
