/// 存檔 - 只保存玩家等級、熱鍵配置與各欄位裝備的技能索引

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use skill_system::SkillDatabase;

use crate::skill::SkillManager;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub player_level: u32,
    pub legacy_hotkeys_enabled: bool,
    /// 技能資料庫索引，-1 表示空欄位
    pub equipped_skill_indices: Vec<i32>,
}

impl SaveData {
    pub fn capture(manager: &SkillManager, db: &SkillDatabase) -> Self {
        SaveData {
            player_level: manager.level(),
            legacy_hotkeys_enabled: manager.legacy_hotkeys(),
            equipped_skill_indices: manager.equipped_skill_indices(db),
        }
    }

    /// 套用到管理器：先恢復等級解鎖欄位，再依索引重新裝備
    ///
    /// 無效索引與裝備失敗只記錄警告，該欄位保持空白。
    pub fn apply(&self, manager: &mut SkillManager, db: &SkillDatabase) {
        manager.set_level(self.player_level.max(1));
        manager.use_legacy_hotkeys(self.legacy_hotkeys_enabled);

        for slot in 0..manager.slot_count() {
            manager.unequip(slot);
            let index = match self.equipped_skill_indices.get(slot) {
                Some(&i) if i >= 0 => i as usize,
                _ => continue,
            };
            match db.get_by_index(index) {
                Some(def) => {
                    if let Err(e) = manager.equip(slot, def) {
                        log::warn!("存檔欄位 {} 無法裝備技能 #{}: {}", slot, index, e);
                    }
                }
                None => log::warn!("存檔欄位 {} 的技能索引 {} 不存在", slot, index),
            }
        }
        if self.equipped_skill_indices.len() > manager.slot_count() {
            log::warn!(
                "存檔有 {} 個欄位，超過目前的 {} 個",
                self.equipped_skill_indices.len(),
                manager.slot_count()
            );
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("存檔寫入 {}", path.as_ref().display());
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let data: SaveData = serde_json::from_str(&content)?;
        log::info!("讀取存檔 {}", path.as_ref().display());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let data = SaveData {
            player_level: 7,
            legacy_hotkeys_enabled: true,
            equipped_skill_indices: vec![2, -1, 0],
        };
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"playerLevel\":7"));
        assert!(json.contains("\"legacyHotkeysEnabled\":true"));
        assert!(json.contains("\"equippedSkillIndices\":[2,-1,0]"));
        let back: SaveData = serde_json::from_str(&json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_missing_fields_default() {
        let data: SaveData = serde_json::from_str(r#"{"playerLevel":3}"#).unwrap();
        assert_eq!(data.player_level, 3);
        assert!(data.equipped_skill_indices.is_empty());
    }
}
