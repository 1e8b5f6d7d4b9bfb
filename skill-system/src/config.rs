use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::definition::{SkillDefinition, SkillDefinitionData};
use crate::error::DefinitionError;

/// 技能資料庫 - 內容載入時建立，之後唯讀
///
/// 保留載入順序，索引即為存檔中的 `equipped_skill_indices`。
#[derive(Debug, Default, Clone)]
pub struct SkillDatabase {
    skills: Vec<Arc<SkillDefinition>>,
    index_by_id: HashMap<String, usize>,
}

impl SkillDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// 從文件載入，依副檔名選擇格式
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, anyhow::Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let count = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => self.load_from_yaml(&content)?,
            Some("json") => self.load_from_json(&content)?,
            _ => return Err(anyhow::anyhow!("不支援的檔案格式: {}", path.display())),
        };

        log::info!("從 {} 載入 {} 個技能", path.display(), count);
        Ok(count)
    }

    /// 從YAML載入（頂層為技能列表）
    pub fn load_from_yaml(&mut self, content: &str) -> Result<usize, anyhow::Error> {
        let entries: Vec<SkillDefinitionData> = serde_yaml::from_str(content)?;
        Ok(self.register_all(entries)?)
    }

    /// 從JSON載入（頂層為技能列表）
    pub fn load_from_json(&mut self, content: &str) -> Result<usize, anyhow::Error> {
        let entries: Vec<SkillDefinitionData> = serde_json::from_str(content)?;
        Ok(self.register_all(entries)?)
    }

    /// 整批驗證後才寫入，任何一筆失敗則整批不生效
    fn register_all(&mut self, entries: Vec<SkillDefinitionData>) -> Result<usize, DefinitionError> {
        let mut validated = Vec::with_capacity(entries.len());
        for data in entries {
            let def = SkillDefinition::new(data)?;
            let duplicated = self.index_by_id.contains_key(def.id())
                || validated.iter().any(|d: &SkillDefinition| d.id() == def.id());
            if duplicated {
                return Err(DefinitionError::DuplicateId(def.id().to_string()));
            }
            validated.push(def);
        }

        let count = validated.len();
        for def in validated {
            self.push(def);
        }
        Ok(count)
    }

    /// 註冊單一技能
    pub fn register(&mut self, def: SkillDefinition) -> Result<usize, DefinitionError> {
        if self.index_by_id.contains_key(def.id()) {
            return Err(DefinitionError::DuplicateId(def.id().to_string()));
        }
        Ok(self.push(def))
    }

    fn push(&mut self, def: SkillDefinition) -> usize {
        let index = self.skills.len();
        log::debug!("註冊技能 [{}] {} ({})", index, def.id(), def.archetype());
        self.index_by_id.insert(def.id().to_string(), index);
        self.skills.push(Arc::new(def));
        index
    }

    pub fn get(&self, id: &str) -> Option<Arc<SkillDefinition>> {
        self.index_by_id.get(id).map(|&i| self.skills[i].clone())
    }

    pub fn get_by_index(&self, index: usize) -> Option<Arc<SkillDefinition>> {
        self.skills.get(index).cloned()
    }

    /// 技能在資料庫中的索引（以 id 比對）
    pub fn index_of(&self, def: &SkillDefinition) -> Option<usize> {
        self.index_by_id.get(def.id()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SkillDefinition>> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillArchetype;

    const YAML: &str = r#"
- id: cleave
  name: Cleave
  archetype: melee
  damage: 25
  range: 2.5
  cooldown: 1.5
  mana_cost: 10
- id: heal
  name: Heal
  archetype: instant
  heal_amount: 20
  range: 1
  cooldown: 8
  required_level: 3
"#;

    #[test]
    fn test_load_yaml_keeps_order() {
        let mut db = SkillDatabase::new();
        assert_eq!(db.load_from_yaml(YAML).unwrap(), 2);
        assert_eq!(db.get_by_index(0).unwrap().id(), "cleave");
        assert_eq!(db.get_by_index(1).unwrap().archetype(), SkillArchetype::Instant);
        assert_eq!(db.get("heal").unwrap().required_level(), 3);
    }

    #[test]
    fn test_duplicate_batch_is_rejected_whole() {
        let mut db = SkillDatabase::new();
        db.load_from_yaml(YAML).unwrap();
        assert!(db.load_from_yaml(YAML).is_err());
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn test_invalid_entry_fails_fast() {
        let mut db = SkillDatabase::new();
        let json = r#"[{"id":"bad","name":"Bad","archetype":"area","range":5,"area_radius":0}]"#;
        assert!(db.load_from_json(json).is_err());
        assert!(db.is_empty());
    }
}
