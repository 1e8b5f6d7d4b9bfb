/// 技能資料層
///
/// 純資料模組：技能定義、驗證與內容資料庫，不依賴 ECS。
/// 執行期邏輯（欄位、冷卻、執行器）位於 skill-engine。

pub mod config;
pub mod definition;
pub mod error;
pub mod types;

pub use config::SkillDatabase;
pub use definition::{SkillDefinition, SkillDefinitionData};
pub use error::DefinitionError;
pub use types::SkillArchetype;
