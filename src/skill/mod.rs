/// 技能執行引擎
///
/// 欄位與冷卻、各原型的執行策略、目標查詢、輸入流程與效果輸出。

pub mod context;
pub mod error;
pub mod executors;
pub mod manager;
pub mod sink;
pub mod slot;
pub mod target;

pub use context::SkillContext;
pub use error::SkillError;
pub use executors::{create_executor, SkillExecutor};
pub use manager::{unlocked_count, InputPhase, SkillManager};
pub use sink::{ChannelSink, EffectSink, NullSink, RecordingSink};
pub use slot::{default_hotkey, Hotkey, SkillSlot};
