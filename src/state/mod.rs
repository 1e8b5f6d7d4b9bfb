/// 引擎狀態模塊
///
/// 管理 ECS 世界、系統排程、虛擬時間與技能事件輸出

pub mod core;
pub mod initialization;
pub mod system_dispatcher;
pub mod time_management;

pub use core::State;
pub use initialization::StateInitializer;
pub use system_dispatcher::SystemDispatcher;
pub use time_management::TimeManager;
