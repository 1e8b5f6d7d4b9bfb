/// 系統分派器 - 固定順序執行技能相關系統

use specs::{Dispatcher, DispatcherBuilder, World};

use crate::tick::*;

pub struct SystemDispatcher {
    dispatcher: Dispatcher<'static, 'static>,
}

impl SystemDispatcher {
    /// 建立分派器並完成資源註冊
    ///
    /// 順序：冷卻 → 輸入 → 延遲效果 → 投射物 → 回復。
    /// 冷卻先更新，同一 tick 到期的欄位才能馬上再次施放。
    pub fn new(world: &mut World) -> Self {
        let mut dispatcher = DispatcherBuilder::new()
            .with(cooldown_tick::Sys, "cooldown_sys", &[])
            .with(input_tick::Sys, "input_sys", &["cooldown_sys"])
            .with(pending_effect_tick::Sys, "pending_effect_sys", &["input_sys"])
            .with(projectile_tick::Sys, "projectile_sys", &["pending_effect_sys"])
            .with(regen_tick::Sys, "regen_sys", &["projectile_sys"])
            .build();
        dispatcher.setup(world);
        Self { dispatcher }
    }

    /// 運行所有系統
    pub fn run_systems(&mut self, world: &World) {
        self.dispatcher.dispatch(world);
    }
}
