use specs::{System, Write, WriteStorage};

use crate::comp::*;
use crate::skill::{SkillContext, SkillManager};

/// 消化本 tick 收到的技能輸入（玩家按鍵與 AI 請求都走這裡）
#[derive(Default)]
pub struct Sys;

impl<'a> System<'a> for Sys {
    type SystemData = (
        SkillContext<'a>,
        WriteStorage<'a, SkillManager>,
        Write<'a, SkillInputQueue>,
    );

    fn run(&mut self, (mut ctx, mut managers, mut queue): Self::SystemData) {
        for (actor, input) in queue.0.drain(..) {
            match managers.get_mut(actor) {
                Some(manager) => {
                    if manager.handle_input(input, &mut ctx) {
                        log::debug!("{:?} 施放欄位 {}", actor, input.slot);
                    }
                }
                None => log::warn!("{:?} 沒有技能管理器，忽略輸入 {:?}", actor, input),
            }
        }
    }
}
