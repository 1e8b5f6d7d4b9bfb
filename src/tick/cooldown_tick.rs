use specs::{
    shred::{ResourceId, World},
    Join, Read, System, SystemData, WriteStorage,
};

use crate::comp::*;
use crate::skill::SkillManager;

#[derive(SystemData)]
pub struct CooldownRead<'a> {
    time: Read<'a, Time>,
}

#[derive(SystemData)]
pub struct CooldownWrite<'a> {
    managers: WriteStorage<'a, SkillManager>,
}

/// 每 tick 更新所有欄位冷卻，必須在輸入處理之前
#[derive(Default)]
pub struct Sys;

impl<'a> System<'a> for Sys {
    type SystemData = (CooldownRead<'a>, CooldownWrite<'a>);

    fn run(&mut self, (tr, mut tw): Self::SystemData) {
        let now = tr.time.0;
        for manager in (&mut tw.managers).join() {
            manager.update_cooldowns(now);
        }
    }
}
