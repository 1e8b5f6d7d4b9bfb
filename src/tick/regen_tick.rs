use specs::{Join, Read, System, WriteStorage};

use crate::comp::*;

/// 生命與法力自然回復，死亡角色不回復
#[derive(Default)]
pub struct Sys;

impl<'a> System<'a> for Sys {
    type SystemData = (Read<'a, DeltaTime>, WriteStorage<'a, Vitals>);

    fn run(&mut self, (dt, mut vitals): Self::SystemData) {
        for v in (&mut vitals).join() {
            v.regen(dt.0);
        }
    }
}
