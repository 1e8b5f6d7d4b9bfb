use specs::{Entity, Join, Read, System};

use crate::comp::*;
use crate::skill::executors::projectile;
use crate::skill::SkillContext;

/// 推進所有飛行中的投射物，命中或飛完射程的實體在此刪除
#[derive(Default)]
pub struct Sys;

impl<'a> System<'a> for Sys {
    type SystemData = (SkillContext<'a>, Read<'a, DeltaTime>);

    fn run(&mut self, (mut ctx, dt): Self::SystemData) {
        let dt = dt.0;
        let flying: Vec<Entity> = (&ctx.entities, &ctx.projectiles)
            .join()
            .map(|(e, _)| e)
            .collect();

        for e in flying {
            if projectile::advance(&mut ctx, e, dt) {
                if let Err(err) = ctx.entities.delete(e) {
                    log::warn!("刪除投射物 {:?} 失敗: {}", e, err);
                }
            }
        }
    }
}
