/// 狀態初始化器 - 註冊組件並放入初始資源

use specs::{World, WorldExt};

use crate::comp::*;
use crate::config::EngineConfig;
use crate::skill::SkillManager;

pub struct StateInitializer;

impl StateInitializer {
    /// 建立 ECS 世界
    pub fn setup_ecs_world(config: &EngineConfig) -> World {
        let mut ecs = World::new();
        Self::register_components(&mut ecs);
        Self::initialize_resources(&mut ecs, config);
        ecs
    }

    fn register_components(ecs: &mut World) {
        ecs.register::<Pos>();
        ecs.register::<Faction>();
        ecs.register::<Vitals>();
        ecs.register::<Projectile>();
        ecs.register::<SkillManager>();
    }

    fn initialize_resources(ecs: &mut World, config: &EngineConfig) {
        ecs.insert(Tick(0));
        ecs.insert(Time(0.0));
        ecs.insert(DeltaTime(0.0));
        ecs.insert(config.tuning.clone());
        ecs.insert(PendingEffects::default());
        ecs.insert(SkillInputQueue::default());

        let rng = match config.rng_seed {
            Some(seed) => {
                log::info!("使用固定亂數種子 {}", seed);
                SkillRng::seeded(seed)
            }
            None => SkillRng::default(),
        };
        ecs.insert(rng);
    }
}
