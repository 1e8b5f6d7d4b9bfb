#![allow(dead_code)]

use std::sync::Arc;

use skill_engine::comp::*;
use skill_engine::{
    EngineConfig, RecordingSink, SkillArchetype, SkillDatabase, SkillDefinition,
    SkillDefinitionData, State,
};
use specs::Entity;
use vek::Vec2;

pub const DT: f32 = 0.05;

pub fn skill(
    id: &str,
    archetype: SkillArchetype,
    customize: impl FnOnce(&mut SkillDefinitionData),
) -> SkillDefinition {
    let mut data = SkillDefinitionData {
        id: id.to_string(),
        name: id.to_string(),
        archetype,
        range: 2.0,
        ..Default::default()
    };
    customize(&mut data);
    SkillDefinition::new(data).unwrap()
}

pub fn database(skills: Vec<SkillDefinition>) -> SkillDatabase {
    let mut db = SkillDatabase::new();
    for s in skills {
        db.register(s).unwrap();
    }
    db
}

pub fn state(db: SkillDatabase) -> (State, Arc<RecordingSink>) {
    let config = EngineConfig {
        rng_seed: Some(7),
        ..Default::default()
    };
    let sink = Arc::new(RecordingSink::new());
    let state = State::with_sink(config, db, sink.clone());
    (state, sink)
}

pub fn vitals(health: f32, mana: f32) -> Vitals {
    Vitals::new(Pool::new(100.0, 0.0).with_current(health), Pool::new(100.0, 0.0).with_current(mana))
}

pub fn spawn(state: &mut State, x: f32, y: f32, faction: Faction, level: u32) -> Entity {
    state
        .spawn_actor(Vec2::new(x, y), faction, vitals(100.0, 100.0), level)
        .unwrap()
}

/// 以固定步長推進指定秒數
pub fn run(state: &mut State, seconds: f32) {
    let ticks = (seconds / DT).ceil() as usize;
    for _ in 0..ticks {
        state.tick(DT).unwrap();
    }
}

pub fn health(state: &State, e: Entity) -> f32 {
    state.vitals(e).unwrap().health.current
}

pub fn mana(state: &State, e: Entity) -> f32 {
    state.vitals(e).unwrap().mana.current
}
