/// 預覽 → 按住 → 放開 輸入流程與熱鍵測試

mod common;

use common::*;
use skill_engine::comp::*;
use skill_engine::{Hotkey, InputPhase, SkillArchetype, State};
use specs::Entity;
use vek::Vec2;

fn session(state: &State, actor: Entity) -> (InputPhase, Option<usize>) {
    state
        .with_manager(actor, |m| (m.phase(), m.active_preview_slot()))
        .unwrap()
}

fn key(slot: usize, phase: KeyPhase, x: f32, y: f32) -> SkillInput {
    SkillInput::new(slot, phase, Vec2::new(x, y))
}

fn setup() -> (State, std::sync::Arc<skill_engine::RecordingSink>, Entity, Entity) {
    let db = database(vec![
        skill("slash", SkillArchetype::Melee, |d| {
            d.damage = 10.0;
            d.cooldown = 1.0;
        }),
        skill("bolt", SkillArchetype::Projectile, |d| {
            d.damage = 15.0;
            d.range = 8.0;
            d.speed = 20.0;
        }),
        skill("quake", SkillArchetype::Area, |d| {
            d.damage = 30.0;
            d.range = 4.0;
            d.area_radius = 1.5;
        }),
        skill("quick_heal", SkillArchetype::Instant, |d| d.heal_amount = 10.0),
    ]);
    let (mut state, sink) = state(db);
    let player = spawn(&mut state, 0.0, 0.0, Faction::Player, 6);
    let enemy = spawn(&mut state, 1.0, 0.0, Faction::Enemy, 1);
    for (slot, id) in ["slash", "bolt", "quake", "quick_heal"].iter().enumerate() {
        state.equip_by_id(player, slot, id).unwrap();
    }
    (state, sink, player, enemy)
}

#[test]
fn test_press_hold_release_executes_once() {
    let (mut state, sink, player, enemy) = setup();

    assert!(!state.apply_input(player, key(0, KeyPhase::Down, 1.0, 0.0)));
    assert_eq!(session(&state, player), (InputPhase::Previewing, Some(0)));
    assert_eq!(sink.count(|o| matches!(o, Outcome::Preview { slot: 0, .. })), 1);

    assert!(!state.apply_input(player, key(0, KeyPhase::Held, 1.0, 0.0)));
    assert!(!state.apply_input(player, key(0, KeyPhase::Held, 1.0, 0.5)));
    assert_eq!(session(&state, player), (InputPhase::Holding, Some(0)));

    assert!(state.apply_input(player, key(0, KeyPhase::Up, 1.0, 0.5)));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    assert_eq!(sink.count(|o| matches!(o, Outcome::PreviewEnded { slot: 0, .. })), 1);

    run(&mut state, 0.5);
    assert_eq!(health(&state, enemy), 90.0);
}

#[test]
fn test_quick_release_still_executes() {
    let (mut state, _, player, enemy) = setup();

    state.apply_input(player, key(1, KeyPhase::Down, 5.0, 0.0));
    assert!(state.apply_input(player, key(1, KeyPhase::Up, 5.0, 0.0)));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    assert_eq!(state.projectile_count(), 1);

    run(&mut state, 0.2);
    assert_eq!(state.projectile_count(), 0);
    assert_eq!(health(&state, enemy), 85.0);
}

#[test]
fn test_other_slots_ignored_while_active() {
    let (mut state, sink, player, _) = setup();
    state.set_vitals(player, vitals(50.0, 100.0));

    state.apply_input(player, key(0, KeyPhase::Down, 1.0, 0.0));
    assert!(!state.apply_input(player, key(1, KeyPhase::Down, 3.0, 0.0)));
    assert!(!state.apply_input(player, key(2, KeyPhase::Up, 3.0, 0.0)));
    // 瞬發欄位也一樣被忽略
    assert!(!state.apply_input(player, key(3, KeyPhase::Down, 0.0, 0.0)));
    assert_eq!(health(&state, player), 50.0);
    assert_eq!(session(&state, player), (InputPhase::Previewing, Some(0)));

    assert!(state.apply_input(player, key(0, KeyPhase::Up, 1.0, 0.0)));
    assert_eq!(sink.count(|o| matches!(o, Outcome::AnimationTrigger { .. })), 1);

    // 結束後其他欄位恢復可用
    assert!(state.apply_input(player, key(3, KeyPhase::Down, 0.0, 0.0)));
    assert_eq!(health(&state, player), 60.0);
}

#[test]
fn test_held_or_up_without_press_is_ignored() {
    let (mut state, sink, player, _) = setup();

    assert!(!state.apply_input(player, key(0, KeyPhase::Held, 1.0, 0.0)));
    assert!(!state.apply_input(player, key(0, KeyPhase::Up, 1.0, 0.0)));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    assert_eq!(sink.count(|o| matches!(o, Outcome::AnimationTrigger { .. })), 0);
}

#[test]
fn test_release_on_cooldown_returns_to_idle() {
    let (mut state, _, player, _) = setup();

    state.apply_input(player, key(0, KeyPhase::Down, 1.0, 0.0));
    assert!(state.apply_input(player, key(0, KeyPhase::Up, 1.0, 0.0)));

    state.apply_input(player, key(0, KeyPhase::Down, 1.0, 0.0));
    assert!(!state.apply_input(player, key(0, KeyPhase::Up, 1.0, 0.0)));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
}

#[test]
fn test_area_preview_tracks_clamped_aim() {
    let (mut state, sink, player, _) = setup();

    state.apply_input(player, key(2, KeyPhase::Down, 0.0, 2.0));
    state.apply_input(player, key(2, KeyPhase::Held, 0.0, 10.0));

    let last = sink
        .snapshot()
        .into_iter()
        .filter_map(|o| match o {
            Outcome::Preview { center, radius, .. } => Some((center, radius)),
            _ => None,
        })
        .last()
        .unwrap();
    assert!((last.0 - Vec2::new(0.0, 4.0)).magnitude() < 1e-4);
    assert_eq!(last.1, 1.5);
    let aim = state.with_manager(player, |m| m.current_aim()).unwrap();
    assert!((aim - Vec2::new(0.0, 4.0)).magnitude() < 1e-4);
}

#[test]
fn test_unequip_active_slot_resets_session() {
    let (mut state, _, player, _) = setup();

    state.apply_input(player, key(1, KeyPhase::Down, 5.0, 0.0));
    assert!(state.unequip(player, 1).is_some());
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    assert!(!state.apply_input(player, key(1, KeyPhase::Up, 5.0, 0.0)));
}

#[test]
fn test_locked_or_empty_slot_never_previews() {
    let db = database(vec![skill("slash", SkillArchetype::Melee, |_| {})]);
    let (mut state, sink) = state(db);
    let player = spawn(&mut state, 0.0, 0.0, Faction::Player, 1);

    assert!(!state.apply_input(player, key(0, KeyPhase::Down, 0.0, 0.0)));
    assert!(!state.apply_input(player, key(1, KeyPhase::Down, 0.0, 0.0)));
    assert!(!state.apply_input(player, key(9, KeyPhase::Down, 0.0, 0.0)));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    assert_eq!(sink.count(|o| matches!(o, Outcome::Preview { .. })), 0);
}

#[test]
fn test_queued_input_is_processed_by_tick() {
    let (mut state, _, player, enemy) = setup();

    state.queue_input(player, key(0, KeyPhase::Down, 1.0, 0.0));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    state.tick(DT).unwrap();
    assert_eq!(session(&state, player), (InputPhase::Previewing, Some(0)));

    state.queue_input(player, key(0, KeyPhase::Up, 1.0, 0.0));
    run(&mut state, 0.5);
    assert_eq!(health(&state, enemy), 90.0);
}

#[test]
fn test_hotkeys_drive_slots() {
    let (mut state, _, player, enemy) = setup();

    assert!(!state.handle_key(player, Hotkey('q'), KeyPhase::Down, Vec2::new(1.0, 0.0)));
    assert!(state.handle_key(player, Hotkey('Q'), KeyPhase::Up, Vec2::new(1.0, 0.0)));
    run(&mut state, 0.5);
    assert_eq!(health(&state, enemy), 90.0);

    state.with_manager(player, |m| m.use_legacy_hotkeys(true));
    assert!(!state.handle_key(player, Hotkey('W'), KeyPhase::Down, Vec2::zero()));
    assert_eq!(session(&state, player), (InputPhase::Idle, None));
    assert!(!state.handle_key(player, Hotkey('2'), KeyPhase::Down, Vec2::new(5.0, 0.0)));
    assert_eq!(session(&state, player), (InputPhase::Previewing, Some(1)));
}

#[test]
fn test_bind_key_swaps_or_replaces() {
    let (state, _, player, _) = setup();
    let bolt = state.database().get("bolt").unwrap();
    let slash = state.database().get("slash").unwrap();

    // bolt 已在欄位 1 (W)，綁到 E (欄位 2) 時交換按鍵
    assert!(state.with_manager(player, |m| m.bind_skill_to_key(&bolt, Hotkey('E'))).unwrap());
    let keys = state
        .with_manager(player, |m| (m.slot(1).unwrap().hotkey(), m.slot(2).unwrap().hotkey()))
        .unwrap();
    assert_eq!(keys, (Some(Hotkey('E')), Some(Hotkey('W'))));

    // 未裝備的技能綁到已占用的按鍵則取代該欄位技能
    state.with_manager(player, |m| m.unequip(0));
    assert!(state.with_manager(player, |m| m.bind_skill_to_key(&slash, Hotkey('W'))).unwrap());
    let id = state
        .with_manager(player, |m| m.slot(2).unwrap().skill().unwrap().id().to_string())
        .unwrap();
    assert_eq!(id, "slash");
}
