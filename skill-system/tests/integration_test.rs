/// 技能資料載入綜合測試

use skill_system::*;

const SKILLS_YAML: &str = r#"
- id: cleave
  name: Cleave
  archetype: melee
  damage: 25
  range: 2.5
  cooldown: 1.5
  mana_cost: 10
  critical_chance: 0.15
  critical_multiplier: 2.0

- name: Fire Ball
  archetype: projectile
  damage: 40
  range: 12
  speed: 18
  color: [1.0, 0.45, 0.1, 1.0]
  impact_sound: fire_explode

- id: meteor
  name: Meteor
  archetype: area
  damage: 60
  range: 10
  area_radius: 3
  cast_delay: 1.2
  required_level: 4
"#;

#[test]
fn test_load_full_skill_file() {
    let mut db = SkillDatabase::new();
    assert_eq!(db.load_from_yaml(SKILLS_YAML).unwrap(), 3);

    let fireball = db.get("fire_ball").unwrap();
    assert_eq!(db.index_of(&fireball), Some(1));
    assert_eq!(fireball.color(), [1.0, 0.45, 0.1, 1.0]);
    assert_eq!(fireball.impact_sound(), Some("fire_explode"));
    assert_eq!(fireball.cast_sound(), None);
    assert_eq!(fireball.critical_multiplier(), 1.5);

    let meteor = db.get("meteor").unwrap();
    assert_eq!(meteor.cast_delay(), Some(1.2));
    assert_eq!(meteor.animation_trigger(), "area");
    assert!(meteor.archetype().uses_aim_point());

    let ids: Vec<&str> = db.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["cleave", "fire_ball", "meteor"]);
}

#[test]
fn test_json_and_yaml_share_format() {
    let json = r#"[
        {"id": "mend", "name": "Mend", "archetype": "support", "heal_amount": 30, "cooldown": 10},
        {"id": "blink", "name": "Blink", "archetype": "instant", "range": 1}
    ]"#;
    let mut db = SkillDatabase::new();
    assert_eq!(db.load_from_json(json).unwrap(), 2);
    assert_eq!(db.get("mend").unwrap().heal_amount(), 30.0);
    assert!(!db.get("blink").unwrap().archetype().has_preview());
}

#[test]
fn test_unknown_archetype_is_rejected() {
    let mut db = SkillDatabase::new();
    let yaml = "- id: x\n  name: X\n  archetype: summon\n";
    assert!(db.load_from_yaml(yaml).is_err());
    assert!(db.is_empty());
}

#[test]
fn test_load_from_file_by_extension() {
    let dir = std::env::temp_dir();
    let yaml_path = dir.join(format!("skill_system_{}.yaml", std::process::id()));
    std::fs::write(&yaml_path, SKILLS_YAML).unwrap();

    let mut db = SkillDatabase::new();
    assert_eq!(db.load_from_file(&yaml_path).unwrap(), 3);
    let _ = std::fs::remove_file(&yaml_path);

    let txt_path = dir.join(format!("skill_system_{}.txt", std::process::id()));
    std::fs::write(&txt_path, SKILLS_YAML).unwrap();
    assert!(db.load_from_file(&txt_path).is_err());
    let _ = std::fs::remove_file(&txt_path);
}

#[test]
fn test_validation_errors_name_the_field() {
    let data = SkillDefinitionData {
        id: "bad".to_string(),
        name: "Bad".to_string(),
        archetype: SkillArchetype::Melee,
        cooldown: -2.0,
        ..Default::default()
    };
    let err = SkillDefinition::new(data).unwrap_err();
    assert!(err.to_string().contains("cooldown"));

    let data = SkillDefinitionData {
        name: "   ".to_string(),
        ..Default::default()
    };
    assert!(matches!(SkillDefinition::new(data), Err(DefinitionError::EmptyName(_))));
}

#[test]
fn test_infinite_range_in_content_is_rejected() {
    let yaml = r#"
- id: endless
  name: Endless
  archetype: projectile
  damage: 10
  range: .inf
  speed: 5
"#;
    let mut db = SkillDatabase::new();
    assert!(db.load_from_yaml(yaml).is_err());
    assert!(db.is_empty());
}
