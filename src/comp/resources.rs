use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// A resource that stores the tick (i.e: physics) time.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Time(pub f64);

/// A resource that stores the time since the previous tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeltaTime(pub f32);

#[derive(Copy, Clone, Debug, Default)]
pub struct Tick(pub u64);

/// 技能用亂數 - 暴擊判定、隨機擊退方向
///
/// 固定種子時整個模擬可重現。
pub struct SkillRng(pub Pcg64);

impl SkillRng {
    pub fn seeded(seed: u64) -> Self {
        SkillRng(Pcg64::seed_from_u64(seed))
    }
}

impl Default for SkillRng {
    fn default() -> Self {
        SkillRng(Pcg64::from_rng(&mut rand::rng()))
    }
}
