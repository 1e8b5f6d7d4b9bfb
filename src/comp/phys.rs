use serde::{Deserialize, Serialize};
use specs::storage::VecStorage;
use specs::Component;
use vek::*;

/// Position
#[derive(Copy, Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pos(pub Vec2<f32>);

impl Component for Pos {
    type Storage = VecStorage<Self>;
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Pos(Vec2::new(x, y))
    }

    pub fn distance(&self, other: Vec2<f32>) -> f32 {
        (self.0 - other).magnitude()
    }
}

/// 單位向量，長度為 0（或非有限值）時回傳 None
pub fn try_normalized(v: Vec2<f32>) -> Option<Vec2<f32>> {
    let len = v.magnitude();
    if len > f32::EPSILON && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_normalized() {
        let n = try_normalized(Vec2::new(3.0, 4.0)).unwrap();
        assert!((n - Vec2::new(0.6, 0.8)).magnitude() < 1e-6);
        assert!(try_normalized(Vec2::zero()).is_none());
        assert!(try_normalized(Vec2::new(f32::NAN, 1.0)).is_none());
    }

    #[test]
    fn test_distance() {
        assert_eq!(Pos::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0);
    }
}
