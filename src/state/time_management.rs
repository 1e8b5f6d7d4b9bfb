/// 時間管理器 - 推進虛擬時間，所有冷卻與延遲效果都以此計時

use specs::{World, WorldExt};

use crate::comp::{DeltaTime, Tick, Time};

pub struct TimeManager {
    /// 單一步驟的最大增量時間
    max_delta_time: f32,
}

impl TimeManager {
    pub fn new(max_delta_time: f32) -> Self {
        Self { max_delta_time }
    }

    /// 把一次推進拆成不超過上限的子步驟，總和等於 dt
    pub fn sub_steps(&self, dt: f32) -> anyhow::Result<Vec<f32>> {
        if !(dt >= 0.0) || !dt.is_finite() {
            anyhow::bail!("增量時間不合法: {}", dt);
        }
        let max = self.max_delta_time;
        if !(max > 0.0) {
            return Ok(vec![dt]);
        }
        let mut steps = Vec::with_capacity((dt / max).ceil() as usize + 1);
        let mut remaining = dt;
        while remaining > max {
            steps.push(max);
            remaining -= max;
        }
        steps.push(remaining);
        Ok(steps)
    }

    /// 推進一個步驟
    pub fn update(&self, world: &mut World, dt: f32) -> anyhow::Result<()> {
        if !(dt >= 0.0) {
            anyhow::bail!("增量時間不可為負: {}", dt);
        }

        world.write_resource::<Time>().0 += dt as f64;
        world.write_resource::<DeltaTime>().0 = dt.min(self.max_delta_time);
        world.write_resource::<Tick>().0 += 1;

        Ok(())
    }

    pub fn max_delta_time(&self) -> f32 {
        self.max_delta_time
    }
}
