use crossbeam_channel::Sender;
use parking_lot::Mutex;
use specs::Entity;
use vek::Vec2;

use crate::comp::{Outcome, SoundKind};

/// 效果輸出介面 - 執行器建立時注入
///
/// 特效、音效、動畫請求與結算事件都經由這裡送出，測試時可換成 [`RecordingSink`]。
pub trait EffectSink: Send + Sync {
    fn emit(&self, outcome: Outcome);

    fn request_animation(&self, actor: Entity, trigger: &str) {
        self.emit(Outcome::AnimationTrigger {
            actor,
            trigger: trigger.to_string(),
        });
    }

    fn request_sound(&self, actor: Entity, clip: &str, kind: SoundKind) {
        self.emit(Outcome::SoundCue {
            actor,
            clip: clip.to_string(),
            kind,
        });
    }

    fn request_effect(
        &self,
        pos: Vec2<f32>,
        dir: Vec2<f32>,
        color: [f32; 4],
        lifetime: f32,
        critical: bool,
    ) {
        self.emit(Outcome::VisualEffect {
            pos,
            dir,
            color,
            lifetime,
            critical,
        });
    }
}

/// 透過 crossbeam channel 送出事件，由 State 統一收取
#[derive(Clone)]
pub struct ChannelSink {
    tx: Sender<Outcome>,
}

impl ChannelSink {
    pub fn new(tx: Sender<Outcome>) -> Self {
        Self { tx }
    }
}

impl EffectSink for ChannelSink {
    fn emit(&self, outcome: Outcome) {
        if let Err(e) = self.tx.send(outcome) {
            log::trace!("事件通道已關閉，丟棄事件: {:?}", e.into_inner());
        }
    }
}

/// 記錄所有事件（測試與除錯用）
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Outcome>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出並清空目前記錄
    pub fn take(&self) -> Vec<Outcome> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn snapshot(&self) -> Vec<Outcome> {
        self.events.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.events.lock().iter().filter(|o| pred(o)).count()
    }

    /// 指定目標受到的傷害總和
    pub fn damage_to(&self, target: Entity) -> f32 {
        self.events
            .lock()
            .iter()
            .filter_map(|o| match o {
                Outcome::Damage { target: t, amount, .. } if *t == target => Some(*amount),
                _ => None,
            })
            .sum()
    }
}

impl EffectSink for RecordingSink {
    fn emit(&self, outcome: Outcome) {
        self.events.lock().push(outcome);
    }
}

/// 丟棄所有事件
pub struct NullSink;

impl EffectSink for NullSink {
    fn emit(&self, _outcome: Outcome) {}
}
