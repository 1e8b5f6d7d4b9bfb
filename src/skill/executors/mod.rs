/// 技能執行器
///
/// 每種原型一個執行策略，裝備時依原型由 [`create_executor`] 建立，
/// 與技能定義一對一綁定。執行器本身不保存跨次施放的狀態，
/// 延遲效果交給 `PendingEffects`，投射物交給各自的實體。

pub mod area;
pub mod instant;
pub mod melee;
pub mod projectile;
pub mod support;

pub use area::AreaExecutor;
pub use instant::InstantExecutor;
pub use melee::MeleeExecutor;
pub use projectile::ProjectileExecutor;
pub use support::SupportExecutor;

use std::sync::Arc;

use rand::Rng;
use skill_system::{SkillArchetype, SkillDefinition};
use specs::Entity;
use vek::Vec2;

use super::{target, EffectSink, SkillContext, SkillError};
use crate::comp::*;

/// 執行器共同介面
pub trait SkillExecutor: Send + Sync {
    /// 綁定的技能定義
    fn definition(&self) -> &Arc<SkillDefinition>;

    /// 建立時注入的效果輸出
    fn sink(&self) -> &Arc<dyn EffectSink>;

    /// 執行技能，控制權立即返回；延遲效果由之後的 tick 觸發
    fn execute(
        &self,
        caster: Entity,
        target_point: Vec2<f32>,
        ctx: &mut SkillContext,
    ) -> Result<(), SkillError>;

    /// 非玩家施法者需要在此距離內有敵人才會出手，None 表示不需要目標
    fn threat_reach(&self) -> Option<f32> {
        None
    }

    /// 檢查是否可施放
    ///
    /// 玩家只檢查法力（等級在裝備時已檢查）；非玩家陣營免除法力，只看有沒有目標。
    fn can_execute(&self, caster: Entity, ctx: &SkillContext) -> Result<(), SkillError> {
        if !ctx.is_alive(caster) {
            return Err(SkillError::CasterUnavailable);
        }
        let faction = ctx.faction(caster).ok_or(SkillError::CasterUnavailable)?;
        let def = self.definition();

        if faction.is_player() {
            let has_mana = ctx
                .vitals
                .get(caster)
                .map_or(false, |v| v.has_mana(def.mana_cost()));
            if !has_mana {
                return Err(SkillError::InsufficientMana);
            }
        } else if let Some(reach) = self.threat_reach() {
            let pos = ctx.position(caster).ok_or(SkillError::CasterUnavailable)?;
            if !target::any_target_in_radius(ctx, pos, reach, faction, Some(caster)) {
                return Err(SkillError::NoValidTarget);
            }
        }
        Ok(())
    }

    fn archetype(&self) -> SkillArchetype {
        self.definition().archetype()
    }

    fn mana_cost(&self) -> f32 {
        self.definition().mana_cost()
    }

    fn cooldown(&self) -> f32 {
        self.definition().cooldown()
    }
}

/// 依原型建立執行器
pub fn create_executor(
    def: Arc<SkillDefinition>,
    sink: Arc<dyn EffectSink>,
) -> Box<dyn SkillExecutor> {
    match def.archetype() {
        SkillArchetype::Melee => Box::new(MeleeExecutor::new(def, sink)),
        SkillArchetype::Projectile => Box::new(ProjectileExecutor::new(def, sink)),
        SkillArchetype::Area => Box::new(AreaExecutor::new(def, sink)),
        SkillArchetype::Support => Box::new(SupportExecutor::new(def, sink)),
        SkillArchetype::Instant => Box::new(InstantExecutor::new(def, sink)),
    }
}

/// 傷害判定結果
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRoll {
    pub amount: f32,
    pub critical: bool,
}

/// 暴擊判定：[0,1) 均勻亂數小於暴擊率即暴擊
pub fn roll_damage<R: Rng>(skill: &SkillDefinition, rng: &mut R) -> HitRoll {
    let roll: f32 = rng.random();
    if roll < skill.critical_chance() {
        HitRoll {
            amount: skill.damage() * skill.critical_multiplier(),
            critical: true,
        }
    } else {
        HitRoll {
            amount: skill.damage(),
            critical: false,
        }
    }
}

/// 擊退方向退化（施力點與目標重疊）時的替代方向
#[derive(Copy, Clone, Debug)]
pub enum KnockbackFallback {
    Random,
    Direction(Vec2<f32>),
}

/// 命中選項
#[derive(Copy, Clone, Debug)]
pub struct HitOptions {
    /// 擊退施力點與退化替代方向，None 表示不擊退
    pub knockback: Option<(Vec2<f32>, KnockbackFallback)>,
    pub stun: bool,
}

/// 施放開始：扣法力、動畫、施法音效
///
/// 非玩家陣營免檢查，法力不足時不扣。
pub(crate) fn begin_cast(
    ctx: &mut SkillContext,
    sink: &dyn EffectSink,
    caster: Entity,
    def: &SkillDefinition,
) {
    if let Some(vitals) = ctx.vitals.get_mut(caster) {
        if !vitals.spend_mana(def.mana_cost()) {
            log::debug!("{:?} 法力不足以支付 {}，免費施放", caster, def.id());
        }
    }
    sink.request_animation(caster, def.animation_trigger());
    let clip = def
        .cast_sound()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_cast", def.archetype()));
    sink.request_sound(caster, &clip, SoundKind::Cast);
}

/// 對單一目標結算傷害、暴擊、擊退、暈眩
pub(crate) fn apply_hit(
    ctx: &mut SkillContext,
    sink: &dyn EffectSink,
    source: Entity,
    target: Entity,
    def: &SkillDefinition,
    options: HitOptions,
) {
    let target_pos = match ctx.position(target) {
        Some(p) => p,
        None => return,
    };
    let roll = roll_damage(def, &mut ctx.rng.0);
    let taken = match ctx.vitals.get_mut(target) {
        Some(v) => v.take_damage(roll.amount),
        None => return,
    };

    sink.emit(Outcome::Damage {
        source,
        target,
        amount: roll.amount,
        critical: roll.critical,
    });
    sink.request_effect(target_pos, Vec2::zero(), def.color(), 0.5, roll.critical);
    let clip = def
        .impact_sound()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_impact", def.archetype()));
    sink.request_sound(target, &clip, SoundKind::Impact);

    if let Some((origin, fallback)) = options.knockback {
        if def.knockback_force() > 0.0 {
            let dir = try_normalized(target_pos - origin).unwrap_or_else(|| match fallback {
                KnockbackFallback::Direction(d) => d,
                KnockbackFallback::Random => random_unit(&mut ctx.rng.0),
            });
            sink.emit(Outcome::Knockback {
                target,
                force: def.knockback_force(),
                dir,
            });
        }
    }
    if options.stun && def.stun_duration() > 0.0 {
        sink.emit(Outcome::Stun {
            target,
            duration: def.stun_duration(),
        });
    }
    if taken.died {
        log::info!("{:?} 被 {} 擊殺", target, def.id());
        sink.emit(Outcome::Death {
            pos: target_pos,
            ent: target,
        });
    }
}

/// 治療施法者
pub(crate) fn apply_heal(
    ctx: &mut SkillContext,
    sink: &dyn EffectSink,
    target: Entity,
    def: &SkillDefinition,
) -> f32 {
    let healed = match ctx.vitals.get_mut(target) {
        Some(v) => v.heal(def.heal_amount()),
        None => return 0.0,
    };
    sink.emit(Outcome::Heal {
        target,
        amount: healed,
    });
    if let Some(pos) = ctx.position(target) {
        sink.request_effect(pos, Vec2::zero(), def.color(), 1.0, false);
    }
    healed
}

/// 觸發到期的延遲效果
pub(crate) fn apply_pending(ctx: &mut SkillContext, effect: PendingEffect) {
    match effect.kind {
        PendingEffectKind::MeleeStrike => melee::strike(ctx, &effect),
        PendingEffectKind::AreaBlast { center } => area::detonate(ctx, &effect, center),
        PendingEffectKind::SupportPulse => support::pulse(ctx, &effect),
    }
}

/// 延遲時間：技能覆寫優先，否則用引擎設定
pub(crate) fn delay_for(def: &SkillDefinition, fallback: f32) -> f32 {
    def.cast_delay().unwrap_or(fallback)
}

pub(crate) fn random_unit<R: Rng>(rng: &mut R) -> Vec2<f32> {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}
