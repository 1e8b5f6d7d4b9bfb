pub mod cooldown_tick;
pub mod input_tick;
pub mod pending_effect_tick;
pub mod projectile_tick;
pub mod regen_tick;
