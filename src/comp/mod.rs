pub mod outcome;
pub mod phys;
pub mod projectile;
pub mod resources;
pub mod skill;
pub mod unit;

pub use self::{
    outcome::*,
    phys::*,
    projectile::*,
    resources::*,
    skill::*,
    unit::*,
};
