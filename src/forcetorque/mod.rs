pub mod gravity;
pub mod thrust;

pub use gravity::gravity_force;
pub use thrust::{thrust, STANDARD_GRAVITY};
