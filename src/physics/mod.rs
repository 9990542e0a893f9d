pub mod dynamics;
pub use dynamics::Dynamics;
