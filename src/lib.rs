pub mod body;
pub mod config;
pub mod elements;
pub mod error;
pub mod forcetorque;
pub mod frame;
pub mod geo;
pub mod persist;
pub mod physics;
pub mod sim;
pub mod system;
pub mod timestep;

#[cfg(test)]
pub mod test;

pub use body::{Body, CelestialBody, RigidBody, Vessel};
pub use config::{Scheme, SimConfig};
pub use error::{SimError, SimResult};
pub use system::System;
pub use timestep::Timestep;
