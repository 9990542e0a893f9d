use crate::geo::Vector3;

/// A single stage of a stacked-cylinder vessel (§3, §4.5). The first stage
/// in a vessel's stage list is the active/burning one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stage{
    pub radius: f64,
    pub length: f64,
    /// Position of the stage reference point in the vessel body frame.
    pub position: Vector3,
    /// Gimbal angles `(theta, psi)` for the active stage's thrust producer.
    pub gimbal: (f64, f64),

    drymass: f64,
    wetmass: f64,
}

impl Stage{

    /// `drymass = 0.05*mass`, `wetmass = 0.95*mass`.
    pub fn new(mass: f64, radius: f64, length: f64, position: Vector3) -> Stage{
        Stage{
            radius,
            length,
            position,
            gimbal: (0.0, 0.0),
            drymass: 0.05 * mass,
            wetmass: 0.95 * mass,
        }
    }

    pub fn mass(&self) -> f64{
        self.drymass + self.wetmass
    }

    pub fn wetmass(&self) -> f64{
        self.wetmass
    }

    pub fn drymass(&self) -> f64{
        self.drymass
    }

    /// Decreases wetmass by `|delta_m|`; once wetmass reaches zero further
    /// burn requests are no-ops.
    pub fn burn(&mut self, delta_m: f64){
        if self.wetmass <= 0.0{
            return;
        }
        self.wetmass = (self.wetmass - delta_m.abs()).max(0.0);
    }
}
