use crate::body::stage::Stage;
use crate::body::RigidBody;
use crate::frame::{ReferenceFrame, UNIVERSAL_RF};
use crate::geo::{rot_from_frames, Matrix3x3, Quaternion, Vector3};
use crate::physics::Dynamics;

/// A stacked-cylinder launch vehicle (§3, §4.5): an ordered list of stages,
/// the first of which is active, plus the derived mass properties and
/// reference geometry (centre of mass, centre of thrust) that list implies.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Vessel{
    name: String,
    parent_name: Option<String>,
    universal_rf: String,
    parent_rf: String,
    body_rf: String,

    stages: Vec<Stage>,
    dynamics: Dynamics,

    /// Centre-of-thrust offset in the vessel body frame, `(-L,0,0)`.
    cot: Vector3,

    /// Centre of mass at the last [`Vessel::recompute_mass_properties`]
    /// call, in vessel-fixed (nose-referenced) coordinates. Diffing against
    /// this on the next recompute is what lets a burn correct `dynamics.pos`
    /// by exactly the CoM's shift rather than reapplying it from scratch.
    last_com: Vector3,

    /// Cached NED frame, populated by [`Vessel::update_ned`]. `None` until
    /// the first update; stale once the vessel moves unless refreshed.
    #[serde(skip)]
    ned: Option<ReferenceFrame>,
}

impl Vessel{

    /// Builds a vessel from its stages (first is active) and recomputes all
    /// derived mass properties. `position` is the vessel's nose/reference
    /// point in universal coordinates, not yet normalized to its centre of
    /// mass; attitude starts at identity. See [`Vessel::init_position`].
    pub fn new(
        name: impl Into<String>,
        parent_name: Option<String>,
        stages: Vec<Stage>,
        position: Vector3,
    ) -> Vessel{
        assert!(!stages.is_empty(), "a vessel needs at least one stage");

        let name = name.into();
        let body_rf = format!("{name}RF");
        let parent_rf = match &parent_name{
            Some(p) => format!("{p}RF"),
            None => UNIVERSAL_RF.to_string(),
        };

        let mut vessel = Vessel{
            name,
            parent_name,
            universal_rf: UNIVERSAL_RF.to_string(),
            parent_rf,
            body_rf,
            stages,
            dynamics: Dynamics::new(1.0, Matrix3x3::identity()),
            cot: Vector3::zeros(),
            last_com: Vector3::zeros(),
            ned: None,
        };
        vessel.dynamics.pos = position;
        vessel.last_com = vessel.centre_of_mass();
        vessel.recompute_mass_properties();
        vessel
    }

    pub fn name(&self) -> &str{ &self.name }
    pub fn parent_name(&self) -> Option<&str>{ self.parent_name.as_deref() }
    pub fn universal_rf(&self) -> &str{ &self.universal_rf }
    pub fn parent_rf(&self) -> &str{ &self.parent_rf }
    pub fn body_rf(&self) -> &str{ &self.body_rf }
    pub fn dynamics(&self) -> &Dynamics{ &self.dynamics }
    pub fn dynamics_mut(&mut self) -> &mut Dynamics{ &mut self.dynamics }
    pub fn stages(&self) -> &[Stage]{ &self.stages }
    pub fn active_stage(&self) -> &Stage{ &self.stages[0] }
    pub fn active_stage_mut(&mut self) -> &mut Stage{ &mut self.stages[0] }
    pub fn cot(&self) -> Vector3{ self.cot }

    /// Total vessel length: sum of stage lengths.
    pub fn length(&self) -> f64{
        self.stages.iter().map(|s| s.length).sum()
    }

    /// Mass-weighted average of the per-stage reference points.
    pub fn centre_of_mass(&self) -> Vector3{
        let total = self.stages.iter().map(Stage::mass).sum::<f64>();
        let weighted = self.stages.iter()
            .fold(Vector3::zeros(), |acc, s| acc + s.position * s.mass());
        weighted / total
    }

    /// Shifts `dynamics.pos` by `R(body->universal)*CoM` so the position
    /// state becomes coincident with the vessel's centre of mass (§3, §4.7).
    /// Called exactly once, when the vessel is added to a
    /// [`crate::timestep::Timestep`]; calling it again would double-shift.
    pub fn init_position(&mut self){
        let com = self.centre_of_mass();
        self.dynamics.pos = self.dynamics.pos + self.dynamics.quat.transform(com);
    }

    /// Burns `delta_m` off the active stage, then recomputes mass, inertia,
    /// and the centre-of-mass-corrected body position.
    pub fn burn(&mut self, delta_m: f64){
        self.active_stage_mut().burn(delta_m);
        self.recompute_mass_properties();
    }

    /// Cylinder-approximation inertia about the (moving) centre of mass,
    /// using the outermost (last) stage's radius for the transverse terms:
    /// `Ix = (1/2) m r^2`, `Iy = Iz = (1/12) m (3 r^2 + L^2)`.
    fn recompute_mass_properties(&mut self){
        let mass = self.stages.iter().map(Stage::mass).sum::<f64>();
        let radius = self.stages.last().expect("at least one stage").radius;
        let length = self.length();

        let ix = 0.5 * mass * radius * radius;
        let iy = (1.0 / 12.0) * mass * (3.0 * radius * radius + length * length);
        let inertia = Matrix3x3::diagonal(ix, iy, iy);
        self.cot = Vector3::new(-length, 0.0, 0.0);

        // Moving-CoM correction: `dynamics.pos` tracks the vessel's true
        // centre of mass in universal coordinates, which shifts in
        // vessel-fixed coordinates as stages burn unevenly. Correct by
        // exactly the shift since the last recompute, so repeated calls
        // (e.g. one per burn) don't double-apply the correction.
        let com = self.centre_of_mass();
        let delta = com - self.last_com;
        self.dynamics.pos = self.dynamics.pos + self.dynamics.quat.transform(delta);
        self.last_com = com;

        self.dynamics.set_mass_properties(mass, inertia);
    }

    /// Computes the NED frame at the vessel's current position, given the
    /// parent celestial body's centre, radius, and north-pole direction
    /// (its body frame `k`, in universal coordinates). Per §4.1: `k = (Q-P)
    /// / |Q-P|`, `j = (Q-P) x (N-P)` normalized where `N = Q + R*k_parent`,
    /// `i = j x k`.
    pub fn update_ned(&mut self, parent_pos: Vector3, parent_radius: f64, parent_k_universal: Vector3){
        let p = self.dynamics.pos;
        let diff = parent_pos - p;
        let k = diff.to_unit();

        let north_pole = parent_pos + parent_k_universal * parent_radius;
        let diff_n = north_pole - p;
        let j = diff.cross(&diff_n).to_unit();
        let i = j.cross(&k);

        self.ned = Some(ReferenceFrame::new(format!("{}NED", self.name), i, j, k));
    }

    pub fn ned_frame(&self) -> Option<&ReferenceFrame>{
        self.ned.as_ref()
    }

    /// Heading (from north, about down) and pitch (elevation above the
    /// local horizontal) of the vessel's body-x axis, read from the cached
    /// NED frame. Panics if [`Vessel::update_ned`] was never called.
    pub fn heading_pitch(&self) -> (f64, f64){
        let ned = self.ned.as_ref().expect("call update_ned before heading_pitch");
        let (n, e, d) = ned.i_j_k();

        let body_x = self.dynamics.quat.transform(Vector3::new(1.0, 0.0, 0.0));
        let bx = Vector3::new(body_x.dot(&n), body_x.dot(&e), body_x.dot(&d));

        let xy_norm = (bx.i * bx.i + bx.j * bx.j).sqrt();
        let mut direction = if xy_norm < 1e-12{
            0.0
        } else {
            (bx.i / xy_norm).acos()
        };
        if bx.j < 0.0{
            direction += std::f64::consts::PI;
        }
        let pitch = -bx.k.asin();

        (direction, pitch)
    }

    /// Sets the vessel's attitude so its body-x points along `heading`/
    /// `pitch` relative to its NED frame, with zero roll about that
    /// direction. Requires [`Vessel::update_ned`] to have been called first.
    /// Supplemental convenience, grounded in pysamss's `Vessel.initAttitude`.
    pub fn init_attitude(&mut self, heading: f64, pitch: f64){
        let ned = self.ned.clone().expect("call update_ned before init_attitude");
        let (n, e, d) = ned.i_j_k();

        let universal_basis = (
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        );
        let ned_to_universal = rot_from_frames(universal_basis, (n, e, d));

        // Zero-roll attitude whose body-x points along heading_to_unit_vec
        // in the NED frame; Quaternion::from_euler(0, pitch, heading)
        // transforms [1,0,0] to exactly that direction.
        let local_attitude = Quaternion::from_euler(0.0, pitch, heading);

        self.dynamics.quat = ned_to_universal.to_quat() * local_attitude;
    }
}

impl RigidBody for Vessel{
    fn name(&self) -> &str{ Vessel::name(self) }
    fn parent_name(&self) -> Option<&str>{ Vessel::parent_name(self) }
    fn universal_rf(&self) -> &str{ Vessel::universal_rf(self) }
    fn parent_rf(&self) -> &str{ Vessel::parent_rf(self) }
    fn body_rf(&self) -> &str{ Vessel::body_rf(self) }
    fn dynamics(&self) -> &Dynamics{ Vessel::dynamics(self) }
    fn dynamics_mut(&mut self) -> &mut Dynamics{ Vessel::dynamics_mut(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_stage_vessel() -> Vessel{
        let stage = Stage::new(1000.0, 1.0, 2.0, Vector3::zeros());
        Vessel::new("Rocket", None, vec![stage], Vector3::zeros())
    }

    #[test]
    fn mass_rolls_up_from_stages(){
        let vessel = single_stage_vessel();
        assert!((vessel.dynamics().mass - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn cot_is_at_minus_length(){
        let vessel = single_stage_vessel();
        assert!((vessel.cot().i - (-2.0)).abs() < 1e-9);
        assert_eq!(vessel.cot().j, 0.0);
        assert_eq!(vessel.cot().k, 0.0);
    }

    #[test]
    fn burn_updates_mass_and_inertia(){
        let mut vessel = single_stage_vessel();
        let inertia_before = vessel.dynamics().inertia;

        vessel.burn(100.0);

        assert!((vessel.dynamics().mass - 900.0).abs() < 1e-9);
        assert!(vessel.dynamics().inertia.c11 < inertia_before.c11);
    }

    #[test]
    fn heading_and_pitch_straight_up(){
        // Vessel sitting on the +x point of a sphere at the origin, body-x
        // pointing radially outward (straight up).
        let mut vessel = single_stage_vessel();
        vessel.dynamics_mut().pos = Vector3::new(6.371e6, 0.0, 0.0);

        vessel.update_ned(Vector3::zeros(), 6.371e6, Vector3::new(0.0, 0.0, 1.0));

        let (direction, pitch) = vessel.heading_pitch();
        assert!(direction.abs() < 1e-9);
        assert!((pitch - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn init_attitude_then_heading_pitch_roundtrip(){
        let mut vessel = single_stage_vessel();
        vessel.dynamics_mut().pos = Vector3::new(6.371e6, 0.0, 0.0);
        vessel.update_ned(Vector3::zeros(), 6.371e6, Vector3::new(0.0, 0.0, 1.0));

        vessel.init_attitude(0.4, 0.2);
        vessel.update_ned(Vector3::zeros(), 6.371e6, Vector3::new(0.0, 0.0, 1.0));
        let (direction, pitch) = vessel.heading_pitch();

        assert!((direction - 0.4).abs() < 1e-6);
        assert!((pitch - 0.2).abs() < 1e-6);
    }
}
