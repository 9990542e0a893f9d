use derive_more;

use crate::geo::{Vector3, Quaternion, Matrix3x3};
use crate::sim::Integrate;

/// The kinematics record shared by every [`crate::body::Body`] variant: the
/// 13-number state vector `[u,v,w, x,y,z, wx,wy,wz, qw,qx,qy,qz]`, the
/// 6-number input accumulator `U`, and the mass/inertia block the A/B
/// matrices act through.
///
/// `derive_more` operator overloads make the struct itself a vector space
/// over its numeric fields, so a multi-stage integrator (`Integrate::rk4`)
/// can combine whole `Dynamics` values with plain arithmetic; `get_derivative`
/// zeroes the mass/inertia fields so they pass through integration steps
/// unchanged (their own rate of change is handled separately, by `burn`).
#[derive(
    Debug,
    Clone,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Mul,
    derive_more::Div,
    derive_more::Neg,
)]
pub struct Dynamics{
    // State
    pub vel: Vector3,
    pub pos: Vector3,
    pub ang_vel: Vector3,
    pub quat: Quaternion,

    // Input accumulator U, universal frame
    pub force: Vector3,
    pub torque: Vector3,

    // Mass properties, body frame
    pub mass: f64,
    pub inertia: Matrix3x3,
    pub inv_inertia: Matrix3x3,
}

impl Dynamics{

    pub fn new(mass: f64, inertia: Matrix3x3) -> Dynamics{
        let inv_inertia = inertia.inv()
            .unwrap_or_else(|| panic!("inertia tensor {inertia:?} is singular"));

        Dynamics{
            vel: Vector3::zeros(),
            pos: Vector3::zeros(),
            ang_vel: Vector3::zeros(),
            quat: Quaternion::identity(),
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
            mass,
            inertia,
            inv_inertia,
        }
    }

    fn zeros() -> Dynamics{
        Dynamics{
            vel: Vector3::zeros(),
            pos: Vector3::zeros(),
            ang_vel: Vector3::zeros(),
            quat: Quaternion::of(0.0),
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
            mass: 0.0,
            inertia: Matrix3x3::of(0.0),
            inv_inertia: Matrix3x3::of(0.0),
        }
    }

    /// Recomputes the mass/inertia block after a mass change (fuel burn,
    /// stage separation). Leaves state untouched.
    pub fn set_mass_properties(&mut self, mass: f64, inertia: Matrix3x3){
        self.mass = mass;
        self.inertia = inertia;
        self.inv_inertia = inertia.inv()
            .unwrap_or_else(|| panic!("inertia tensor {inertia:?} is singular"));
    }

    pub fn add_force_universal(&mut self, f: Vector3){
        self.force += f;
    }

    pub fn add_torque_universal(&mut self, m: Vector3){
        self.torque += m;
    }

    pub fn add_force_local(&mut self, f: Vector3){
        self.force += self.quat.transform(f);
    }

    pub fn add_torque_local(&mut self, m: Vector3){
        self.torque += self.quat.transform(m);
    }

    fn check_finite(&self){
        let finite = self.vel.to_array().iter().all(|v| v.is_finite())
            && self.pos.to_array().iter().all(|v| v.is_finite())
            && self.ang_vel.to_array().iter().all(|v| v.is_finite())
            && self.quat.to_array().iter().all(|v| v.is_finite());
        if !finite{
            panic!("non-finite state detected in Dynamics: {self:?}");
        }
    }

    fn check_quat_norm(&self, tol: f64){
        let drift = (self.quat.norm() - 1.0).abs();
        if drift > tol{
            panic!("quaternion norm drifted by {drift} (tolerance {tol}) in Dynamics: {self:?}");
        }
    }

    /// Euler step per §4.3, normalizing the quaternion and resetting `U`
    /// afterward. Fatal on `m<=0`, singular inertia, or non-finite state.
    pub fn step_euler(&mut self, dt: f64){
        if self.mass <= 0.0{
            panic!("integration with non-positive mass {} is a programming error", self.mass);
        }
        let mut working = self.clone();
        let mut next = working.euler(dt);
        next.check_finite();
        next.quat = next.quat.normalize();
        next.check_quat_norm(1e-6);
        next.force = Vector3::zeros();
        next.torque = Vector3::zeros();
        *self = next;
    }

    /// Classical RK4 step per §4.3, re-evaluating `effects()` at every stage.
    pub fn step_rk4(&mut self, dt: f64){
        if self.mass <= 0.0{
            panic!("integration with non-positive mass {} is a programming error", self.mass);
        }
        let mut working = self.clone();
        let mut next = working.rk4(dt);
        next.check_finite();
        next.quat = next.quat.normalize();
        next.check_quat_norm(1e-6);
        next.force = Vector3::zeros();
        next.torque = Vector3::zeros();
        *self = next;
    }
}

impl Integrate for Dynamics{

    fn get_derivative(&self) -> Self{
        // s_dot = A(s)*s + B(m,I)*U, expressed directly rather than through
        // literal matrices: the A block is the velocity->position identity
        // plus quaternion kinematics (q_dot = 1/2 Omega(w) q); the B block
        // injects F/m and I^-1*M.
        let mut d = Dynamics::zeros();

        d.pos = self.vel;
        d.vel = self.force / self.mass;

        d.quat = self.quat.derivative(self.ang_vel);

        d.ang_vel = self.inv_inertia * self.torque;

        d
    }
}
