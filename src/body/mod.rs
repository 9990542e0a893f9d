pub mod celestial;
pub mod stage;
pub mod vessel;

pub use celestial::CelestialBody;
pub use vessel::Vessel;

use crate::config::Scheme;
use crate::geo::{Vector3, Quaternion, Matrix3x3};
use crate::physics::Dynamics;

/// Shared public contract of the distilled spec's "RigidBody (abstract
/// contract)": state/input access, accumulators, and the two integration
/// schemes, all expressed over the universal frame. Local-frame position
/// and velocity access (the `local` flag in §4.3) needs the enclosing
/// [`crate::timestep::Timestep`] to resolve the parent's frame and is
/// implemented there instead of on this trait.
pub trait RigidBody{
    fn name(&self) -> &str;
    fn parent_name(&self) -> Option<&str>;
    fn universal_rf(&self) -> &str;
    fn parent_rf(&self) -> &str;
    fn body_rf(&self) -> &str;

    fn dynamics(&self) -> &Dynamics;
    fn dynamics_mut(&mut self) -> &mut Dynamics;

    fn position(&self) -> Vector3{
        self.dynamics().pos
    }

    fn velocity(&self) -> Vector3{
        self.dynamics().vel
    }

    fn attitude(&self) -> Quaternion{
        self.dynamics().quat
    }

    fn angular_velocity_body(&self) -> Vector3{
        self.dynamics().ang_vel
    }

    fn angular_velocity_universal(&self) -> Vector3{
        self.attitude().transform(self.angular_velocity_body())
    }

    fn mass(&self) -> f64{
        self.dynamics().mass
    }

    fn inertia(&self) -> Matrix3x3{
        self.dynamics().inertia
    }

    /// Sets the body-frame angular velocity directly (used e.g. to give a
    /// celestial body its sidereal spin rate before a run starts).
    fn set_angular_velocity(&mut self, w: Vector3){
        self.dynamics_mut().ang_vel = w;
    }

    fn add_force(&mut self, f: Vector3, local: bool){
        if local{
            self.dynamics_mut().add_force_local(f);
        } else {
            self.dynamics_mut().add_force_universal(f);
        }
    }

    fn add_torque(&mut self, m: Vector3, local: bool){
        if local{
            self.dynamics_mut().add_torque_local(m);
        } else {
            self.dynamics_mut().add_torque_universal(m);
        }
    }

    /// `[u,v,w, x,y,z, wx,wy,wz, qw,qx,qy,qz]`.
    fn state_vector(&self) -> [f64; 13]{
        let d = self.dynamics();
        [
            d.vel.i, d.vel.j, d.vel.k,
            d.pos.i, d.pos.j, d.pos.k,
            d.ang_vel.i, d.ang_vel.j, d.ang_vel.k,
            d.quat.a, d.quat.b, d.quat.c, d.quat.d,
        ]
    }

    fn set_state_vector(&mut self, s: [f64; 13]){
        let d = self.dynamics_mut();
        d.vel = Vector3::new(s[0], s[1], s[2]);
        d.pos = Vector3::new(s[3], s[4], s[5]);
        d.ang_vel = Vector3::new(s[6], s[7], s[8]);
        d.quat = Quaternion::new(s[9], s[10], s[11], s[12]);
    }

    /// `[Fx,Fy,Fz, Mx,My,Mz]`, universal frame.
    fn input_vector(&self) -> [f64; 6]{
        let d = self.dynamics();
        [d.force.i, d.force.j, d.force.k, d.torque.i, d.torque.j, d.torque.k]
    }

    fn integrate(&mut self, scheme: Scheme, dt: f64){
        match scheme{
            Scheme::Euler => self.dynamics_mut().step_euler(dt),
            Scheme::Rk4 => self.dynamics_mut().step_rk4(dt),
        }
    }
}

/// The tagged variant replacing an inheritance hierarchy per the design
/// notes: `Celestial` and `Vessel` share the `Dynamics` record and dispatch
/// to kind-specific behaviour (mass/inertia rollup, NED/heading) where §4.4
/// and §4.5 diverge.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Body{
    Celestial(CelestialBody),
    Vessel(Vessel),
}

impl RigidBody for Body{
    fn name(&self) -> &str{
        match self{
            Body::Celestial(c) => c.name(),
            Body::Vessel(v) => v.name(),
        }
    }

    fn parent_name(&self) -> Option<&str>{
        match self{
            Body::Celestial(c) => c.parent_name(),
            Body::Vessel(v) => v.parent_name(),
        }
    }

    fn universal_rf(&self) -> &str{
        match self{
            Body::Celestial(c) => c.universal_rf(),
            Body::Vessel(v) => v.universal_rf(),
        }
    }

    fn parent_rf(&self) -> &str{
        match self{
            Body::Celestial(c) => c.parent_rf(),
            Body::Vessel(v) => v.parent_rf(),
        }
    }

    fn body_rf(&self) -> &str{
        match self{
            Body::Celestial(c) => c.body_rf(),
            Body::Vessel(v) => v.body_rf(),
        }
    }

    fn dynamics(&self) -> &Dynamics{
        match self{
            Body::Celestial(c) => c.dynamics(),
            Body::Vessel(v) => v.dynamics(),
        }
    }

    fn dynamics_mut(&mut self) -> &mut Dynamics{
        match self{
            Body::Celestial(c) => c.dynamics_mut(),
            Body::Vessel(v) => v.dynamics_mut(),
        }
    }
}
