use crate::body::Vessel;
use crate::geo::Vector3;

/// Standard gravity used to convert specific impulse to thrust, `m/s^2`.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Body-frame force and torque due to the active stage's fuel burn (§4.6).
/// `T = g0*Isp*m_dot`; force direction comes from the active stage's gimbal
/// angles `(theta, psi)`; torque is about the vessel's centre of mass,
/// `(CoM - CoT) x force`. Burns `m_dot*dt` off the active stage on the way
/// out. Once the active stage is dry, returns zero force/torque and does
/// not call `burn` again.
pub fn thrust(vessel: &mut Vessel, m_dot: f64, isp: f64, dt: f64) -> (Vector3, Vector3){
    if vessel.active_stage().wetmass() <= 0.0{
        return (Vector3::zeros(), Vector3::zeros());
    }

    let (theta, psi) = vessel.active_stage().gimbal;
    let magnitude = STANDARD_GRAVITY * isp * m_dot;
    let force = Vector3::new(
        magnitude * psi.cos() * theta.cos(),
        magnitude * psi.sin(),
        magnitude * theta.sin(),
    );

    let moment_arm = vessel.centre_of_mass() - vessel.cot();
    let torque = moment_arm.cross(&force);

    vessel.burn(m_dot * dt);

    (force, torque)
}
