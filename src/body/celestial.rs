use crate::body::RigidBody;
use crate::frame::UNIVERSAL_RF;
use crate::geo::Matrix3x3;
use crate::physics::Dynamics;

/// Sphere mass+radius specialization of the rigid-body contract (§4.4).
/// Inertia is always the solid-uniform-sphere tensor; attitude evolves
/// freely under whatever spin the caller sets before the run starts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CelestialBody{
    name: String,
    parent_name: Option<String>,
    universal_rf: String,
    parent_rf: String,
    body_rf: String,

    pub radius: f64,
    dynamics: Dynamics,
}

impl CelestialBody{

    /// Inertia is derived from mass and radius; callers never supply it
    /// directly.
    pub fn new(
        name: impl Into<String>,
        mass: f64,
        radius: f64,
        parent_name: Option<String>,
    ) -> CelestialBody{
        let name = name.into();
        let body_rf = format!("{name}RF");
        let parent_rf = match &parent_name{
            Some(p) => format!("{p}RF"),
            None => UNIVERSAL_RF.to_string(),
        };

        CelestialBody{
            dynamics: Dynamics::new(mass, Self::sphere_inertia(mass, radius)),
            name,
            parent_name,
            universal_rf: UNIVERSAL_RF.to_string(),
            parent_rf,
            body_rf,
            radius,
        }
    }

    /// `(2/5) * M * R^2 * diag(1,1,1)`.
    pub fn sphere_inertia(mass: f64, radius: f64) -> Matrix3x3{
        let i = (2.0 / 5.0) * mass * radius * radius;
        Matrix3x3::diagonal(i, i, i)
    }

    pub fn name(&self) -> &str{ &self.name }
    pub fn parent_name(&self) -> Option<&str>{ self.parent_name.as_deref() }
    pub fn universal_rf(&self) -> &str{ &self.universal_rf }
    pub fn parent_rf(&self) -> &str{ &self.parent_rf }
    pub fn body_rf(&self) -> &str{ &self.body_rf }
    pub fn dynamics(&self) -> &Dynamics{ &self.dynamics }
    pub fn dynamics_mut(&mut self) -> &mut Dynamics{ &mut self.dynamics }
}

impl RigidBody for CelestialBody{
    fn name(&self) -> &str{ CelestialBody::name(self) }
    fn parent_name(&self) -> Option<&str>{ CelestialBody::parent_name(self) }
    fn universal_rf(&self) -> &str{ CelestialBody::universal_rf(self) }
    fn parent_rf(&self) -> &str{ CelestialBody::parent_rf(self) }
    fn body_rf(&self) -> &str{ CelestialBody::body_rf(self) }
    fn dynamics(&self) -> &Dynamics{ CelestialBody::dynamics(self) }
    fn dynamics_mut(&mut self) -> &mut Dynamics{ CelestialBody::dynamics_mut(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_like_sphere_inertia(){
        let earth = CelestialBody::new("Earth", 5.972e24, 6.371e6, None);
        let i = earth.dynamics().inertia;
        let expected = (2.0 / 5.0) * 5.972e24 * 6.371e6 * 6.371e6;
        assert!((i.c11 - expected).abs() / expected < 1e-9);
        assert!((i.c22 - expected).abs() / expected < 1e-9);
        assert!((i.c33 - expected).abs() / expected < 1e-9);
        assert_eq!(i.c12, 0.0);
    }

    #[test]
    fn frame_naming_without_parent(){
        let earth = CelestialBody::new("Earth", 1.0, 1.0, None);
        assert_eq!(earth.parent_rf(), "UniversalRF");
        assert_eq!(earth.body_rf(), "EarthRF");
    }

    #[test]
    fn frame_naming_with_parent(){
        let moon = CelestialBody::new("Moon", 1.0, 1.0, Some("Earth".to_string()));
        assert_eq!(moon.parent_rf(), "EarthRF");
        assert_eq!(moon.body_rf(), "MoonRF");
    }
}
