use std::path::PathBuf;

use hifitime::Duration;

use crate::body::{Body, RigidBody};
use crate::config::SimConfig;
use crate::error::SimResult;
use crate::forcetorque::gravity_force;
use crate::persist::Snapshot;
use crate::timestep::Timestep;

/// Drives a [`Timestep`] forward from its current time to `config.end_time`
/// (§4.8), one step at a time
/// ([`crate::sim::integration`]'s `Integrate` trait handles the per-body
/// math; this struct owns the outer loop and its ordering).
pub struct System{
    pub name: String,
    pub config: SimConfig,
    pub current: Timestep,
}

impl System{

    pub fn new(name: impl Into<String>, config: SimConfig, current: Timestep) -> System{
        System{ name: name.into(), config, current }
    }

    fn save_directory(&self) -> PathBuf{
        self.config.save_dir.clone()
    }

    /// Runs to completion, returning the number of steps taken.
    ///
    /// Per step: accumulate gravity on every celestial body and vessel,
    /// snapshot (if due) before clearing the force accumulator via
    /// integration, integrate celestial bodies then vessels, re-sync each
    /// integrated body's frame, and advance time/wall-clock.
    pub fn simulate(&mut self) -> SimResult<u64>{
        let dt = self.config.dt;
        let iterations = ((self.config.end_time - self.current.time) / dt).floor().max(0.0) as u64;

        for i in 0..iterations{
            self.accumulate_gravity();

            if i % self.config.save_interval == 0{
                self.current.save_index = i / self.config.save_interval;
                Snapshot::save(&self.save_directory(), &self.name, self.current.save_index, &self.current)?;
            }

            self.integrate_step();

            self.current.time += dt;
            self.current.datetime += Duration::from_seconds(dt);

            let progress = (i as f64 / iterations.max(1) as f64) * 100.0;
            log::info!("{}: simulate progress {progress:.2}%", self.name);
        }

        log::info!("{}: simulate complete, {iterations} steps", self.name);
        Ok(iterations)
    }

    /// Every celestial-body pair, then every (celestial body, vessel) pair,
    /// per §4.8's two-stage interaction list. Vessels do not gravitationally
    /// act on anything (one-way gravity, per the `DESIGN.md` Open Question
    /// decision).
    fn accumulate_gravity(&mut self){
        let mut names: Vec<String> = self.current.celestial_bodies().keys().cloned().collect();
        names.sort();
        for i in 0..names.len(){
            for j in (i + 1)..names.len(){
                let (m_i, p_i) = {
                    let b = &self.current.celestial_bodies()[&names[i]];
                    (b.mass(), b.position())
                };
                let (m_j, p_j) = {
                    let b = &self.current.celestial_bodies()[&names[j]];
                    (b.mass(), b.position())
                };
                let force_on_j = gravity_force(m_i, p_i, m_j, p_j);

                self.current.celestial_bodies_mut().get_mut(&names[i]).unwrap().add_force(-force_on_j, false);
                self.current.celestial_bodies_mut().get_mut(&names[j]).unwrap().add_force(force_on_j, false);
            }
        }

        let mut celestial_names: Vec<String> = self.current.celestial_bodies().keys().cloned().collect();
        celestial_names.sort();
        let mut vessel_names: Vec<String> = self.current.vessels().keys().cloned().collect();
        vessel_names.sort();
        for vessel_name in &vessel_names{
            for body_name in &celestial_names{
                let (m_body, p_body) = {
                    let b = &self.current.celestial_bodies()[body_name];
                    (b.mass(), b.position())
                };
                let (m_vessel, p_vessel) = {
                    let v = &self.current.vessels()[vessel_name];
                    (v.mass(), v.position())
                };
                let force_on_vessel = gravity_force(m_body, p_body, m_vessel, p_vessel);
                self.current.vessels_mut().get_mut(vessel_name).unwrap().add_force(force_on_vessel, false);
            }
        }
    }

    fn integrate_step(&mut self){
        let scheme = self.config.scheme;
        let dt = self.config.dt;

        let mut celestial_names: Vec<String> = self.current.celestial_bodies().keys().cloned().collect();
        celestial_names.sort();
        for name in &celestial_names{
            self.current.celestial_bodies_mut().get_mut(name).unwrap().integrate(scheme, dt);
            self.current.resync_body_frame(name);
        }

        let mut vessel_names: Vec<String> = self.current.vessels().keys().cloned().collect();
        vessel_names.sort();
        for name in &vessel_names{
            self.current.vessels_mut().get_mut(name).unwrap().integrate(scheme, dt);
            self.current.resync_body_frame(name);
        }
    }

    /// All bodies as the tagged [`Body`] enum, for callers that want
    /// kind-uniform access without reaching into `Timestep`'s two maps.
    pub fn bodies(&self) -> Vec<Body>{
        let mut out: Vec<Body> = self.current.celestial_bodies().values().cloned().map(Body::Celestial).collect();
        out.extend(self.current.vessels().values().cloned().map(Body::Vessel));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::stage::Stage;
    use crate::body::{CelestialBody, Vessel};
    use crate::config::Scheme;
    use crate::geo::Vector3;
    use hifitime::Epoch;

    fn config(dt: f64, end_time: f64) -> SimConfig{
        SimConfig::new(
            dt, end_time, 10_000, Scheme::Rk4,
            Epoch::from_gregorian_utc_at_midnight(2020, 3, 20),
            std::env::temp_dir().join(format!("astrocore_system_test_{}", std::process::id())),
        ).unwrap()
    }

    #[test]
    fn two_body_gravity_pulls_bodies_together(){
        let mut ts = Timestep::new(Epoch::from_gregorian_utc_at_midnight(2020, 3, 20));
        let mut a = CelestialBody::new("A", 5.972e24, 6.371e6, None);
        a.dynamics_mut().pos = Vector3::new(-1.0e7, 0.0, 0.0);
        let mut b = CelestialBody::new("B", 5.972e24, 6.371e6, None);
        b.dynamics_mut().pos = Vector3::new(1.0e7, 0.0, 0.0);
        ts.add_celestial_body(a).unwrap();
        ts.add_celestial_body(b).unwrap();

        let initial_separation = 2.0e7;
        let mut system = System::new("test", config(1.0, 100.0), ts);
        system.simulate().unwrap();

        let a = &system.current.celestial_bodies()["A"];
        let b = &system.current.celestial_bodies()["B"];
        let separation = (b.position() - a.position()).norm();
        assert!(separation < initial_separation);
    }

    #[test]
    fn rk4_one_orbit_closure(){
        const G: f64 = 6.67408e-11;
        let mass = 5.972e24;
        let radius = 6.371e6;
        let r = radius + 404_000.0;
        let speed = 7660.0;

        let mut ts = Timestep::new(Epoch::from_gregorian_utc_at_midnight(2020, 3, 20));
        let earth = CelestialBody::new("Earth", mass, radius, None);
        ts.add_celestial_body(earth).unwrap();

        let stage = Stage::new(419_725.0, 1.0, 10.0, Vector3::zeros());
        let mut iss = Vessel::new("ISS", Some("Earth".to_string()), vec![stage], Vector3::new(r, 0.0, 0.0));
        iss.dynamics_mut().vel = Vector3::new(0.0, speed, 0.0);
        ts.add_vessel(iss).unwrap();

        let period = 2.0 * std::f64::consts::PI * (r.powi(3) / (G * mass)).sqrt();
        let mut system = System::new("test", config(1.0, period), ts);
        system.simulate().unwrap();

        let iss = &system.current.vessels()["ISS"];
        let position_error = (iss.position() - Vector3::new(r, 0.0, 0.0)).norm();
        let speed_error = (iss.velocity().norm() - speed).abs();

        assert!(position_error < 5.0e3, "position error {position_error} too large");
        assert!(speed_error < 1.0, "speed error {speed_error} too large");
    }

    #[test]
    fn vessel_falls_toward_celestial_body(){
        let mut ts = Timestep::new(Epoch::from_gregorian_utc_at_midnight(2020, 3, 20));
        let earth = CelestialBody::new("Earth", 5.972e24, 6.371e6, None);
        ts.add_celestial_body(earth).unwrap();

        let stage = Stage::new(1000.0, 1.0, 2.0, Vector3::zeros());
        let vessel = Vessel::new("Probe", Some("Earth".to_string()), vec![stage], Vector3::new(7.0e6, 0.0, 0.0));
        ts.add_vessel(vessel).unwrap();

        let mut system = System::new("test", config(1.0, 50.0), ts);
        system.simulate().unwrap();

        let probe = &system.current.vessels()["Probe"];
        assert!(probe.position().i < 7.0e6);
    }
}
