use astrocore::body::stage::Stage;
use astrocore::geo::Vector3;
use astrocore::{CelestialBody, RigidBody, Scheme, SimConfig, System, Timestep, Vessel};

/// Drops a single-stage vessel from low orbit around a single celestial
/// body and runs it forward, logging progress as it goes.
fn main() {
    pretty_env_logger::init();

    let datetime = hifitime::Epoch::from_gregorian_utc_at_midnight(2020, 3, 20);
    let mut timestep = Timestep::new(datetime);

    let earth = CelestialBody::new("Earth", 5.972e24, 6.371e6, None);
    timestep.add_celestial_body(earth).expect("Earth has no parent to fail on");

    let stage = Stage::new(10_000.0, 1.8, 12.0, Vector3::zeros());
    let vessel = Vessel::new(
        "Probe",
        Some("Earth".to_string()),
        vec![stage],
        Vector3::new(6.371e6 + 2.0e5, 0.0, 0.0),
    );
    timestep.add_vessel(vessel).expect("Earth was just added above");

    let config = SimConfig::new(
        0.5,
        600.0,
        20,
        Scheme::Rk4,
        datetime,
        "astrocore_run",
    ).expect("hand-written config is valid");

    let mut system = System::new("demo", config, timestep);
    let steps = system.simulate().expect("run completes without a recoverable error");

    let probe = &system.current.vessels()["Probe"];
    log::info!(
        "ran {steps} steps; Probe is now at {:?}, {:.1} m/s",
        probe.position(),
        probe.velocity().norm(),
    );
}
