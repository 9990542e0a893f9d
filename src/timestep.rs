use std::collections::HashMap;

use hifitime::Epoch;

use crate::body::{CelestialBody, RigidBody, Vessel};
use crate::error::{SimError, SimResult};
use crate::frame::{ReferenceFrame, UNIVERSAL_RF};
use crate::geo::Vector3;

/// A single instant of the simulated system (§4.7): the universal frame and
/// every named frame/body hanging off it, plus the wall-clock and the
/// snapshot index used by [`crate::persist`]. Bodies and frames are
/// cross-referenced by name, not by pointer, so the whole thing is a plain
/// value that can be cloned, serialized, or held across a `System` step.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Timestep{
    pub time: f64,
    pub datetime: Epoch,
    pub save_index: u64,

    frames: HashMap<String, ReferenceFrame>,
    celestial_bodies: HashMap<String, CelestialBody>,
    vessels: HashMap<String, Vessel>,
}

impl Timestep{

    pub fn new(datetime: Epoch) -> Timestep{
        let mut frames = HashMap::new();
        frames.insert(UNIVERSAL_RF.to_string(), ReferenceFrame::canonical(UNIVERSAL_RF));

        Timestep{
            time: 0.0,
            datetime,
            save_index: 0,
            frames,
            celestial_bodies: HashMap::new(),
            vessels: HashMap::new(),
        }
    }

    pub fn celestial_bodies(&self) -> &HashMap<String, CelestialBody>{ &self.celestial_bodies }
    pub fn celestial_bodies_mut(&mut self) -> &mut HashMap<String, CelestialBody>{ &mut self.celestial_bodies }
    pub fn vessels(&self) -> &HashMap<String, Vessel>{ &self.vessels }
    pub fn vessels_mut(&mut self) -> &mut HashMap<String, Vessel>{ &mut self.vessels }
    pub fn frames(&self) -> &HashMap<String, ReferenceFrame>{ &self.frames }

    pub fn universal_frame(&self) -> &ReferenceFrame{
        self.frames.get(UNIVERSAL_RF).expect("UniversalRF is always present")
    }

    /// Adds a celestial body, wiring its `bodyRF`/`bodyFixedRF` frames (§4.7,
    /// §4.4's `bodyFixedRF` supplement) into the frame map. A body with no
    /// parent hangs directly off the universal frame; one with a parent
    /// inherits that parent's current `bodyRF` orientation as its starting
    /// point. Errors if the name is a duplicate or the named parent doesn't
    /// exist yet.
    pub fn add_celestial_body(&mut self, body: CelestialBody) -> SimResult<()>{
        if self.celestial_bodies.contains_key(body.name()) || self.vessels.contains_key(body.name()){
            return Err(SimError::DuplicateName(body.name().to_string()));
        }

        let starting_orientation = match body.parent_name(){
            None => self.universal_frame().clone(),
            Some(parent) => {
                if !self.celestial_bodies.contains_key(parent){
                    return Err(SimError::MissingParent(parent.to_string()));
                }
                self.frames.get(&format!("{parent}RF"))
                    .ok_or_else(|| SimError::MissingParent(parent.to_string()))?
                    .clone()
            }
        };

        let body_rf_name = body.body_rf().to_string();
        let mut body_rf = starting_orientation.clone();
        body_rf.rename(body_rf_name.clone());
        self.frames.insert(body_rf_name, body_rf);

        let fixed_rf_name = format!("{}FixedRF", body.name());
        let mut fixed_rf = starting_orientation;
        fixed_rf.rename(fixed_rf_name.clone());
        self.frames.insert(fixed_rf_name, fixed_rf);

        self.celestial_bodies.insert(body.name().to_string(), body);
        Ok(())
    }

    /// Adds a vessel, wiring its `bodyRF` the same way as a celestial body
    /// without a `bodyFixedRF` counterpart (vessels have no surface).
    pub fn add_vessel(&mut self, mut vessel: Vessel) -> SimResult<()>{
        if self.celestial_bodies.contains_key(vessel.name()) || self.vessels.contains_key(vessel.name()){
            return Err(SimError::DuplicateName(vessel.name().to_string()));
        }
        vessel.init_position();

        let starting_orientation = match vessel.parent_name(){
            None => self.universal_frame().clone(),
            Some(parent) => {
                if !self.celestial_bodies.contains_key(parent){
                    return Err(SimError::MissingParent(parent.to_string()));
                }
                self.frames.get(&format!("{parent}RF"))
                    .ok_or_else(|| SimError::MissingParent(parent.to_string()))?
                    .clone()
            }
        };

        let body_rf_name = vessel.body_rf().to_string();
        let mut body_rf = starting_orientation;
        body_rf.rename(body_rf_name.clone());
        self.frames.insert(body_rf_name, body_rf);

        self.vessels.insert(vessel.name().to_string(), vessel);
        Ok(())
    }

    /// Re-synchronizes a body's `bodyRF` (and `bodyFixedRF`, for celestial
    /// bodies) to its freshly integrated attitude. Called by
    /// [`crate::system::System`] once per body, once per step.
    pub fn resync_body_frame(&mut self, name: &str){
        let quat = self.celestial_bodies.get(name).map(|b| b.attitude())
            .or_else(|| self.vessels.get(name).map(|v| v.attitude()))
            .expect("resync_body_frame called with an unknown body name");

        if let Some(frame) = self.frames.get_mut(&format!("{name}RF")){
            frame.rotate_abs(quat);
        }
        if let Some(frame) = self.frames.get_mut(&format!("{name}FixedRF")){
            frame.rotate_abs(quat);
        }
    }

    /// Position of `name` relative to its parent, expressed in the parent's
    /// `bodyRF` coordinates. The local-frame counterpart to
    /// [`crate::body::RigidBody::position`], which is universal-frame only
    /// (§4.3's `local` flag, resolved here since it needs the frame graph).
    pub fn local_position(&self, name: &str) -> SimResult<Vector3>{
        let (pos, parent_name) = self.body_position_and_parent(name)?;
        let parent_pos = match &parent_name{
            None => Vector3::zeros(),
            Some(p) => self.body_position_and_parent(p)?.0,
        };
        let parent_rf = self.parent_frame_of(&parent_name)?;
        Ok(parent_rf.rot_to(self.universal_frame()) * (pos - parent_pos))
    }

    /// Velocity counterpart to [`Timestep::local_position`].
    pub fn local_velocity(&self, name: &str) -> SimResult<Vector3>{
        let (vel, parent_name) = self.body_velocity_and_parent(name)?;
        let parent_vel = match &parent_name{
            None => Vector3::zeros(),
            Some(p) => self.body_velocity_and_parent(p)?.0,
        };
        let parent_rf = self.parent_frame_of(&parent_name)?;
        Ok(parent_rf.rot_to(self.universal_frame()) * (vel - parent_vel))
    }

    fn body_position_and_parent(&self, name: &str) -> SimResult<(Vector3, Option<String>)>{
        if let Some(b) = self.celestial_bodies.get(name){
            return Ok((b.position(), b.parent_name().map(str::to_string)));
        }
        if let Some(v) = self.vessels.get(name){
            return Ok((v.position(), v.parent_name().map(str::to_string)));
        }
        Err(SimError::MissingParent(name.to_string()))
    }

    fn body_velocity_and_parent(&self, name: &str) -> SimResult<(Vector3, Option<String>)>{
        if let Some(b) = self.celestial_bodies.get(name){
            return Ok((b.velocity(), b.parent_name().map(str::to_string)));
        }
        if let Some(v) = self.vessels.get(name){
            return Ok((v.velocity(), v.parent_name().map(str::to_string)));
        }
        Err(SimError::MissingParent(name.to_string()))
    }

    fn parent_frame_of(&self, parent_name: &Option<String>) -> SimResult<&ReferenceFrame>{
        match parent_name{
            None => Ok(self.universal_frame()),
            Some(p) => {
                self.frames.get(&format!("{p}RF"))
                    .ok_or_else(|| SimError::MissingParent(p.clone()))
            }
        }
    }

    /// Re-derives `frames`/parent linkage after a [`crate::persist`] load:
    /// bincode round-trips every field verbatim, so this only needs to
    /// re-validate that every body's declared parent still resolves.
    pub fn validate_relationships(&self) -> SimResult<()>{
        for body in self.celestial_bodies.values(){
            if let Some(parent) = body.parent_name(){
                if !self.celestial_bodies.contains_key(parent){
                    return Err(SimError::MissingParent(parent.to_string()));
                }
            }
        }
        for vessel in self.vessels.values(){
            if let Some(parent) = vessel.parent_name(){
                if !self.celestial_bodies.contains_key(parent){
                    return Err(SimError::MissingParent(parent.to_string()));
                }
            }
        }
        Ok(())
    }
}
