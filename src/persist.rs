use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SimError, SimResult};
use crate::timestep::Timestep;

/// Hierarchical snapshot persistence (§4.7): a `<name>.psm` pointer file
/// marks a run, and `<name>_data/<index>.bin` holds one bincode-encoded
/// [`Timestep`] per saved index. A small manifest plus a directory of
/// per-step payloads, realized with `serde`+`bincode` rather than HDF5
/// since this crate has no HDF5 binding in its dependency stack.
pub struct Snapshot;

impl Snapshot{

    fn data_dir(save_dir: &Path, name: &str) -> PathBuf{
        save_dir.join(format!("{name}_data"))
    }

    fn pointer_file(save_dir: &Path, name: &str) -> PathBuf{
        save_dir.join(format!("{name}.psm"))
    }

    fn step_file(save_dir: &Path, name: &str, index: u64) -> PathBuf{
        Self::data_dir(save_dir, name).join(format!("{index}.bin"))
    }

    /// Writes `timestep` as `<index>.bin` under `<name>_data/`, creating the
    /// directory and touching the `<name>.psm` pointer file if this is the
    /// first save of the run.
    pub fn save(save_dir: &Path, name: &str, index: u64, timestep: &Timestep) -> SimResult<()>{
        let data_dir = Self::data_dir(save_dir, name);
        fs::create_dir_all(&data_dir)?;

        let pointer = Self::pointer_file(save_dir, name);
        if !pointer.exists(){
            fs::write(&pointer, b"")?;
        }

        let path = Self::step_file(save_dir, name, index);
        let bytes = bincode::serialize(timestep)
            .map_err(|source| SimError::SnapshotWrite{ index, path: path.display().to_string(), source })?;
        fs::write(&path, bytes)?;
        Ok(())
    }

    /// Loads the snapshot at `index`, then validates the reloaded frame/body
    /// relationships (§4.7's post-load wiring pass).
    pub fn load(save_dir: &Path, name: &str, index: u64) -> SimResult<Timestep>{
        let path = Self::step_file(save_dir, name, index);
        let bytes = fs::read(&path)?;
        let timestep: Timestep = bincode::deserialize(&bytes)
            .map_err(|source| SimError::SnapshotRead{ index, path: path.display().to_string(), source })?;
        timestep.validate_relationships()?;
        Ok(timestep)
    }

    /// Highest saved index under `<name>_data/`, if any snapshots exist.
    pub fn latest_index(save_dir: &Path, name: &str) -> SimResult<Option<u64>>{
        let data_dir = Self::data_dir(save_dir, name);
        if !data_dir.exists(){
            return Ok(None);
        }

        let mut max_index = None;
        for entry in fs::read_dir(&data_dir)?{
            let entry = entry?;
            if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()){
                if let Ok(index) = stem.parse::<u64>(){
                    max_index = Some(max_index.map_or(index, |m: u64| m.max(index)));
                }
            }
        }
        Ok(max_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hifitime::Epoch;

    #[test]
    fn round_trips_a_timestep(){
        let dir = std::env::temp_dir().join(format!("astrocore_persist_test_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let mut ts = Timestep::new(Epoch::from_gregorian_utc_at_midnight(2020, 3, 20));
        ts.add_celestial_body(crate::body::CelestialBody::new("Earth", 5.972e24, 6.371e6, None)).unwrap();
        ts.time = 123.0;

        Snapshot::save(&dir, "run", 0, &ts).unwrap();
        assert_eq!(Snapshot::latest_index(&dir, "run").unwrap(), Some(0));

        let loaded = Snapshot::load(&dir, "run", 0).unwrap();
        assert_eq!(loaded.time, 123.0);
        assert!(loaded.celestial_bodies().contains_key("Earth"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_snapshot_is_an_io_error(){
        let dir = std::env::temp_dir().join(format!("astrocore_persist_missing_{}", std::process::id()));
        let err = Snapshot::load(&dir, "nope", 0).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
