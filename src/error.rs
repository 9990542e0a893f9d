use thiserror::Error;

/// Recoverable errors surfaced at the Timestep/System boundary.
///
/// Numerical faults (singular inertia, non-finite state, quaternion drift)
/// are programming errors per the integration contract and are raised by
/// `panic!` at the point of detection rather than through this enum — see
/// `physics::dynamics::Dynamics::step_euler`/`step_rk4`.
#[derive(Debug, Error)]
pub enum SimError{
    #[error("a body named '{0}' already exists in this Timestep")]
    DuplicateName(String),

    #[error("parent '{0}' was not found in this Timestep")]
    MissingParent(String),

    #[error("invalid mass for '{name}': {mass} kg")]
    InvalidMass{ name: String, mass: f64 },

    #[error("invalid radius for '{name}': {radius} m")]
    InvalidRadius{ name: String, radius: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to write snapshot {index} to {path}: {source}")]
    SnapshotWrite{ index: u64, path: String, #[source] source: bincode::Error },

    #[error("failed to read snapshot {index} from {path}: {source}")]
    SnapshotRead{ index: u64, path: String, #[source] source: bincode::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
