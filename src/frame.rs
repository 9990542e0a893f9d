use crate::geo::{Vector3, Quaternion, Matrix3x3};

/// The distinguished name of the root inertial frame of a [`crate::timestep::Timestep`].
pub const UNIVERSAL_RF: &str = "UniversalRF";

/// An orthonormal right-handed triad `{i,j,k}`, optionally named.
///
/// Frames are value objects: two frames holding identical triads may
/// coexist under different names.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceFrame{
    pub name: String,
    i: Vector3,
    j: Vector3,
    k: Vector3,
}

impl ReferenceFrame{

    /// A new frame aligned with the canonical universal basis.
    pub fn canonical(name: impl Into<String>) -> ReferenceFrame{
        ReferenceFrame{
            name: name.into(),
            i: Vector3::new(1.0, 0.0, 0.0),
            j: Vector3::new(0.0, 1.0, 0.0),
            k: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn new(name: impl Into<String>, i: Vector3, j: Vector3, k: Vector3) -> ReferenceFrame{
        ReferenceFrame{ name: name.into(), i, j, k }
    }

    pub fn i_j_k(&self) -> (Vector3, Vector3, Vector3){
        (self.i, self.j, self.k)
    }

    pub fn set_i_j_k(&mut self, i: Vector3, j: Vector3, k: Vector3){
        self.i = i;
        self.j = j;
        self.k = k;
    }

    pub fn rename(&mut self, name: impl Into<String>){
        self.name = name.into();
    }

    /// Post-composes a rotation: `i,j,k <- q.i.q', q.j.q', q.k.q'`.
    pub fn rotate(&mut self, q: Quaternion){
        self.i = q.transform(self.i);
        self.j = q.transform(self.j);
        self.k = q.transform(self.k);
    }

    /// Resets to the canonical basis, then applies `rotate(q)`. This is how
    /// a body frame is re-synced to a freshly integrated attitude quaternion.
    pub fn rotate_abs(&mut self, q: Quaternion){
        self.i = Vector3::new(1.0, 0.0, 0.0);
        self.j = Vector3::new(0.0, 1.0, 0.0);
        self.k = Vector3::new(0.0, 0.0, 1.0);
        self.rotate(q);
    }

    /// Rotation matrix mapping this frame's coordinates to `other`'s.
    pub fn rot_to(&self, other: &ReferenceFrame) -> Matrix3x3{
        Matrix3x3::rot_from_frames(self.i, self.j, self.k, other.i, other.j, other.k)
    }

    /// `|i|=|j|=|k|=1`, mutually orthogonal, right-handed, all within `tol`.
    pub fn is_orthonormal_right_handed(&self, tol: f64) -> bool{
        let unit = |v: Vector3| (v.norm() - 1.0).abs() < tol;
        let orth = |a: Vector3, b: Vector3| a.dot(&b).abs() < tol;
        let right_handed = (self.i.cross(&self.j) - self.k).norm() < tol;

        unit(self.i) && unit(self.j) && unit(self.k)
            && orth(self.i, self.j) && orth(self.j, self.k) && orth(self.k, self.i)
            && right_handed
    }
}
