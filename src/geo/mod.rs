use std::f64::consts::PI;

pub const PI_DOUBLE: f64 = 2.0 * PI;
pub const PI_THREE_HALFS: f64 = 3.0 * PI / 2.0;
pub const PI_HALF: f64 = PI / 2.0;
pub const PI_QUARTER: f64 = PI / 4.0;

pub mod d3;
pub use d3::Vector3;
pub use d3::Matrix3x3;
pub use d3::Quaternion;

/// `rot_from_frames(A,B)`: the table of dot products of two orthonormal
/// triads, whose columns are B's basis vectors expressed in A's coordinates.
pub fn rot_from_frames(
    a: (Vector3, Vector3, Vector3),
    b: (Vector3, Vector3, Vector3),
) -> Matrix3x3{
    Matrix3x3::rot_from_frames(a.0, a.1, a.2, b.0, b.1, b.2)
}

/// `Rz(psi)*Ry(theta)*Rx(phi)`.
pub fn euler_to_rot(phi: f64, theta: f64, psi: f64) -> Matrix3x3{
    Matrix3x3::from_euler(phi, theta, psi)
}

/// Unit vector obtained by applying yaw `dir` then pitch `pitch` to
/// `[1,0,0]`: `[cos(pitch)*cos(dir), cos(pitch)*sin(dir), -sin(pitch)]`.
pub fn heading_to_unit_vec(dir: f64, pitch: f64) -> Vector3{
    Vector3::new(
        pitch.cos() * dir.cos(),
        pitch.cos() * dir.sin(),
        -pitch.sin(),
    )
}

#[cfg(test)]
mod kernel_tests {
    use super::*;

    #[test]
    fn heading_to_unit_vec_is_unit(){
        let v = heading_to_unit_vec(0.7, -0.3);
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn heading_to_unit_vec_zero_is_forward(){
        let v = heading_to_unit_vec(0.0, 0.0);
        assert!((v.i - 1.0).abs() < 1e-12);
        assert!(v.j.abs() < 1e-12);
        assert!(v.k.abs() < 1e-12);
    }
}