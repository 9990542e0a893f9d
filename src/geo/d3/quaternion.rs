// 3rd Party
use std::ops::Mul;
use derive_more;

// Crate
use super::{Vector3, Matrix3x3};

// ----------------------------------------------------------------------------
// Quaternions (Hamilton convention, body-to-universal attitude)
// ----------------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Mul,
    derive_more::Div,
    derive_more::Neg
)]
pub struct Quaternion{
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Quaternion{

    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Quaternion{
        return Quaternion{a, b, c, d}
    }

    pub fn of(num: f64) -> Quaternion{
        return Quaternion::new(num, num, num, num)
    }

    pub fn identity() -> Quaternion{
        return Quaternion::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn from_array(array: [f64; 4]) -> Quaternion{
        return Quaternion::new(array[0], array[1], array[2], array[3])
    }

    pub fn to_array(&self) -> [f64; 4]{
        return [self.a, self.b, self.c, self.d]
    }

    pub fn conjugate(&self) -> Quaternion{
        // https://en.wikipedia.org/wiki/Quaternion
        return Quaternion::new(self.a, -self.b, -self.c, -self.d)
    }

    pub fn norm(&self) -> f64{
        (self.a * self.a + self.b * self.b + self.c * self.c + self.d * self.d).sqrt()
    }

    pub fn normalize(&self) -> Quaternion{
        let n = self.norm();
        Quaternion::new(self.a / n, self.b / n, self.c / n, self.d / n)
    }

    /// q * v * q^-1, sandwich rotation of a pure-vector.
    pub fn transform(self, vec: Vector3) -> Vector3{
        let quat = (self * vec) * self.conjugate();
        return Vector3::new(quat.b, quat.c, quat.d)
    }

    /// q_dot = (1/2) * q * w, with w embedded as a pure quaternion.
    pub fn derivative(self, vec: Vector3) -> Quaternion{
        return self * vec / 2.0
    }

    pub fn error(&self, target: Quaternion) -> Quaternion{
        return target * self.conjugate()
    }

    pub fn to_dcm(&self) -> Matrix3x3{
        let _c11 =
            self.a.powf(2.0) + self.b.powf(2.0) - self.c.powf(2.0) - self.d.powf(2.0);
        let _c12 = 2.0 * ((self.b * self.c) - (self.a * self.d));
        let _c13 = 2.0 * ((self.b * self.d) + (self.a * self.c));

        let _c21 = 2.0 * ((self.b * self.c) + (self.a * self.d));
        let _c22 =
            self.a.powf(2.0) - self.b.powf(2.0) + self.c.powf(2.0) - self.d.powf(2.0);
        let _c23 = 2.0 * ((self.c * self.d) - (self.a * self.b));

        let _c31 = 2.0 * ((self.b * self.d) - (self.a * self.c));
        let _c32 = 2.0 * ((self.c * self.d) + (self.a * self.b));
        let _c33 =
            self.a.powf(2.0) - self.b.powf(2.0) - self.c.powf(2.0) + self.d.powf(2.0);

        return Matrix3x3::new(
            _c11, _c12, _c13,
            _c21, _c22, _c23,
            _c31, _c32, _c33,
        )
    }

    /// Composes `qz*qy*qx` from half-angles, standard aerospace ZYX convention.
    pub fn from_euler(phi: f64, theta: f64, psi: f64) -> Quaternion{
        let qx = Quaternion::new((phi / 2.0).cos(), (phi / 2.0).sin(), 0.0, 0.0);
        let qy = Quaternion::new((theta / 2.0).cos(), 0.0, (theta / 2.0).sin(), 0.0);
        let qz = Quaternion::new((psi / 2.0).cos(), 0.0, 0.0, (psi / 2.0).sin());
        qz * qy * qx
    }

    /// Inverse of `from_euler`: `atan2(2(wx+yz), 1-2(x^2+y^2))`,
    /// `asin(2(wy-zx))`, `atan2(2(wz+xy), 1-2(y^2+z^2))`.
    pub fn to_euler(&self) -> Vector3{
        let (w, x, y, z) = (self.a, self.b, self.c, self.d);

        let phi = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let theta = (2.0 * (w * y - z * x)).asin();
        let psi = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        Vector3::new(phi, theta, psi)
    }

    pub fn to_quat_from_dcm(dcm: &Matrix3x3) -> Quaternion{
        dcm.to_quat()
    }
}

impl Mul<Vector3> for Quaternion{
    type Output = Quaternion;
    fn mul(self, vec: Vector3) -> Quaternion{
        return Quaternion::new(
            (-self.b * vec.i) + (-self.c * vec.j) + (-self.d * vec.k),
            (self.a * vec.i) + (-self.d * vec.j) + (self.c * vec.k),
            (self.d * vec.i) + (self.a * vec.j) + (-self.b * vec.k),
            (-self.c * vec.i) + (self.b * vec.j) + (self.a * vec.k)
        )
    }
}

impl Mul<Quaternion> for Quaternion{
    type Output = Quaternion;
    fn mul(self, quat: Quaternion) -> Quaternion{
        return Quaternion::new(
          (self.a * quat.a) + (-self.b * quat.b) + (-self.c * quat.c) + (-self.d * quat.d),
          (self.b * quat.a) + (self.a * quat.b) + (-self.d * quat.c) + (self.c * quat.d),
          (self.c * quat.a) + (self.d * quat.b) + (self.a * quat.c) + (-self.b * quat.d),
          (self.d * quat.a) + (-self.c * quat.b) + (self.b * quat.c) + (self.a * quat.d)
        )
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::test::almost_equal_array;
    use std::f64::consts::PI;

    #[test]
    fn quat_90_transform(){
        let vec = Vector3::new(1.0, 2.0, 3.0);
        let quat = Quaternion::new(
            0.7071067811865476,
            0.0,
            0.7071067811865475,
            0.0
        );

        let transformation = quat.transform(vec).to_array();
        almost_equal_array(
            &transformation,
            &[3.0, 2.0, -1.0]
        );
    }

    #[test]
    fn quat_to_euler_identity(){
        let quat = Quaternion::identity();
        almost_equal_array(
            &quat.to_euler().to_array(),
            &[0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn euler_quat_roundtrip(){
        // Invariant 6: quat_to_euler(euler_to_quat(e)) == e (mod 2pi)
        let cases = [
            (0.4, 0.2, -0.6),
            (-1.0, 0.3, 2.0),
            (0.0, 0.0, 0.0),
            (1.5, -1.0, 0.8),
        ];

        for (phi, theta, psi) in cases{
            let quat = Quaternion::from_euler(phi, theta, psi);
            let back = quat.to_euler();
            almost_equal_array(&back.to_array(), &[phi, theta, psi]);
        }
    }

    #[test]
    fn quat_to_dcm_identity(){
        let quat = Quaternion::identity();
        let dcm = Matrix3x3::identity();
        almost_equal_array(
            &quat.to_dcm().to_array(),
            &dcm.to_array()
        );

        let quat = Quaternion{
            a: 0.9641015011871702,
            b: 0.02351519745119192,
            c: 0.2506948010244541,
            d: 0.0843056797421489
        };

        almost_equal_array(
            &quat.to_dcm().to_quat().to_array(),
            &quat.to_array()
        );
    }

    #[test]
    fn quat_derivative_x(){
        let mut quat = Quaternion::identity();
        let rate = Vector3::new(0.1, 0.0, 0.0);

        let increment = 1e-6;
        let amount = (10.0 / increment) as usize;

        for _ in 0..amount{
            quat += quat.derivative(rate) * increment;
        }
        almost_equal_array(
            &quat.normalize().to_euler().to_array(),
            &[1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn quat_normalize(){
        let quat = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        assert!((quat.normalize().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quat_rotate_full_turn_is_identity(){
        let quat = Quaternion::from_euler(2.0 * PI, 0.0, 0.0);
        let back = quat.to_dcm().to_quat();
        // Either q or -q represents the same rotation.
        let matches = (back.a - 1.0).abs() < 1e-6 || (back.a + 1.0).abs() < 1e-6;
        assert!(matches);
    }
}
