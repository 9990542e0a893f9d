// 3rd Party
use std::ops::Mul;
use derive_more;

// Crate
use super::{Vector3, Quaternion};

// ----------------------------------------------------------------------------
// Matrix and direction cosines
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
pub struct Matrix3x3{
    pub c11: f64,
    pub c12: f64,
    pub c13: f64,
    pub c21: f64,
    pub c22: f64,
    pub c23: f64,
    pub c31: f64,
    pub c32: f64,
    pub c33: f64,
}

impl Matrix3x3{

    pub fn new(
        c11: f64, c12: f64, c13: f64,
        c21: f64, c22: f64, c23: f64,
        c31: f64, c32: f64, c33: f64,
    ) -> Matrix3x3{
        return Matrix3x3 {
            c11, c12, c13,
            c21, c22, c23,
            c31, c32, c33
        }
    }

    pub fn of(num: f64) -> Matrix3x3{
        return Matrix3x3::new(
            num, num, num,
            num, num, num,
            num, num, num
        )
    }

    pub fn identity() -> Matrix3x3{
        return Matrix3x3::new(
            1.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    pub fn diagonal(x: f64, y: f64, z: f64) -> Matrix3x3{
        return Matrix3x3::new(
            x, 0.0, 0.0,
            0.0, y, 0.0,
            0.0, 0.0, z,
        )
    }

    pub fn from_array(array: [f64; 9]) -> Matrix3x3{
        return Matrix3x3::new(
            array[0], array[1], array[2],
            array[3], array[4], array[5],
            array[6], array[7], array[8]
        )
    }

    /// `Rz(psi)*Ry(theta)*Rx(phi)`, standard right-hand convention.
    pub fn from_euler(phi: f64, theta: f64, psi: f64) -> Matrix3x3{
        let (sphi, cphi) = phi.sin_cos();
        let (stheta, ctheta) = theta.sin_cos();
        let (spsi, cpsi) = psi.sin_cos();

        Matrix3x3::new(
            cpsi * ctheta,
            cpsi * stheta * sphi - spsi * cphi,
            cpsi * stheta * cphi + spsi * sphi,

            spsi * ctheta,
            spsi * stheta * sphi + cpsi * cphi,
            spsi * stheta * cphi - cpsi * sphi,

            -stheta,
            ctheta * sphi,
            ctheta * cphi,
        )
    }

    /// Table of dot products between two orthonormal triads: columns of the
    /// result are B's basis vectors expressed in A's coordinates.
    pub fn rot_from_frames(
        a_i: Vector3, a_j: Vector3, a_k: Vector3,
        b_i: Vector3, b_j: Vector3, b_k: Vector3,
    ) -> Matrix3x3{
        Matrix3x3::new(
            a_i.dot(&b_i), a_i.dot(&b_j), a_i.dot(&b_k),
            a_j.dot(&b_i), a_j.dot(&b_j), a_j.dot(&b_k),
            a_k.dot(&b_i), a_k.dot(&b_j), a_k.dot(&b_k),
        )
    }

    pub fn norm(&self) -> f64{
        return(
            self.c11.powf(2.0) + self.c12.powf(2.0) + self.c13.powf(2.0)
            + self.c21.powf(2.0) + self.c22.powf(2.0) + self.c23.powf(2.0)
            + self.c31.powf(2.0) + self.c32.powf(2.0) + self.c33.powf(2.0)
        ).sqrt()
    }

    pub fn det(&self) -> f64{
        return
            (self.c11 * (self.c22 * self.c33 - self.c23 * self.c32))
            - (self.c12 * (self.c21 * self.c33 - self.c23 * self.c31))
            + (self.c13 * (self.c21 * self.c32 - self.c22 * self.c31))
    }

    pub fn adjugate(&self) -> Matrix3x3{
        return Matrix3x3::new(
            (self.c22 * self.c33) - (self.c32 * self.c23),
            -((self.c12 * self.c33) - (self.c32 * self.c13)),
            (self.c12 * self.c23) - (self.c22 * self.c13),
            -((self.c21 * self.c33) - (self.c31 * self.c23)),
            (self.c11 * self.c33) - (self.c31 * self.c13),
            -((self.c11 * self.c23) - (self.c21 * self.c13)),
            (self.c21 * self.c32) - (self.c31 * self.c22),
            -((self.c11 * self.c32) - (self.c31 * self.c12)),
            (self.c11 * self.c22) - (self.c21 * self.c12)
        )
    }

    pub fn inv(&self) -> Option<Matrix3x3>{
        let det = self.det();
        if det == 0.0{
            return None
        };
        return Some(self.adjugate() / det)
    }

    pub fn to_array(&self) -> [f64; 9]{
        return [
            self.c11, self.c12, self.c13,
            self.c21, self.c22, self.c23,
            self.c31, self.c32, self.c33
        ]
    }

    pub fn to_quat(&self) -> Quaternion{
        // Trace-based extraction.
        let tr = self.c11 + self.c22 + self.c33;

        let pa = 1.0 + tr;
        let pb = 1.0 + (2.0 * self.c11) - tr;
        let pc = 1.0 + (2.0 * self.c22) - tr;
        let pd = 1.0 + (2.0 * self.c33) - tr;
        let max_p = pa.max(pb).max(pc).max(pd);

        let mut quat = Quaternion::of(404.0);

        if pa == max_p{
            quat.a = pa.sqrt() / 2.0;
            quat.b = (self.c32 - self.c23) / (4.0 * quat.a);
            quat.c = (self.c13 - self.c31) / (4.0 * quat.a);
            quat.d = (self.c21 - self.c12) / (4.0 * quat.a);
        } else if pb == max_p{
            quat.b = pb.sqrt() / 2.0;
            quat.c = (self.c21 + self.c12) / (4.0 * quat.b);
            quat.d = (self.c13 + self.c31) / (4.0 * quat.b);
            quat.a = (self.c32 - self.c23) / (4.0 * quat.b);
        } else if pc == max_p{
            quat.c = pc.sqrt() / 2.0;
            quat.d = (self.c32 + self.c23) / (4.0 * quat.c);
            quat.a = (self.c13 - self.c31) / (4.0 * quat.c);
            quat.b = (self.c21 + self.c12) / (4.0 * quat.c);
        } else {
            quat.d = pd.sqrt() / 2.0;
            quat.a = (self.c21 - self.c12) / (4.0 * quat.d);
            quat.b = (self.c13 + self.c31) / (4.0 * quat.d);
            quat.c = (self.c32 + self.c23) / (4.0 * quat.d);
        };

        if quat.a <= 0.0{
            quat = -quat;
        };
        return quat
    }

    pub fn transpose(&self) -> Matrix3x3{
        return Matrix3x3::new(
            self.c11, self.c21, self.c31,
            self.c12, self.c22, self.c32,
            self.c13, self.c23, self.c33,
        )
    }

    pub fn transform(self, vec: Vector3) -> Vector3{
        return self * vec
    }

    pub fn error(self, target: Matrix3x3) -> Matrix3x3{
        return target - self
    }
}

impl Mul<Matrix3x3> for Matrix3x3{
    type Output = Matrix3x3;

    fn mul(self, b: Matrix3x3) -> Matrix3x3{
        let _c11 = (self.c11 * b.c11) + (self.c12 * b.c21) + (self.c13 * b.c31);
        let _c12 = (self.c11 * b.c12) + (self.c12 * b.c22) + (self.c13 * b.c32);
        let _c13 = (self.c11 * b.c13) + (self.c12 * b.c23) + (self.c13 * b.c33);

        let _c21 = (self.c21 * b.c11) + (self.c22 * b.c21) + (self.c23 * b.c31);
        let _c22 = (self.c21 * b.c12) + (self.c22 * b.c22) + (self.c23 * b.c32);
        let _c23 = (self.c21 * b.c13) + (self.c22 * b.c23) + (self.c23 * b.c33);

        let _c31 = (self.c31 * b.c11) + (self.c32 * b.c21) + (self.c33 * b.c31);
        let _c32 = (self.c31 * b.c12) + (self.c32 * b.c22) + (self.c33 * b.c32);
        let _c33 = (self.c31 * b.c13) + (self.c32 * b.c23) + (self.c33 * b.c33);

        return Matrix3x3::new(
            _c11, _c12, _c13,
            _c21, _c22, _c23,
            _c31, _c32, _c33,
        )
    }
}

impl Mul<Vector3> for Matrix3x3{
    type Output = Vector3;

    fn mul(self, vec: Vector3) -> Vector3{
        return Vector3::new(
            (self.c11 * vec.i) + (self.c12 * vec.j) + (self.c13 * vec.k),
            (self.c21 * vec.i) + (self.c22 * vec.j) + (self.c23 * vec.k),
            (self.c31 * vec.i) + (self.c32 * vec.j) + (self.c33 * vec.k)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::almost_equal_array;

    #[test]
    fn adjugate_from_example(){
        // https://en.wikipedia.org/wiki/Adjugate_matrix
        let matrix = Matrix3x3::new(
            -3.0, 2.0, -5.0,
            -1.0, 0.0, -2.0,
            3.0, -4.0, 1.0
        );

        almost_equal_array(
            &matrix.adjugate().to_array(),
            &[
                -8.0, 18.0, -4.0,
                -5.0, 12.0, -1.0,
                4.0, -6.0, 2.0
            ]
        )
    }

    #[test]
    fn matmul_from_example(){
        let matrix = Matrix3x3::new(
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0
        );
        let matrix2 = Matrix3x3::new(
            100.0, 200.0, 300.0,
            400.0, 500.0, 600.0,
            700.0, 800.0, 900.0
        );

        almost_equal_array(
            &(matrix * matrix2).to_array(),
            &[
                 3000.0,  3600.0,  4200.0,
                 6600.0,  8100.0,  9600.0,
                10200.0, 12600.0, 15000.0
            ]
        )
    }

    #[test]
    fn matmul_vector_from_example(){
        let matrix = Matrix3x3::new(
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0
        );
        let vector = Vector3::new(100.0, 200.0, 300.0);

        almost_equal_array(
            &(matrix * vector).to_array(),
            &[1400.0, 3200.0, 5000.0]
        )
    }

    #[test]
    fn dcm_to_quat_identity(){
        let dcm = Matrix3x3::identity();
        let quat = Quaternion::identity();
        almost_equal_array(
            &dcm.to_quat().to_array(),
            &quat.to_array()
        );
    }

    #[test]
    fn dcm_transpose(){
        let dcm = Matrix3x3::identity();
        let transpose_dcm = dcm.transpose();
        let identity_dcm = Matrix3x3::identity();
        let matmul = dcm * transpose_dcm;

        almost_equal_array(
            &matmul.to_array(),
            &identity_dcm.to_array()
        )
    }

    #[test]
    fn rot_from_frames_roundtrip(){
        // rot_from_frames(A,B) * rot_from_frames(B,A) = I
        let a_i = Vector3::new(1.0, 0.0, 0.0);
        let a_j = Vector3::new(0.0, 1.0, 0.0);
        let a_k = Vector3::new(0.0, 0.0, 1.0);

        let rot = Matrix3x3::from_euler(0.3, -0.4, 0.9);
        let b_i = rot * a_i;
        let b_j = rot * a_j;
        let b_k = rot * a_k;

        let r_ab = Matrix3x3::rot_from_frames(a_i, a_j, a_k, b_i, b_j, b_k);
        let r_ba = Matrix3x3::rot_from_frames(b_i, b_j, b_k, a_i, a_j, a_k);

        almost_equal_array(
            &(r_ab * r_ba).to_array(),
            &Matrix3x3::identity().to_array()
        );
    }
}
