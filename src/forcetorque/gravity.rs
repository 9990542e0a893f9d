use crate::geo::Vector3;

/// Newtonian gravitational constant, `m^3 kg^-1 s^-2`.
pub const G: f64 = 6.67408e-11;

/// Force on object 2 due to object 1's gravity (§4.6): pulls object 2
/// toward object 1, magnitude `G*m1*m2/r^2`.
pub fn gravity_force(mass1: f64, pos1: Vector3, mass2: f64, pos2: Vector3) -> Vector3{
    let separation = pos1 - pos2;
    let r = separation.norm();
    let magnitude = G * mass1 * mass2 / (r * r);
    separation.to_unit() * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_toward_the_other_body(){
        let f = gravity_force(5.972e24, Vector3::zeros(), 1000.0, Vector3::new(7.0e6, 0.0, 0.0));
        assert!(f.i < 0.0);
        assert_eq!(f.j, 0.0);
        assert_eq!(f.k, 0.0);
    }

    #[test]
    fn newtons_third_law(){
        let p1 = Vector3::new(1.0, 2.0, 3.0);
        let p2 = Vector3::new(4.0, -1.0, 0.0);
        let f12 = gravity_force(10.0, p1, 20.0, p2);
        let f21 = gravity_force(20.0, p2, 10.0, p1);
        assert!((f12 + f21).norm() < 1e-12);
    }

    #[test]
    fn magnitude_matches_newtons_law(){
        let m1 = 5.972e24;
        let m2 = 7.342e22;
        let r = 3.844e8;
        let f = gravity_force(m1, Vector3::zeros(), m2, Vector3::new(r, 0.0, 0.0));
        let expected = G * m1 * m2 / (r * r);
        assert!((f.norm() - expected).abs() / expected < 1e-12);
    }
}
