pub mod vector;
pub use vector::Vector3;
pub mod quaternion;
pub use quaternion::Quaternion;
pub mod matrix;
pub use matrix::Matrix3x3;

