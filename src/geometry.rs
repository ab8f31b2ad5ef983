// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Vector and 4x4 matrix helpers.
//!
//! Matrices follow the column-vector convention used by classic GL utility code: every
//! `translate`/`scale`/`rotate` call post-multiplies, so `translate(identity(), ..)` followed
//! by `scale(..)` scales a point first and translates it second.

use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// Lengths below this are treated as zero when normalizing.
const NORM_EPSILON: f32 = 1e-6;

/// Normalize a vector, returning `None` for a (near) zero-length input.
#[must_use]
pub fn normalize(v: Vector3<f32>) -> Option<Vector3<f32>> {
    v.try_normalize(NORM_EPSILON)
}

/// The 4x4 identity matrix.
#[must_use]
pub fn identity() -> Matrix4<f32> {
    Matrix4::identity()
}

/// Post-multiply `m` by a translation.
#[must_use]
pub fn translate(m: &Matrix4<f32>, x: f32, y: f32, z: f32) -> Matrix4<f32> {
    m * Matrix4::new_translation(&Vector3::new(x, y, z))
}

/// Post-multiply `m` by a non-uniform scale.
#[must_use]
pub fn scale(m: &Matrix4<f32>, x: f32, y: f32, z: f32) -> Matrix4<f32> {
    m * Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
}

/// Post-multiply `m` by a rotation of `degrees` around `axis`.
///
/// A zero-length axis leaves `m` unchanged.
#[must_use]
pub fn rotate(m: &Matrix4<f32>, degrees: f32, axis: Vector3<f32>) -> Matrix4<f32> {
    match normalize(axis) {
        Some(axis) => {
            let rotation =
                Matrix4::from_axis_angle(&Unit::new_unchecked(axis), degrees.to_radians());
            m * rotation
        }
        None => *m,
    }
}

/// Matrix product `a * b`.
#[must_use]
pub fn multiply(a: &Matrix4<f32>, b: &Matrix4<f32>) -> Matrix4<f32> {
    a * b
}

/// Transform a point by `m`, dividing by the resulting `w`.
///
/// Returns `None` if `w` collapses to zero.
#[must_use]
pub fn transform_point(m: &Matrix4<f32>, p: &Point3<f32>) -> Option<Point3<f32>> {
    let h = m * p.to_homogeneous();
    if h.w.abs() <= f32::EPSILON {
        return None;
    }
    Some(Point3::new(h.x / h.w, h.y / h.w, h.z / h.w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: &Point3<f32>, b: &Point3<f32>) {
        assert!((a - b).norm() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn test_normalize() {
        let v = normalize(Vector3::new(1.0, 2.0, 1.0)).unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.y - 2.0 / 6.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero() {
        assert!(normalize(Vector3::zeros()).is_none());
    }

    #[test]
    fn test_translate_then_scale_order() {
        // translate * scale: scale is applied to the point first
        let m = scale(&translate(&identity(), 10.0, 0.0, 0.0), 2.0, 2.0, 2.0);
        let p = transform_point(&m, &Point3::new(1.0, 1.0, 1.0)).unwrap();
        assert_point_eq(&p, &Point3::new(12.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotate_z() {
        let m = rotate(&identity(), 90.0, Vector3::z());
        let p = transform_point(&m, &Point3::new(1.0, 0.0, 0.0)).unwrap();
        assert_point_eq(&p, &Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotate_zero_degrees_is_identity() {
        let m = rotate(&identity(), 0.0, Vector3::z());
        assert_eq!(m, identity());
    }

    #[test]
    fn test_multiply() {
        let a = translate(&identity(), 1.0, 2.0, 3.0);
        let b = translate(&identity(), -1.0, -2.0, -3.0);
        assert_eq!(multiply(&a, &b), identity());
    }

    #[test]
    fn test_transform_point_degenerate_w() {
        let mut m = identity();
        m[(3, 3)] = 0.0;
        assert!(transform_point(&m, &Point3::origin()).is_none());
    }
}
