// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Planar shadow projection.
//!
//! For a plane `n · p + d = 0` and a light travelling along `l`, a point `p` lands on the
//! plane at `p - ((n · p + d) / (n · l)) l`. Scaling by `n · l` gives the linear map
//! `(n · l) I - l nᵀ` with translation `-d l` and a constant `w = n · l`.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::normalize;

/// Minimum `|n · l|` for a usable projection. Lights closer to parallel with the plane
/// would throw the shadow to infinity.
const MIN_INCIDENCE: f32 = 1e-4;

/// Build the matrix projecting points onto the plane through `ground_pos` with normal
/// `ground_normal`, along `light_dir`.
///
/// Both directions are normalized before use; the arguments are copies, so the caller's
/// vectors are left as they were.
///
/// Returns `None` when either direction has zero length or the light is parallel to the
/// plane.
#[must_use]
pub fn shadow_matrix(
    light_dir: Vector3<f32>,
    ground_pos: Point3<f32>,
    ground_normal: Vector3<f32>,
) -> Option<Matrix4<f32>> {
    let light = normalize(light_dir)?;
    let normal = normalize(ground_normal)?;

    let (a, b, c) = (normal.x, normal.y, normal.z);
    let (ex, ey, ez) = (light.x, light.y, light.z);
    let d = -normal.dot(&ground_pos.coords);
    let w = a * ex + b * ey + c * ez;
    if w.abs() < MIN_INCIDENCE {
        return None;
    }

    #[rustfmt::skip]
    let m = Matrix4::new(
        b * ey + c * ez, -b * ex,          -c * ex,          -d * ex,
        -a * ey,         a * ex + c * ez,  -c * ey,          -d * ey,
        -a * ez,         -b * ez,          a * ex + b * ey,  -d * ez,
        0.0,             0.0,              0.0,              w,
    );
    Some(m)
}
