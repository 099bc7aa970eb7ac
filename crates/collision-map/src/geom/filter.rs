use crate::Vec3;

/// True iff `p` lies on or above the isocenter plane (`z >= iso.z`) and at least
/// `clearance_mm` away from the isocenter. Both bounds are inclusive.
#[inline]
pub fn is_collision_candidate(p: Vec3<f64>, iso: Vec3<f64>, clearance_mm: f64) -> bool {
    // Inferior points are outside the couch range this map covers.
    if p.z < iso.z {
        return false;
    }
    (p - iso).norm() >= clearance_mm
}

/// Mesh points relevant to head collisions, in mesh order (duplicates kept).
pub fn collision_points(
    mesh: &[Vec3<f64>],
    iso: Vec3<f64>,
    clearance_mm: f64,
) -> impl Iterator<Item = Vec3<f64>> + '_ {
    mesh.iter()
        .copied()
        .filter(move |&p| is_collision_candidate(p, iso, clearance_mm))
}
