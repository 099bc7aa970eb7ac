//! Synthetic head phantoms and SRS plans (seeded, reproducible).
//!
//! Purpose
//! - Provide realistic-looking inputs for tests, benchmarks and the `demo`
//!   command without a planning-system export.
//!
//! Model
//! - BODY: an ellipsoidal head shell on a cylindrical torso running inferior.
//! - VRT: a posterior half-ring head rest, jittered radially.
//! - CouchSurface: a flat grid posterior to the head, extending past the vertex.
//! - Beams: one setup field plus SRS arcs at several couch angles.
//!
//! Same `PhantomCfg` (incl. seed) gives the same plan, point for point.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{PI, TAU};

use crate::cfg::ARC_TECHNIQUE;
use crate::plan::{ArcDirection, Beam, ControlPoint, Plan, Structure, StructureSet};
use crate::Vec3;

/// Phantom configuration. Lengths in mm, patient coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PhantomCfg {
    pub seed: u64,
    pub isocenter: Vec3<f64>,
    /// Semi-axes (x, y, z) of the head ellipsoid, centered on the isocenter.
    pub head_radii: Vec3<f64>,
    pub head_points: usize,
    pub torso_radius: f64,
    pub torso_length: f64,
    pub torso_points: usize,
    pub headrest_radius: f64,
    pub headrest_points: usize,
    /// Couch top height (posterior offset from the isocenter).
    pub couch_depth: f64,
    pub couch_half_width: f64,
    /// Couch extent superior to the isocenter.
    pub couch_overhang: f64,
    pub couch_step: f64,
}

impl Default for PhantomCfg {
    fn default() -> Self {
        Self {
            seed: 2025,
            isocenter: Vec3::new(0.0, 0.0, 0.0),
            head_radii: Vec3::new(75.0, 95.0, 110.0),
            head_points: 2000,
            torso_radius: 180.0,
            torso_length: 600.0,
            torso_points: 2000,
            headrest_radius: 120.0,
            headrest_points: 200,
            couch_depth: 140.0,
            couch_half_width: 260.0,
            couch_overhang: 400.0,
            couch_step: 20.0,
        }
    }
}

/// Points on the ellipsoid `center + (rx cosθ sinφ, ry sinθ sinφ, rz cosφ)`,
/// with directions uniform on the unit sphere.
pub fn ellipsoid_shell<R: Rng>(
    center: Vec3<f64>,
    radii: Vec3<f64>,
    n: usize,
    rng: &mut R,
) -> Vec<Vec3<f64>> {
    (0..n)
        .map(|_| {
            let theta: f64 = rng.gen::<f64>() * TAU;
            let cos_phi: f64 = rng.gen_range(-1.0..=1.0);
            let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
            center
                + Vec3::new(
                    radii.x * theta.cos() * sin_phi,
                    radii.y * theta.sin() * sin_phi,
                    radii.z * cos_phi,
                )
        })
        .collect()
}

/// Lateral surface of a Z-aligned cylinder from `z_top` down to `z_top - length`.
pub fn torso_cylinder<R: Rng>(
    axis: Vec3<f64>,
    radius: f64,
    z_top: f64,
    length: f64,
    n: usize,
    rng: &mut R,
) -> Vec<Vec3<f64>> {
    (0..n)
        .map(|_| {
            let theta: f64 = rng.gen::<f64>() * TAU;
            let dz: f64 = rng.gen::<f64>() * length;
            Vec3::new(
                axis.x + radius * theta.cos(),
                axis.y + radius * theta.sin(),
                z_top - dz,
            )
        })
        .collect()
}

/// Posterior half ring (y >= center.y) in the axial plane through `center`,
/// radius jittered by up to 5%.
pub fn headrest_ring<R: Rng>(
    center: Vec3<f64>,
    radius: f64,
    n: usize,
    rng: &mut R,
) -> Vec<Vec3<f64>> {
    let n = n.max(2);
    (0..n)
        .map(|k| {
            let t = PI * k as f64 / (n - 1) as f64;
            let r = radius * (1.0 + rng.gen_range(-0.05..=0.05));
            center + Vec3::new(r * t.cos(), r * t.sin(), 0.0)
        })
        .collect()
}

/// Flat grid at `y`, spanning `[-half_width, half_width]` in X and `[z_min, z_max]` in Z.
pub fn couch_grid(y: f64, half_width: f64, z_min: f64, z_max: f64, step: f64) -> Vec<Vec3<f64>> {
    if !(step > 0.0) || z_max < z_min || half_width < 0.0 {
        return Vec::new();
    }
    let nx = (2.0 * half_width / step).floor() as usize;
    let nz = ((z_max - z_min) / step).floor() as usize;
    let mut out = Vec::with_capacity((nx + 1) * (nz + 1));
    for iz in 0..=nz {
        for ix in 0..=nx {
            out.push(Vec3::new(
                -half_width + ix as f64 * step,
                y,
                z_min + iz as f64 * step,
            ));
        }
    }
    out
}

fn arc(id: &str, iso: Vec3<f64>, couch: f64, dir: ArcDirection, start: f64, stop: f64) -> Beam {
    let cp = |gantry_angle| ControlPoint {
        patient_support_angle: couch,
        gantry_angle,
    };
    Beam {
        id: id.to_string(),
        is_setup_field: false,
        technique_id: ARC_TECHNIQUE.to_string(),
        isocenter: iso,
        gantry_direction: dir,
        control_points: vec![cp(start), cp((start + stop) / 2.0), cp(stop)],
    }
}

/// Four-arc SRS plan on a head phantom, with a kV setup field first.
pub fn demo_plan(cfg: &PhantomCfg) -> Plan {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let iso = cfg.isocenter;

    let mut body = ellipsoid_shell(iso, cfg.head_radii, cfg.head_points, &mut rng);
    let neck = iso - Vec3::new(0.0, 0.0, cfg.head_radii.z * 0.8);
    body.extend(torso_cylinder(
        neck,
        cfg.torso_radius,
        neck.z,
        cfg.torso_length,
        cfg.torso_points,
        &mut rng,
    ));

    let ring_center = iso + Vec3::new(0.0, 0.0, cfg.head_radii.z * 0.5);
    let vrt = headrest_ring(ring_center, cfg.headrest_radius, cfg.headrest_points, &mut rng);

    let couch = couch_grid(
        iso.y + cfg.couch_depth,
        cfg.couch_half_width,
        iso.z - cfg.torso_length,
        iso.z + cfg.couch_overhang,
        cfg.couch_step,
    );

    let setup = Beam {
        id: "kV".to_string(),
        is_setup_field: true,
        technique_id: "STATIC".to_string(),
        isocenter: iso,
        gantry_direction: ArcDirection::Unknown,
        control_points: vec![ControlPoint::default()],
    };

    Plan {
        id: "SRS_Demo".to_string(),
        structure_set: Some(StructureSet {
            id: "CT_Phantom".to_string(),
            structures: vec![
                Structure::new("BODY", body),
                Structure::new("VRT", vrt),
                Structure::new("CouchSurface", couch),
            ],
        }),
        beams: vec![
            setup,
            arc("Arc1", iso, 0.0, ArcDirection::Clockwise, 181.0, 359.0),
            arc("Arc2", iso, 45.0, ArcDirection::CounterClockwise, 179.0, 30.0),
            arc("Arc3", iso, 315.0, ArcDirection::Clockwise, 181.0, 330.0),
            arc("Arc4", iso, 90.0, ArcDirection::CounterClockwise, 179.0, 0.0),
        ],
    }
}
