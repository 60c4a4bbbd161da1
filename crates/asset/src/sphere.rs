//! Textured UV-sphere tessellation.
//!
//! The sphere axis is aligned with Z. Longitude (theta) is the outer loop and
//! colatitude (phi) the inner one, so points are laid out column by column:
//! `index = (phi_resolution + 1) * i + j`. The column at `theta = 2*pi`
//! duplicates the one at `theta = 0` so the seam gets its own `u = 1` texcoords.

use std::f64::consts::PI;

use corelib::DVec3;

use crate::mesh::{Mesh, Precision};

/// Smallest accepted theta/phi resolution.
pub const MIN_RESOLUTION: u32 = 4;
/// Largest accepted theta/phi resolution; keeps buffers bounded and `u32` indices in range.
pub const MAX_RESOLUTION: u32 = 1024;

/// Immutable sphere configuration. Resolutions are clamped on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereSpec {
    radius: f64,
    theta_resolution: u32,
    phi_resolution: u32,
    precision: Precision,
}

impl SphereSpec {
    pub fn new(radius: f64, theta_resolution: u32, phi_resolution: u32) -> Self {
        Self {
            radius,
            theta_resolution: theta_resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            phi_resolution: phi_resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
            precision: Precision::Single,
        }
    }

    #[inline]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of longitude bands.
    #[inline]
    pub fn theta_resolution(&self) -> u32 {
        self.theta_resolution
    }

    /// Number of latitude bands.
    #[inline]
    pub fn phi_resolution(&self) -> u32 {
        self.phi_resolution
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn expected_point_count(&self) -> usize {
        (self.phi_resolution as usize + 1) * (self.theta_resolution as usize + 1)
    }

    pub fn expected_triangle_count(&self) -> usize {
        2 * self.phi_resolution as usize * self.theta_resolution as usize
    }
}

impl Default for SphereSpec {
    fn default() -> Self {
        Self::new(0.5, 8, 8)
    }
}

/// Tessellate `spec` into a closed UV sphere with normals and texcoords.
///
/// Normals are the points divided by their length. A zero-length point (only
/// possible with a zero radius) keeps a divisor of 1.0 and yields a zero normal.
pub fn generate(spec: &SphereSpec) -> Mesh {
    let theta_res = spec.theta_resolution;
    let phi_res = spec.phi_resolution;
    let mut mesh = Mesh::with_capacity(
        spec.precision,
        spec.expected_point_count(),
        spec.expected_triangle_count(),
    );

    log::debug!(
        "Tessellating sphere: radius={}, theta_res={}, phi_res={}, precision={}",
        spec.radius,
        theta_res,
        phi_res,
        spec.precision
    );

    // NOTE: j * delta_phi only lands on pi/2 for even phi_res; the equator is
    // not forced onto a band boundary.
    let delta_phi = PI / phi_res as f64;
    let delta_theta = 2.0 * PI / theta_res as f64;

    for i in 0..=theta_res {
        let theta = i as f64 * delta_theta;
        let u = theta / (2.0 * PI);
        let (sin_theta, cos_theta) = theta.sin_cos();

        for j in 0..=phi_res {
            let phi = j as f64 * delta_phi;
            let ring_radius = spec.radius * phi.sin();
            let p = DVec3::new(
                ring_radius * cos_theta,
                ring_radius * sin_theta,
                spec.radius * phi.cos(),
            );
            mesh.points.push(p.to_array());

            let mut norm = p.length();
            if norm == 0.0 {
                norm = 1.0;
            }
            mesh.normals.push((p / norm).as_vec3().to_array());

            let v = 1.0 - phi / PI;
            mesh.texcoords.push([u as f32, v as f32]);
        }
    }

    let column = phi_res + 1;
    for i in 0..theta_res {
        for j in 0..phi_res {
            let base = column * i + j;
            let diagonal = base + column + 1;
            mesh.triangles.push([base, base + 1, diagonal]);
            mesh.triangles.push([base, diagonal, diagonal - 1]);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn length(v: [f32; 3]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn resolutions_are_clamped() {
        let spec = SphereSpec::new(1.0, 2, 0);
        assert_eq!(spec.theta_resolution(), 4);
        assert_eq!(spec.phi_resolution(), 4);
        assert_eq!(SphereSpec::new(1.0, 12, 5).phi_resolution(), 5);
    }

    #[test]
    fn huge_resolutions_are_clamped_to_max() {
        let spec = SphereSpec::new(1.0, 4, u32::MAX);
        assert_eq!(spec.phi_resolution(), MAX_RESOLUTION);
        assert_eq!(SphereSpec::new(1.0, 5000, 4).theta_resolution(), MAX_RESOLUTION);

        let mesh = generate(&spec);
        assert_eq!(mesh.point_count(), 5 * (MAX_RESOLUTION as usize + 1));
        assert!(mesh.is_consistent());
    }

    #[test]
    fn max_resolution_indices_fit_u32() {
        let spec = SphereSpec::new(1.0, MAX_RESOLUTION, MAX_RESOLUTION);
        assert!(spec.expected_point_count() <= u32::MAX as usize);
    }

    #[test]
    fn default_radius_and_resolution() {
        let spec = SphereSpec::default();
        assert_eq!(spec.radius(), 0.5);
        assert_eq!(spec.theta_resolution(), 8);
        assert_eq!(spec.phi_resolution(), 8);
        assert_eq!(spec.precision(), Precision::Single);
    }

    #[test]
    fn counts_follow_resolution() {
        for (theta, phi) in [(4, 4), (5, 7), (16, 9), (32, 32)] {
            let spec = SphereSpec::new(2.0, theta, phi);
            let mesh = generate(&spec);
            let expected = (phi as usize + 1) * (theta as usize + 1);
            assert_eq!(mesh.point_count(), expected);
            assert_eq!(mesh.normals.len(), expected);
            assert_eq!(mesh.texcoords.len(), expected);
            assert_eq!(mesh.triangle_count(), 2 * phi as usize * theta as usize);
            assert_eq!(mesh.point_count(), spec.expected_point_count());
            assert_eq!(mesh.triangle_count(), spec.expected_triangle_count());
            assert!(mesh.is_consistent());
        }
    }

    #[test]
    fn unit_sphere_four_by_four() {
        let mesh = generate(&SphereSpec::new(1.0, 4, 4));
        assert_eq!(mesh.point_count(), 25);
        assert_eq!(mesh.triangle_count(), 32);

        let north = mesh.points.get(0).unwrap();
        assert_abs_diff_eq!(north[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(north[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(north[2], 1.0, epsilon = 1e-12);
        assert_eq!(mesh.normals[0], [0.0, 0.0, 1.0]);

        // i = 0, j = 2 sits on the equator at +X.
        let equator = mesh.points.get(2).unwrap();
        assert_abs_diff_eq!(equator[0], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(equator[2], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn points_lie_on_the_sphere() {
        let radius = 3.5;
        let mesh = generate(&SphereSpec::new(radius, 13, 7).with_precision(Precision::Double));
        for p in mesh.points.iter() {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_abs_diff_eq!(r, radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh = generate(&SphereSpec::new(0.25, 9, 6));
        for n in &mesh.normals {
            assert_abs_diff_eq!(length(*n), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_radius_keeps_zero_normals() {
        let mesh = generate(&SphereSpec::new(0.0, 4, 4));
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 0.0]));
        assert!(mesh.normals.iter().all(|n| n.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn texcoords_span_the_unit_square() {
        let spec = SphereSpec::new(1.0, 6, 5);
        let mesh = generate(&spec);
        let column = spec.phi_resolution() as usize + 1;

        // v is 1 at the north pole and 0 at the south pole of every column.
        for i in 0..=spec.theta_resolution() as usize {
            assert_eq!(mesh.texcoords[column * i][1], 1.0);
            assert_abs_diff_eq!(mesh.texcoords[column * i + column - 1][1], 0.0, epsilon = 1e-7);
        }

        // u grows with the longitude index; the seam column closes at 1.
        let us: Vec<f32> = (0..=spec.theta_resolution() as usize)
            .map(|i| mesh.texcoords[column * i][0])
            .collect();
        assert_eq!(us[0], 0.0);
        assert!(us.windows(2).all(|w| w[0] < w[1]));
        assert_abs_diff_eq!(*us.last().unwrap(), 1.0, epsilon = 1e-7);
    }

    #[test]
    fn seam_column_duplicates_first_column() {
        let spec = SphereSpec::new(1.0, 8, 4).with_precision(Precision::Double);
        let mesh = generate(&spec);
        let column = spec.phi_resolution() as usize + 1;
        let last = column * spec.theta_resolution() as usize;
        for j in 0..column {
            let a = mesh.points.get(j).unwrap();
            let b = mesh.points.get(last + j).unwrap();
            for k in 0..3 {
                assert_abs_diff_eq!(a[k], b[k], epsilon = 1e-12);
            }
            assert_ne!(mesh.texcoords[j][0], mesh.texcoords[last + j][0]);
        }
    }

    #[test]
    fn triangle_pairs_share_the_quad_diagonal() {
        let mesh = generate(&SphereSpec::new(1.0, 4, 4));
        // base = 0 -> diagonal = 0 + 5 + 1
        assert_eq!(mesh.triangles[0], [0, 1, 6]);
        assert_eq!(mesh.triangles[1], [0, 6, 5]);
        // i = 1, j = 3 -> base = 8
        assert_eq!(mesh.triangles[2 * (4 + 3)], [8, 9, 14]);
        assert_eq!(mesh.triangles[2 * (4 + 3) + 1], [8, 14, 13]);
        let max = mesh.indices().into_iter().max().unwrap();
        assert_eq!(max as usize, mesh.point_count() - 1);
    }

    #[test]
    fn precision_only_changes_point_storage() {
        let spec = SphereSpec::new(1.0, 7, 5);
        let single = generate(&spec);
        let double = generate(&spec.with_precision(Precision::Double));
        assert_eq!(single.precision(), Precision::Single);
        assert_eq!(double.precision(), Precision::Double);
        assert_eq!(single.normals, double.normals);
        assert_eq!(single.texcoords, double.texcoords);
        assert_eq!(single.triangles, double.triangles);
    }

    #[test]
    fn generation_is_deterministic() {
        let spec = SphereSpec::new(1.25, 11, 9).with_precision(Precision::Double);
        assert_eq!(generate(&spec), generate(&spec));
    }
}
