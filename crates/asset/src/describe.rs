//! Plain-text listings of sphere settings and generated meshes.

use std::fmt;

use crate::{mesh::Mesh, sphere::SphereSpec};

/// One `Key: value` line per setting, each prefixed by `indent` spaces.
pub fn describe_spec(spec: &SphereSpec, indent: usize) -> String {
    let pad = " ".repeat(indent);
    [
        format!("{pad}Theta Resolution: {}\n", spec.theta_resolution()),
        format!("{pad}Phi Resolution: {}\n", spec.phi_resolution()),
        format!("{pad}Radius: {}\n", spec.radius()),
        format!("{pad}Output Points Precision: {}\n", spec.precision()),
    ]
    .concat()
}

pub fn describe_mesh(mesh: &Mesh, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::new();
    out.push_str(&format!("{pad}Number Of Points: {}\n", mesh.point_count()));
    out.push_str(&format!("{pad}Number Of Triangles: {}\n", mesh.triangle_count()));
    out.push_str(&format!("{pad}Points Precision: {}\n", mesh.precision()));
    out.push_str(&format!("{pad}Has Normals: {}\n", !mesh.normals.is_empty()));
    out.push_str(&format!(
        "{pad}Has Texture Coordinates: {}\n",
        !mesh.texcoords.is_empty()
    ));
    if let Some((min, max)) = bounds(mesh) {
        out.push_str(&format!(
            "{pad}Bounds: ({:.6}, {:.6}, {:.6}) - ({:.6}, {:.6}, {:.6})\n",
            min[0], min[1], min[2], max[0], max[1], max[2]
        ));
    }
    out
}

fn bounds(mesh: &Mesh) -> Option<([f64; 3], [f64; 3])> {
    let mut points = mesh.points.iter();
    let first = points.next()?;
    Some(points.fold((first, first), |(mut min, mut max), p| {
        for k in 0..3 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
        (min, max)
    }))
}

impl fmt::Display for SphereSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe_spec(self, 0))
    }
}
