//! CPU-side mesh representation produced by the generators.

use std::{fmt, str::FromStr};

use bytemuck::{Pod, Zeroable};
use corelib::CoreError;

/// Storage type for point coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 32-bit float coordinates.
    #[default]
    Single,
    /// 64-bit float coordinates.
    Double,
}

impl FromStr for Precision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" | "float" | "f32" => Ok(Self::Single),
            "double" | "f64" => Ok(Self::Double),
            other => Err(CoreError::UnknownPrecision(other.to_string())),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single"),
            Self::Double => f.write_str("double"),
        }
    }
}

/// Point positions at the precision chosen when the mesh was built.
#[derive(Clone, Debug, PartialEq)]
pub enum Points {
    Single(Vec<[f32; 3]>),
    Double(Vec<[f64; 3]>),
}

impl Points {
    pub fn with_capacity(precision: Precision, capacity: usize) -> Self {
        match precision {
            Precision::Single => Self::Single(Vec::with_capacity(capacity)),
            Precision::Double => Self::Double(Vec::with_capacity(capacity)),
        }
    }

    pub fn precision(&self) -> Precision {
        match self {
            Self::Single(_) => Precision::Single,
            Self::Double(_) => Precision::Double,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single(p) => p.len(),
            Self::Double(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a point, narrowing to `f32` for single precision storage.
    pub fn push(&mut self, p: [f64; 3]) {
        match self {
            Self::Single(v) => v.push([p[0] as f32, p[1] as f32, p[2] as f32]),
            Self::Double(v) => v.push(p),
        }
    }

    /// Point `i` widened to `f64`.
    pub fn get(&self, i: usize) -> Option<[f64; 3]> {
        match self {
            Self::Single(v) => v
                .get(i)
                .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64]),
            Self::Double(v) => v.get(i).copied(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

impl Default for Points {
    fn default() -> Self {
        Self::Single(Vec::new())
    }
}

/// Interleaved vertex with position/normal/uv, laid out for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Indexed triangle mesh with parallel per-point attribute arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub points: Points,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn with_capacity(precision: Precision, points: usize, triangles: usize) -> Self {
        Self {
            points: Points::with_capacity(precision, points),
            normals: Vec::with_capacity(points),
            texcoords: Vec::with_capacity(points),
            triangles: Vec::with_capacity(triangles),
        }
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn precision(&self) -> Precision {
        self.points.precision()
    }

    /// Returns `true` if attribute arrays are parallel and every index hits a point.
    pub fn is_consistent(&self) -> bool {
        let n = self.points.len();
        self.normals.len() == n
            && self.texcoords.len() == n
            && self
                .triangles
                .iter()
                .flatten()
                .all(|&idx| (idx as usize) < n)
    }

    /// Interleaved vertices; double precision points are narrowed to `f32`.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.points
            .iter()
            .zip(&self.normals)
            .zip(&self.texcoords)
            .map(|((p, n), uv)| MeshVertex::new([p[0] as f32, p[1] as f32, p[2] as f32], *n, *uv))
            .collect()
    }

    /// Flat triangle list index buffer.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

/// Raw bytes of an interleaved vertex buffer, ready for upload.
pub fn vertex_bytes(vertices: &[MeshVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Raw bytes of a flat `u32` index buffer.
pub fn index_bytes(indices: &[u32]) -> &[u8] {
    bytemuck::cast_slice(indices)
}
