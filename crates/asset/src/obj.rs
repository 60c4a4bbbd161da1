//! Minimal OBJ/MTL writer for positions, normals and texture coordinates.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::mesh::Mesh;

/// Write `mesh` as an OBJ file at `path`.
///
/// With `material = Some((mtl_file, name))` the file references that material library.
pub fn write_obj_to_path(
    mesh: &Mesh,
    path: impl AsRef<Path>,
    material: Option<(&str, &str)>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create OBJ file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer, material)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush OBJ file: {}", path.display()))?;
    log::info!(
        "Wrote {} points / {} triangles to {}",
        mesh.point_count(),
        mesh.triangle_count(),
        path.display()
    );
    Ok(())
}

/// Write `mesh` as OBJ text. Faces use the same 1-based index for v/vt/vn.
pub fn write_obj<W: Write>(mesh: &Mesh, mut w: W, material: Option<(&str, &str)>) -> Result<()> {
    writeln!(w, "# texsphere").context("Failed to write OBJ header")?;
    if let Some((library, name)) = material {
        writeln!(w, "mtllib {library}").context("Failed to write mtllib")?;
        writeln!(w, "usemtl {name}").context("Failed to write usemtl")?;
    }

    for p in mesh.points.iter() {
        writeln!(w, "v {} {} {}", p[0], p[1], p[2]).context("Failed to write vertex")?;
    }
    for [u, v] in &mesh.texcoords {
        writeln!(w, "vt {u} {v}").context("Failed to write texture coordinate")?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(w, "vn {x} {y} {z}").context("Failed to write normal")?;
    }
    for tri in &mesh.triangles {
        let [a, b, c] = tri.map(|i| i + 1);
        writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}").context("Failed to write face")?;
    }
    Ok(())
}

/// Write a single diffuse material that samples `texture`.
pub fn write_mtl<W: Write>(mut w: W, name: &str, texture: &str) -> Result<()> {
    writeln!(w, "newmtl {name}")?;
    writeln!(w, "Ka 1 1 1")?;
    writeln!(w, "Kd 1 1 1")?;
    writeln!(w, "map_Kd {texture}")?;
    Ok(())
}

pub fn write_mtl_to_path(path: impl AsRef<Path>, name: &str, texture: &str) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create MTL file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_mtl(&mut writer, name, texture)
        .with_context(|| format!("Failed to write MTL file: {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
