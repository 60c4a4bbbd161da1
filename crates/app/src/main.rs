//! Entry point for texsphere.
//! Builds a textured UV sphere from CLI flags and optionally exports it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{
    Precision, SphereSpec, describe, generate, obj,
    sphere::MAX_RESOLUTION,
    texture::TextureData,
};
use corelib::CoreError;

const MATERIAL_NAME: &str = "sphere";
const TEXTURE_SIZE: u32 = 512;
const TEXTURE_CELL: u32 = 32;

/// Settings collected from the command line.
#[derive(Clone, Debug, PartialEq)]
struct Config {
    spec: SphereSpec,
    obj_path: Option<PathBuf>,
    texture_path: Option<PathBuf>,
    describe: bool,
}

fn parse_args<I>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = String>,
{
    let defaults = SphereSpec::default();
    let mut radius = defaults.radius();
    let mut theta_res = defaults.theta_resolution();
    let mut phi_res = defaults.phi_resolution();
    let mut precision = defaults.precision();
    let mut obj_path = None;
    let mut texture_path = None;
    let mut describe = false;

    // Accept: --radius=R --theta-resolution=N --phi-resolution=N --resolution=N
    //         --precision=single|double --obj=PATH --texture=PATH --describe
    for arg in args {
        if let Some(v) = arg.strip_prefix("--radius=") {
            radius = parse_radius(v)?;
        } else if let Some(v) = arg.strip_prefix("--theta-resolution=") {
            theta_res = parse_resolution("theta resolution", v)?;
        } else if let Some(v) = arg.strip_prefix("--phi-resolution=") {
            phi_res = parse_resolution("phi resolution", v)?;
        } else if let Some(v) = arg.strip_prefix("--resolution=") {
            theta_res = parse_resolution("resolution", v)?;
            phi_res = theta_res;
        } else if let Some(v) = arg.strip_prefix("--precision=") {
            precision = v.parse::<Precision>()?;
        } else if let Some(v) = arg.strip_prefix("--obj=") {
            obj_path = Some(PathBuf::from(v));
        } else if let Some(v) = arg.strip_prefix("--texture=") {
            texture_path = Some(PathBuf::from(v));
        } else if arg == "--describe" {
            describe = true;
        } else {
            log::warn!("Ignoring unknown argument '{}'", arg);
        }
    }

    if texture_path.is_some() && obj_path.is_none() {
        log::warn!("--texture given without --obj; the texture is written but not referenced");
    }

    let spec = SphereSpec::new(radius, theta_res, phi_res).with_precision(precision);
    if spec.theta_resolution() != theta_res || spec.phi_resolution() != phi_res {
        log::info!(
            "Resolutions clamped to range: theta={}, phi={}",
            spec.theta_resolution(),
            spec.phi_resolution()
        );
    }

    Ok(Config {
        spec,
        obj_path,
        texture_path,
        describe,
    })
}

fn parse_radius(value: &str) -> Result<f64, CoreError> {
    let radius = value
        .parse::<f64>()
        .map_err(|_| CoreError::invalid("radius", value, "not a number"))?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(CoreError::invalid("radius", value, "must be a positive finite number"));
    }
    Ok(radius)
}

fn parse_resolution(name: &'static str, value: &str) -> Result<u32, CoreError> {
    let resolution = value
        .parse::<u32>()
        .map_err(|_| CoreError::invalid(name, value, "not a non-negative integer"))?;
    if resolution > MAX_RESOLUTION {
        return Err(CoreError::invalid(name, value, "exceeds the maximum of 1024"));
    }
    Ok(resolution)
}

/// File name of `path` relative to the OBJ's directory, used inside OBJ/MTL records.
fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Path has no file name: {}", path.display()))
}

fn run(config: &Config) -> Result<()> {
    let mesh = generate(&config.spec);
    log::info!(
        "Generated sphere: {} points, {} triangles ({} precision)",
        mesh.point_count(),
        mesh.triangle_count(),
        mesh.precision()
    );

    if config.describe {
        print!("{}", describe::describe_spec(&config.spec, 0));
        print!("{}", describe::describe_mesh(&mesh, 2));
    }

    if let Some(texture_path) = &config.texture_path {
        TextureData::checker(TEXTURE_SIZE, TEXTURE_CELL).save_png(texture_path)?;
    }

    if let Some(obj_path) = &config.obj_path {
        let material = match &config.texture_path {
            Some(texture_path) => {
                let mtl_path = obj_path.with_extension("mtl");
                obj::write_mtl_to_path(&mtl_path, MATERIAL_NAME, &file_name(texture_path)?)?;
                Some(file_name(&mtl_path)?)
            }
            None => None,
        };
        obj::write_obj_to_path(
            &mesh,
            obj_path,
            material.as_deref().map(|lib| (lib, MATERIAL_NAME)),
        )?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_args(std::env::args().skip(1))?;
    log::info!(
        "Starting texsphere. radius={}, theta_res={}, phi_res={}, precision={}",
        config.spec.radius(),
        config.spec.theta_resolution(),
        config.spec.phi_resolution(),
        config.spec.precision()
    );

    run(&config)?;

    log::info!("Done.");
    Ok(())
}
