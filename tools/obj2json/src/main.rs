//! obj2json - converts an OBJ + MTL pair into a JSON model record
//!
//! Usage: obj2json model.obj [--mtl model.mtl] [-o model.json] [--pretty]

use anyhow::{Context, Result};
use clap::Parser;
use obj_json::{Config, MissingMaterialPolicy, ModelRecord, NumericMode, ParseOptions};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "obj2json")]
#[command(about = "Convert a Wavefront OBJ + MTL pair into a JSON model record")]
#[command(version)]
struct Cli {
    /// Input OBJ file
    input: PathBuf,

    /// Material file (default: the OBJ's mtllib, then <input>.mtl)
    #[arg(long)]
    mtl: Option<PathBuf>,

    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Parse options file (.toml or .ron)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail on malformed numbers instead of writing NaN
    #[arg(long)]
    strict: bool,

    /// Use an empty material when the usemtl name has no block
    #[arg(long)]
    allow_missing_material: bool,

    /// Fail when the OBJ has no usemtl line
    #[arg(long)]
    require_material: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Options from the config file, with command line flags applied on top
    fn parse_options(&self) -> Result<ParseOptions> {
        let mut options = match &self.config {
            Some(path) => ParseOptions::load_from_file(path)
                .with_context(|| format!("Failed to load config {:?}", path))?,
            None => ParseOptions::default(),
        };

        if self.strict {
            options.numeric_mode = NumericMode::Strict;
        }
        if self.allow_missing_material {
            options.missing_material = MissingMaterialPolicy::Empty;
        }
        if self.require_material {
            options.require_material = true;
        }

        Ok(options)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    obj_json::logging::init_with_verbosity(cli.verbose);

    let record = convert(&cli)?;

    let json = if cli.pretty {
        record.to_json_pretty()?
    } else {
        record.to_json()?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write output: {:?}", path))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    log::info!(
        "Converted {:?}: {} vertices, {} triangles, {} normals, {} uvs",
        cli.input,
        record.geometry.vertices.len(),
        record.geometry.faces.len(),
        record.geometry.normals.len(),
        record.geometry.uvs.len()
    );

    Ok(())
}

/// Read the input files and parse them into a record
fn convert(cli: &Cli) -> Result<ModelRecord> {
    let mut options = cli.parse_options()?;

    let obj = fs::read(&cli.input).with_context(|| format!("Failed to read OBJ: {:?}", cli.input))?;
    let mtl = match read_material(cli, &obj)? {
        Some(mtl) => mtl,
        None => {
            options.missing_material = MissingMaterialPolicy::Empty;
            Vec::new()
        }
    };
    log::debug!("Parse options: {:?}", options);

    obj_json::parse_bytes(&obj, &mtl, &options).with_context(|| format!("Failed to convert {:?}", cli.input))
}

/// Read the material file for the given OBJ bytes
///
/// An explicit `--mtl` must exist. A guessed path that does not exist yields
/// `None`; the caller then converts with an empty material even when the OBJ
/// has a `usemtl` line.
fn read_material(cli: &Cli, obj: &[u8]) -> Result<Option<Vec<u8>>> {
    if let Some(path) = &cli.mtl {
        return fs::read(path)
            .map(Some)
            .with_context(|| format!("Failed to read MTL: {:?}", path));
    }

    let obj_text = String::from_utf8_lossy(obj);
    let path = default_mtl_path(&cli.input, obj_json::parse_material_library(&obj_text));

    if path.exists() {
        log::info!("Using material file {:?}", path);
        fs::read(&path)
            .map(Some)
            .with_context(|| format!("Failed to read MTL: {:?}", path))
    } else {
        log::warn!("Material file {:?} not found, converting with an empty material", path);
        Ok(None)
    }
}

/// Resolve the material path: `mtllib` relative to the OBJ, else the OBJ path with `.mtl`
fn default_mtl_path(input: &Path, mtllib: Option<&str>) -> PathBuf {
    match mtllib {
        Some(name) => input
            .parent()
            .map_or_else(|| PathBuf::from(name), |dir| dir.join(name)),
        None => input.with_extension("mtl"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mtl_path_uses_mtllib() {
        let path = default_mtl_path(Path::new("assets/models/ship.obj"), Some("ship_materials.mtl"));
        assert_eq!(path, PathBuf::from("assets/models/ship_materials.mtl"));
    }

    #[test]
    fn test_default_mtl_path_falls_back_to_extension() {
        let path = default_mtl_path(Path::new("assets/models/ship.obj"), None);
        assert_eq!(path, PathBuf::from("assets/models/ship.mtl"));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["obj2json", "cube.obj", "--strict", "--allow-missing-material"]);
        let options = cli.parse_options().unwrap();
        assert_eq!(options.numeric_mode, NumericMode::Strict);
        assert_eq!(options.missing_material, MissingMaterialPolicy::Empty);
        assert!(!options.require_material);
    }

    fn write_model(dir: &Path, obj: &str, mtl_name: &str, mtl: Option<&str>) -> PathBuf {
        let obj_path = dir.join("ship.obj");
        fs::write(&obj_path, obj).unwrap();
        if let Some(mtl) = mtl {
            fs::write(dir.join(mtl_name), mtl).unwrap();
        }
        obj_path
    }

    #[test]
    fn test_read_material_follows_mtllib_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let obj = "mtllib hull.mtl\nusemtl Hull\nv 0 0 0\n";
        let mtl = "newmtl Hull\nKd 0.3 0.3 0.3\n";
        let input = write_model(dir.path(), obj, "hull.mtl", Some(mtl));

        let cli = Cli::parse_from(["obj2json", input.to_str().unwrap()]);
        let bytes = read_material(&cli, obj.as_bytes()).unwrap();
        assert_eq!(bytes.as_deref(), Some(mtl.as_bytes()));

        let record = convert(&cli).unwrap();
        assert_eq!(record.material.diffuse, Some([0.3, 0.3, 0.3]));
    }

    #[test]
    fn test_read_material_missing_guess_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let obj = "mtllib hull.mtl\nusemtl Hull\nv 0 0 0\n";
        let input = write_model(dir.path(), obj, "hull.mtl", None);

        let cli = Cli::parse_from(["obj2json", input.to_str().unwrap()]);
        assert!(read_material(&cli, obj.as_bytes()).unwrap().is_none());

        // usemtl Hull has no block to match, the record still converts
        let record = convert(&cli).unwrap();
        assert!(record.material.is_empty());
        assert_eq!(record.geometry.vertices.len(), 1);
    }

    #[test]
    fn test_read_material_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_model(dir.path(), "v 0 0 0\n", "ship.mtl", None);
        let missing = dir.path().join("nowhere.mtl");

        let cli = Cli::parse_from(["obj2json", input.to_str().unwrap(), "--mtl", missing.to_str().unwrap()]);
        assert!(read_material(&cli, b"v 0 0 0\n").is_err());
        assert!(convert(&cli).is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::parse_from(["obj2json", "cube.obj", "-vv"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.output.is_none());
    }
}
