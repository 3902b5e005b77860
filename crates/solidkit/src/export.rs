//! File export.
//!
//! Two output formats:
//! - OpenSCAD source (`.scad`) for rendering in an external CSG engine
//! - JSON [`Document`] (`.json`) for inspection and interchange

use crate::{config::RenderConfig, BuildError};
use solidkit_ir::{scad, Document, Node};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialize a tree to OpenSCAD source using `config`.
pub fn to_scad(node: &Node, config: &RenderConfig) -> String {
    scad::to_scad(node, config.segments, config.header.as_deref())
}

/// Write a tree as OpenSCAD source to `path`.
pub fn write_scad(
    node: &Node,
    path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<(), BuildError> {
    let path = path.as_ref();
    let source = to_scad(node, config);
    write_text(path, &source)?;
    log::info!("SCAD file written to {}", path.display());
    Ok(())
}

/// Write a document as pretty-printed JSON to `path`.
pub fn write_json(doc: &Document, path: impl AsRef<Path>) -> Result<(), BuildError> {
    let path = path.as_ref();
    let json = doc.to_json()?;
    write_text(path, &json)?;
    log::info!("JSON document written to {}", path.display());
    Ok(())
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    log::debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidkit_ir::{Primitive, Vec3};
    use std::fs;

    fn sample() -> Node {
        Node::translate(
            Vec3::new(1.0, 2.0, 3.0),
            Primitive::Cube {
                size: Vec3::new(4.0, 5.0, 6.0),
            }
            .into(),
        )
    }

    #[test]
    fn test_scad_export() {
        let path = std::env::temp_dir().join("solidkit_export_test.scad");
        let config = RenderConfig {
            segments: 12,
            header: Some("export test".to_string()),
        };
        write_scad(&sample(), &path, &config).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("// export test\n$fn = 12;\n"));
        assert!(content.contains("translate([1, 2, 3]) {"));
        assert!(content.contains("cube([4, 5, 6]);"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json_export() {
        let path = std::env::temp_dir().join("solidkit_export_test.json");
        let doc = Document::new(sample());
        write_json(&doc, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let restored = Document::from_json(&content).unwrap();
        assert_eq!(restored, doc);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let path = std::env::temp_dir()
            .join("solidkit_no_such_dir")
            .join("out.scad");
        let err = write_scad(&sample(), &path, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::Io(_)));
    }
}
