//! solidkit CLI - build a named design and write it as OpenSCAD or JSON.
//!
//! Logging goes through `env_logger`; the default level is `info` and can be
//! overridden with `RUST_LOG`, e.g. `RUST_LOG=solidkit=debug`.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use solidkit::RenderConfig;
use std::path::{Path, PathBuf};

mod designs;

#[derive(Parser)]
#[command(name = "solidkit")]
#[command(about = "Build parametric solids and write them for OpenSCAD", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a design and write it to disk
    Render {
        /// Design name (see `list`)
        design: String,
        /// Output file (default: output/<design>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Scad)]
        format: Format,
        /// Segment count for circular primitives, overrides the config file
        #[arg(long)]
        segments: Option<u32>,
        /// TOML render configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List the available designs
    List,
    /// Display information about a .json document
    Info {
        /// Path to the document
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// OpenSCAD source
    Scad,
    /// JSON tree document
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Scad => "scad",
            Format::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            design,
            output,
            format,
            segments,
            config,
        } => {
            let config = load_config(config.as_deref(), segments)?;
            let output =
                output.unwrap_or_else(|| default_output_path(&design, format));
            render(&design, &output, format, &config)?;
        }
        Commands::List => {
            for (name, description) in designs::DESIGNS {
                println!("{name:<12} {description}");
            }
        }
        Commands::Info { file } => {
            show_info(&file)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>, segments: Option<u32>) -> Result<RenderConfig> {
    let config = match path {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    Ok(match segments {
        Some(n) => config.with_segments(n)?,
        None => config,
    })
}

fn default_output_path(design: &str, format: Format) -> PathBuf {
    Path::new("output").join(format!("{design}.{}", format.extension()))
}

fn render(design: &str, output: &Path, format: Format, config: &RenderConfig) -> Result<()> {
    let Some(built) = designs::build(design) else {
        bail!("Unknown design: {design} (try `solidkit list`)");
    };
    let builder = built.with_context(|| format!("building {design}"))?;
    log::debug!("built {design}: {} nodes", builder.node().node_count());

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        Format::Scad => builder.write_scad(output, config)?,
        Format::Json => builder.write_json(output)?,
    }
    println!("Wrote {design} to {}", output.display());
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)?;
    let doc = solidkit_ir::Document::from_json(&json)?;

    println!("Document: {}", file.display());
    println!("Version: {}", doc.version);
    println!("Nodes: {}", doc.root.node_count());
    println!("Has holes: {}", doc.root.contains_holes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_arguments() {
        let cli = Cli::parse_from([
            "solidkit", "render", "grid", "-o", "out/g.json", "--format", "json", "--segments", "16",
        ]);
        match cli.command {
            Commands::Render {
                design,
                output,
                format,
                segments,
                config,
            } => {
                assert_eq!(design, "grid");
                assert_eq!(output, Some(PathBuf::from("out/g.json")));
                assert_eq!(format, Format::Json);
                assert_eq!(segments, Some(16));
                assert!(config.is_none());
            }
            _ => panic!("expected Render"),
        }
    }

    #[test]
    fn default_output_uses_format_extension() {
        assert_eq!(
            default_output_path("box", Format::Scad),
            PathBuf::from("output/box.scad")
        );
    }

    #[test]
    fn segments_override_config() {
        let config = load_config(None, Some(12)).unwrap();
        assert_eq!(config.segments, 12);
        assert!(load_config(None, Some(1)).is_err());
    }

    #[test]
    fn render_writes_and_info_reads() {
        let dir = std::env::temp_dir().join("solidkit_cli_test");
        let path = dir.join("pipes.json");
        render("pipes", &path, Format::Json, &RenderConfig::default()).unwrap();
        show_info(&path).unwrap();

        let scad = dir.join("pipes.scad");
        render("pipes", &scad, Format::Scad, &RenderConfig::default()).unwrap();
        assert!(std::fs::read_to_string(&scad).unwrap().contains("difference() {"));

        assert!(render("teapot", &scad, Format::Scad, &RenderConfig::default()).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
