// main.rs
//
// Builds an engraved d20 from command-line options and writes it as STL.
// Run with RUST_LOG=debug to trace every engraved face.

use anyhow::{Context, Result};
use dicecarve::cli::{CliCommand, CliOptions, USAGE};
use dicecarve::font::{BlockFont, GlyphFont};
use dicecarve::{CSG, build_die};

fn load_font(
    opts: &CliOptions,
    mark_six_nine: bool,
    curve_segments: usize,
) -> Result<Box<dyn GlyphFont>> {
    match &opts.font {
        None => Ok(Box::new(BlockFont::new(mark_six_nine))),
        #[cfg(feature = "truetype-text")]
        Some(path) => {
            let font = dicecarve::font::TrueTypeFont::from_file(path, curve_segments)
                .with_context(|| format!("loading font {}", path.display()))?;
            Ok(Box::new(font))
        },
        #[cfg(not(feature = "truetype-text"))]
        Some(_) => {
            let _ = curve_segments;
            anyhow::bail!("--font needs the `truetype-text` feature")
        },
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match CliOptions::parse(&args) {
        Ok(CliCommand::Run(opts)) => opts,
        Ok(CliCommand::Help) => {
            print!("{USAGE}");
            return Ok(());
        },
        Err(err) => {
            eprint!("{USAGE}");
            return Err(err).context("invalid arguments");
        },
    };

    let params = opts.params().context("reading parameters")?;
    if opts.dump_config {
        println!("{}", params.to_json_pretty()?);
        return Ok(());
    }

    let font = load_font(&opts, params.mark_six_nine, params.curve_segments)?;
    let die = build_die(&params, font.as_ref()).context("building the die")?;

    die.mesh
        .write_stl(&opts.output, opts.format)
        .with_context(|| format!("writing {}", opts.output.display()))?;

    let bounds = die.mesh.bounding_box();
    log::info!(
        "wrote {} ({} faces numbered, extent {:.2} x {:.2} x {:.2})",
        opts.output.display(),
        die.numbers.len(),
        bounds.extents().x,
        bounds.extents().y,
        bounds.extents().z,
    );
    log::info!("volume {:.3}, engraved away {:.3}", die.volume(), die.removed_volume());
    if let Some(density) = opts.density {
        log::info!("estimated mass {:.2} g at {density} g/cm3", die.estimated_mass(density));
    }
    if !die.mesh.is_manifold() {
        // split faces leave T-junctions, which count as unmatched edges here
        log::debug!("{} unmatched triangle edges", die.mesh.boundary_edge_count());
    }

    Ok(())
}
