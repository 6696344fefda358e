use anyhow::{Context, Result};
use hpges::settings;
use hpges::{make_hpge, Registry};

fn main() -> Result<()> {
    let settings = settings::load_config()?;
    let metadata = settings
        .metadata
        .clone()
        .context("No metadata file given, use --metadata <PATH>")?;

    let mut registry = Registry::new();
    let detector = make_hpge(metadata.as_str(), &mut registry, settings.hpge_options())?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    println!("{}", settings);
    println!("Detector: {} ({})", detector.name(), detector.variant());
    println!("Material: {}", detector.material().name);
    println!("Profile points: {}", detector.profile().len());
    for (r, z) in detector.profile().r().iter().zip(detector.profile().z()) {
        println!("  r = {:>8.3} mm, z = {:>8.3} mm", r, z);
    }
    println!("Volume: {:.3} cm3", detector.volume() / 1000.0);
    println!("Mass: {:.1} g", detector.mass());

    Ok(())
}
