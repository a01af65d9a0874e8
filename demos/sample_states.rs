// Sample forward and backward states for the default detector setup and
// print a short summary.
//
// Usage: cargo run --example sample_states [config.json]

use mcsource::{SourceConfig, SourceError};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), SourceError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SourceConfig::from_file(path)?,
        None => SourceConfig::default(),
    };
    let source = config.build()?;
    let mut rng = config.rng();

    println!("=== Forward sampling ===");
    println!("Source volume: {:.6e} cm3", source.source_volume());
    let states = source.forward_batch(100_000, &mut rng);
    let mean_energy = states.iter().map(|s| s.energy).sum::<f64>() / states.len() as f64;
    println!("Mean energy: {:.4} MeV", mean_energy);
    for (i, state) in states.iter().take(3).enumerate() {
        println!(
            "  State {}: r = {:?} cm, u = {:?}, E = {} MeV",
            i + 1,
            state.position,
            state.direction,
            state.energy
        );
    }

    println!("\n=== Backward sampling (alpha = {}) ===", config.alpha);
    let (states, source_energies) = source.backward_batch(config.alpha, 100_000, &mut rng)?;
    let n = states.len() as f64;
    let mean_weight = states.iter().map(|s| s.weight).sum::<f64>() / n;
    let kept = states
        .iter()
        .zip(&source_energies)
        .filter(|(s, e)| s.energy == **e)
        .count();
    println!("Mean weight: {:.6e}", mean_weight);
    println!("Fraction at source energy: {:.4}", kept as f64 / n);

    Ok(())
}
