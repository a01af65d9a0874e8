// Statistical checks of the forward (unbiased) source: containment,
// uniform density outside the detector and isotropic directions.

use mcsource::units::{CM, M};
use mcsource::{DetectorSource, FastRng, GeometryExtents, ParticleState, SpectrumTable};

fn crowded_source() -> DetectorSource {
    // 10 m cube of air holding an 8 m cube detector centred at z = 0
    let extents =
        GeometryExtents::new([10.0 * M; 3], 1.0 * M, [8.0 * M; 3], 0.5 * M).unwrap();
    DetectorSource::new(extents, SpectrumTable::radon_progeny())
}

#[test]
fn test_positions_inside_air_outside_detector() {
    let source = crowded_source();
    let air = source.extents.air_box();
    let detector = source.extents.detector_box();
    assert!(source.extents.detector_offset().abs() < 1e-9);

    let mut rng = FastRng::new(2024);
    for state in source.forward_batch(50_000, &mut rng) {
        let p = state.position.map(|x| x * CM);
        assert!(air.contains(p), "position {:?} outside air", state.position);
        assert!(!detector.contains(p), "position {:?} inside detector", state.position);
    }
}

#[test]
fn test_density_is_uniform_outside_detector() {
    let source = crowded_source();
    let n = 50_000;
    let mut rng = FastRng::new(7);
    let states = source.forward_batch(n, &mut rng);

    // Slab above the detector top (z > 4 m) up to the air top (z = 5.5 m)
    let above = states.iter().filter(|s| s.position[2] > 400.0).count();
    let p = (10.0 * 10.0 * 1.5) / (1000.0 - 512.0);
    let fraction = above as f64 / n as f64;
    let sigma = (p * (1.0 - p) / n as f64).sqrt();
    assert!(
        (fraction - p).abs() < 5.0 * sigma,
        "fraction above detector {} differs from {}",
        fraction,
        p
    );
}

#[test]
fn test_directions_are_isotropic() {
    let source = DetectorSource::default();
    let n = 100_000;
    let mut rng = FastRng::new(99);
    let states = source.forward_batch(n, &mut rng);

    let mut bins = [0usize; 10];
    let mut sum_sq = 0.0;
    for state in &states {
        let d = state.direction;
        let mag = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
        assert!((mag - 1.0).abs() < 1e-10);
        let bin = (((d[2] + 1.0) / 2.0 * 10.0) as usize).min(9);
        bins[bin] += 1;
        sum_sq += d[0] * d[0];
    }

    // cos(theta) uniform on [-1, 1]
    let expected = n as f64 / 10.0;
    let sigma = (expected * 0.9).sqrt();
    for (i, &count) in bins.iter().enumerate() {
        assert!(
            (count as f64 - expected).abs() < 5.0 * sigma,
            "bin {} holds {} directions, expected {}",
            i,
            count,
            expected
        );
    }

    // <u_x^2> = 1/3 for an isotropic distribution
    let mean_sq = sum_sq / n as f64;
    assert!((mean_sq - 1.0 / 3.0).abs() < 0.01);
}

#[test]
fn test_energies_follow_spectrum() {
    let source = DetectorSource::default();
    let n = 100_000;
    let mut rng = FastRng::new(5);
    let states = source.forward_batch(n, &mut rng);
    let spectrum = &source.spectrum;
    for (i, &(energy, _)) in spectrum.lines().iter().enumerate() {
        let count = states.iter().filter(|s| s.energy == energy).count();
        let p = spectrum.probability(i);
        let sigma = (n as f64 * p * (1.0 - p)).sqrt();
        assert!((count as f64 - p * n as f64).abs() < 5.0 * sigma);
    }
}

#[test]
fn test_parallel_forward_is_reproducible() {
    let source = DetectorSource::default();
    let mut a = vec![ParticleState::default(); 1000];
    let mut b = vec![ParticleState::default(); 1000];
    source.par_sample_forward(31, &mut a);
    source.par_sample_forward(31, &mut b);
    assert_eq!(a, b);
    assert!(a.iter().all(|s| s.weight == 1.0));
}
