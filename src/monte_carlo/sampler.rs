use rand::distributions::{Distribution, Uniform};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::geometry::Domain;
use crate::monte_carlo::{PartialResult, SampleJob};

/// Where a worker's random stream comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeedSource {
    /// Fresh OS entropy for every worker.
    #[default]
    Entropy,
    /// One shared seed; each worker reads its own ChaCha stream of it.
    Fixed(u64),
}

impl SeedSource {
    /// Builds the sampler for `worker`.
    pub fn sampler(&self, worker: usize) -> Sampler {
        match *self {
            SeedSource::Entropy => Sampler::new(),
            SeedSource::Fixed(seed) => Sampler::with_seed(seed, worker as u64),
        }
    }
}

/// Uniform point sampler over a domain's bounding rectangle.
///
/// Each sampler owns its RNG, so samplers on different threads never share
/// state.
#[derive(Debug, Clone)]
pub struct Sampler {
    rng: ChaCha20Rng,
}

impl Sampler {
    /// Create a sampler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create a deterministic sampler reading `stream` of `seed`
    pub fn with_seed(seed: u64, stream: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { rng }
    }

    /// Draws `job.sample_count` points and counts those inside the union.
    ///
    /// Coordinates are uniform over the closed bounding rectangle. On a
    /// zero-width or zero-height rectangle every draw lands on the collapsed
    /// coordinate. The run still completes and the estimate is zero area.
    pub fn run(&mut self, job: &SampleJob, domain: &Domain) -> PartialResult {
        let bounds = domain.bounds();
        let xs = Uniform::new_inclusive(bounds.min_x, bounds.max_x);
        let ys = Uniform::new_inclusive(bounds.min_y, bounds.max_y);

        let mut inside = 0u64;
        for _ in 0..job.sample_count {
            let x = xs.sample(&mut self.rng);
            let y = ys.sample(&mut self.rng);
            if domain.contains(x, y) {
                inside += 1;
            }
        }

        log::trace!(
            "worker {} drew {} samples, {} inside",
            job.worker,
            job.sample_count,
            inside
        );
        PartialResult::new(job.sample_count, inside)
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Circle;
    use rand::RngCore;

    fn job(sample_count: u64) -> SampleJob {
        SampleJob {
            worker: 0,
            sample_count,
        }
    }

    #[test]
    fn test_zero_samples() {
        let domain = Domain::new(vec![Circle::new(0.0, 0.0, 1.0)]).unwrap();
        let result = Sampler::new().run(&job(0), &domain);
        assert_eq!(result, PartialResult::new(0, 0));
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let domain = Domain::new(vec![Circle::new(0.0, 0.0, 1.0)]).unwrap();
        let a = Sampler::with_seed(42, 0).run(&job(10_000), &domain);
        let b = Sampler::with_seed(42, 0).run(&job(10_000), &domain);
        assert_eq!(a, b);
        assert_eq!(a.samples_drawn, 10_000);
    }

    #[test]
    fn test_streams_differ() {
        let domain = Domain::new(vec![Circle::new(0.0, 0.0, 1.0)]).unwrap();
        let mut first = Sampler::with_seed(7, 0);
        let mut second = Sampler::with_seed(7, 1);
        let a: Vec<u64> = (0..5).map(|_| first.run(&job(1_000), &domain).samples_inside).collect();
        let b: Vec<u64> = (0..5).map(|_| second.run(&job(1_000), &domain).samples_inside).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_entropy_streams_differ() {
        let mut first = SeedSource::Entropy.sampler(0);
        let mut second = SeedSource::Entropy.sampler(0);
        let a: Vec<u64> = (0..4).map(|_| first.rng.next_u64()).collect();
        let b: Vec<u64> = (0..4).map(|_| second.rng.next_u64()).collect();
        assert_ne!(a, b);

        let mut third = Sampler::new();
        let c: Vec<u64> = (0..4).map(|_| third.rng.next_u64()).collect();
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn test_hit_fraction_near_quarter_pi() {
        let domain = Domain::new(vec![Circle::new(0.0, 0.0, 1.0)]).unwrap();
        let result = Sampler::with_seed(1, 0).run(&job(200_000), &domain);
        let ratio = result.hit_ratio();
        assert!((ratio - std::f64::consts::FRAC_PI_4).abs() < 0.01);
    }

    #[test]
    fn test_square_fully_covered() {
        // Every point of [-1,1]^2 lies inside a circle of radius 2 at the origin.
        let domain = Domain::new(vec![
            Circle::new(0.0, 0.0, 1.0),
            Circle::new(0.0, 0.0, 2.0),
        ])
        .unwrap();
        let result = Sampler::with_seed(3, 0).run(&job(5_000), &domain);
        assert_eq!(result.samples_inside, 5_000);
    }

    #[test]
    fn test_degenerate_domain_does_not_panic() {
        let domain = Domain::new(vec![Circle::new(2.0, -1.0, 0.0)]).unwrap();
        let result = Sampler::new().run(&job(100), &domain);
        assert_eq!(result.samples_drawn, 100);
        assert_eq!(result.samples_inside, 100);
    }

    #[test]
    fn test_seed_source() {
        let domain = Domain::new(vec![Circle::new(0.0, 0.0, 1.0)]).unwrap();
        let a = SeedSource::Fixed(9).sampler(3).run(&job(2_000), &domain);
        let b = Sampler::with_seed(9, 3).run(&job(2_000), &domain);
        assert_eq!(a, b);
        assert_eq!(SeedSource::default(), SeedSource::Entropy);
    }
}
