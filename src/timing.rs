//! Randomized timing harness for batch transmittance evaluation.
//!
//! This is a performance smoke-test rather than a correctness check. It draws
//! random (incident index, absorbing substrate index, angle) triples, times
//! the evaluation of the s-polarized transmittance over all of them, and
//! reports the elapsed time together with the observed extremes.
//!
//! - [`TrialSet`]: the random inputs, optionally seeded
//! - [`time_trials`]: one timed pass, sequential or rayon-parallel
//! - [`run_rounds`]: repeated passes with a progress bar

use std::fmt;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::powers::transmittance_s;

/// Upper bound of the sampled incidence angle, just below `pi/2`.
pub const MAX_TRIAL_ANGLE: f64 = 1.570796326;


/// Random inputs for the timing harness, stored column-wise.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSet {
    pub n_inc: Vec<f64>,
    pub n_sub: Vec<Complex64>,
    pub theta_inc: Vec<f64>,
}

impl TrialSet {
    /// Draws `num_trials` triples: `n_inc` in `[0, 2)`, `n_sub` with real part
    /// in `[0, 2)` and imaginary part in `[0, 10)`, angle in `[0, MAX_TRIAL_ANGLE)`.
    ///
    /// Without a seed the generator is seeded from the thread-local RNG.
    pub fn random(num_trials: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let n_inc = (0..num_trials)
            .map(|_| rng.random_range(0.0..2.0))
            .collect();
        let n_sub = (0..num_trials)
            .map(|_| Complex64::new(rng.random_range(0.0..2.0), rng.random_range(0.0..10.0)))
            .collect();
        let theta_inc = (0..num_trials)
            .map(|_| rng.random_range(0.0..MAX_TRIAL_ANGLE))
            .collect();

        Self {
            n_inc,
            n_sub,
            theta_inc,
        }
    }

    pub fn len(&self) -> usize {
        self.theta_inc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta_inc.is_empty()
    }
}

/// Elapsed time and observed transmittance extremes of one timed pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialStats {
    pub trials: usize,
    pub elapsed: Duration,
    pub min: f64, // NaN if every value was NaN
    pub max: f64,
}

impl fmt::Display for TrialStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nTrials: {}    time: {:.3} sec    TsMin: {:.3}    TsMax: {:.3}",
            self.trials,
            self.elapsed.as_secs_f64(),
            self.min,
            self.max
        )
    }
}

/// Times the evaluation of [`transmittance_s`] over every triple in `set`.
///
/// **Context**: Each evaluation is independent, so the batch may run on the
/// rayon pool with no coordination. The sequential path is kept for
/// comparison with single-threaded callers.
///
/// **How it Works**: Evaluates into a vector inside the timed region, then
/// reduces to min/max outside it. `NaN` results (possible for the degenerate
/// draws near `n_inc = 0`) are skipped by the reduction.
pub fn time_trials(set: &TrialSet, parallel: bool) -> TrialStats {
    let start = Instant::now();
    let values: Vec<f64> = if parallel {
        (0..set.len())
            .into_par_iter()
            .map(|i| transmittance_s(set.n_inc[i], set.n_sub[i], set.theta_inc[i]))
            .collect()
    } else {
        (0..set.len())
            .map(|i| transmittance_s(set.n_inc[i], set.n_sub[i], set.theta_inc[i]))
            .collect()
    };
    let elapsed = start.elapsed();

    let min = values.iter().copied().fold(f64::NAN, f64::min);
    let max = values.iter().copied().fold(f64::NAN, f64::max);

    TrialStats {
        trials: set.len(),
        elapsed,
        min,
        max,
    }
}

/// Runs `rounds` independent timed passes of `num_trials` random triples each.
///
/// A seeded run offsets the seed by the round index, so rounds differ but the
/// whole run is reproducible.
pub fn run_rounds(
    num_trials: usize,
    rounds: usize,
    seed: Option<u64>,
    parallel: bool,
) -> Vec<TrialStats> {
    let pb = ProgressBar::new(rounds as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg}",
    ) {
        pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
    }
    pb.set_message("round".to_string());

    let stats: Vec<TrialStats> = (0..rounds)
        .map(|round| {
            let set = TrialSet::random(num_trials, seed.map(|s| s.wrapping_add(round as u64)));
            let stats = time_trials(&set, parallel);
            log::debug!("round {}: {}", round, stats);
            pb.inc(1);
            stats
        })
        .collect();
    pb.finish_and_clear();

    let total: Duration = stats.iter().map(|s| s.elapsed).sum();
    log::info!(
        "timed {} rounds of {} trials ({}): {:.2?} total",
        rounds,
        num_trials,
        if parallel { "parallel" } else { "sequential" },
        total
    );
    stats
}
