//! Step generators for the random-walk price model.
//!
//! Each generator yields a relative step `r` for `next = last * (1 + r)`:
//! - `UniformStep`: `r ~ U[-max_step, +max_step]`
//! - `GaussianStep`: `r ~ N(0, max_step / 2)`, clamped to `±max_step`
//! - `ScriptedSteps`: replays a fixed list, cycling when exhausted
//!
//! Seeded constructors are deterministic; `from_entropy` is not.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::SimError;
use crate::ports::step_port::StepSource;

/// Default bound on a single relative move (±2%).
pub const DEFAULT_MAX_STEP: f64 = 0.02;

fn validate_max_step(max_step: f64) -> Result<(), SimError> {
    if !max_step.is_finite() || max_step <= 0.0 || max_step >= 1.0 {
        return Err(SimError::invalid_input(
            "max_step",
            format!("must be in (0, 1), got {max_step}"),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDistribution {
    Uniform,
    Normal,
}

impl fmt::Display for StepDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepDistribution::Uniform => write!(f, "uniform"),
            StepDistribution::Normal => write!(f, "normal"),
        }
    }
}

impl FromStr for StepDistribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Ok(StepDistribution::Uniform),
            "normal" | "gaussian" => Ok(StepDistribution::Normal),
            other => Err(format!("unknown distribution '{other}' (expected uniform or normal)")),
        }
    }
}

/// Build a boxed step source for the given distribution and seed.
pub fn build_step_source(
    distribution: StepDistribution,
    max_step: f64,
    seed: Option<u64>,
) -> Result<Box<dyn StepSource>, SimError> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let source: Box<dyn StepSource> = match distribution {
        StepDistribution::Uniform => Box::new(UniformStep::with_rng(max_step, rng)?),
        StepDistribution::Normal => Box::new(GaussianStep::with_rng(max_step, rng)?),
    };
    Ok(source)
}

#[derive(Debug, Clone)]
pub struct UniformStep {
    max_step: f64,
    rng: StdRng,
}

impl UniformStep {
    pub fn with_rng(max_step: f64, rng: StdRng) -> Result<Self, SimError> {
        validate_max_step(max_step)?;
        Ok(Self { max_step, rng })
    }

    pub fn seeded(max_step: f64, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(max_step, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(max_step: f64) -> Result<Self, SimError> {
        Self::with_rng(max_step, StdRng::from_entropy())
    }

    pub fn max_step(&self) -> f64 {
        self.max_step
    }
}

impl StepSource for UniformStep {
    fn next_step(&mut self) -> f64 {
        self.rng.gen_range(-self.max_step..=self.max_step)
    }
}

#[derive(Debug, Clone)]
pub struct GaussianStep {
    max_step: f64,
    normal: Normal<f64>,
    rng: StdRng,
}

impl GaussianStep {
    pub fn with_rng(max_step: f64, rng: StdRng) -> Result<Self, SimError> {
        validate_max_step(max_step)?;
        let normal = Normal::new(0.0, max_step / 2.0)
            .map_err(|e| SimError::invalid_input("max_step", e.to_string()))?;
        Ok(Self {
            max_step,
            normal,
            rng,
        })
    }

    pub fn seeded(max_step: f64, seed: u64) -> Result<Self, SimError> {
        Self::with_rng(max_step, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(max_step: f64) -> Result<Self, SimError> {
        Self::with_rng(max_step, StdRng::from_entropy())
    }
}

impl StepSource for GaussianStep {
    fn next_step(&mut self) -> f64 {
        self.normal
            .sample(&mut self.rng)
            .clamp(-self.max_step, self.max_step)
    }
}

/// Replays a fixed sequence of steps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSteps {
    steps: Vec<f64>,
    cursor: usize,
}

impl ScriptedSteps {
    pub fn new(steps: Vec<f64>) -> Self {
        Self { steps, cursor: 0 }
    }
}

impl StepSource for ScriptedSteps {
    fn next_step(&mut self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        let step = self.steps[self.cursor % self.steps.len()];
        self.cursor += 1;
        step
    }
}
