//! Weighted sampling without replacement.
//!
//! Items are drawn one at a time. Each draw picks among the items not yet
//! drawn with probability proportional to their weight, renormalizing over
//! what is left. When every remaining weight is zero the draw falls back to
//! a uniform choice.

use rand::Rng;

use crate::error::DrillError;

/// One sampling candidate: an item id and its unnormalized weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub weight: f64,
}

impl Candidate {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// Outcome of fitting a requested drill size to the available pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedCount {
    /// Number of items that will actually be drawn.
    pub count: usize,
    /// Whether the request had to be reduced.
    pub reduced: bool,
}

/// Reduce `requested` to the pool size when it does not fit.
pub fn clamp_count(requested: usize, available: usize) -> ClampedCount {
    if requested > available {
        ClampedCount {
            count: available,
            reduced: true,
        }
    } else {
        ClampedCount {
            count: requested,
            reduced: false,
        }
    }
}

/// Draw `k` distinct ids from `pool`.
///
/// The returned order is the draw order. Fails if any weight is negative or
/// not finite, or if `k` exceeds the pool size; callers are expected to clamp
/// with [`clamp_count`] first.
pub fn sample<R: Rng + ?Sized>(
    pool: &[Candidate],
    k: usize,
    rng: &mut R,
) -> Result<Vec<String>, DrillError> {
    if let Some(bad) = pool
        .iter()
        .find(|c| !c.weight.is_finite() || c.weight < 0.0)
    {
        return Err(DrillError::InvalidWeight {
            id: bad.id.clone(),
            weight: bad.weight,
        });
    }
    if k > pool.len() {
        return Err(DrillError::SampleTooLarge {
            requested: k,
            available: pool.len(),
        });
    }

    let mut remaining: Vec<&Candidate> = pool.iter().collect();
    let mut selected = Vec::with_capacity(k);

    for _ in 0..k {
        let index = draw_index(&remaining, rng);
        selected.push(remaining.swap_remove(index).id.clone());
    }

    Ok(selected)
}

/// Pick one index of `remaining`, proportional to weight.
fn draw_index<R: Rng + ?Sized>(remaining: &[&Candidate], rng: &mut R) -> usize {
    let total: f64 = remaining.iter().map(|c| c.weight).sum();

    if total <= 0.0 {
        tracing::warn!(
            remaining = remaining.len(),
            "all remaining weights are zero, drawing uniformly"
        );
        return rng.gen_range(0..remaining.len());
    }

    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (i, candidate) in remaining.iter().enumerate() {
        if candidate.weight <= 0.0 {
            continue;
        }
        cumulative += candidate.weight;
        last_positive = i;
        if target < cumulative {
            return i;
        }
    }

    // Rounding can leave `target` a hair above the final cumulative sum.
    last_positive
}
