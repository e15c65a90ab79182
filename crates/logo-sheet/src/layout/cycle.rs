//! Source selection per tile
//!
//! When several sources are supplied, each tile is assigned one of them
//! according to the configured [`CyclePolicy`]. Tiles are always visited in
//! row-major order so the random policy is reproducible for a given seed.

use crate::types::{CyclePolicy, Result, SheetError};

use super::{GridPlan, GridPosition};

impl CyclePolicy {
    /// Parse a cycle mode name (`row`, `tile` or `random`).
    ///
    /// `seed` is only used by the random mode.
    pub fn parse(mode: &str, seed: u64) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "row" => Ok(CyclePolicy::ByRow),
            "tile" => Ok(CyclePolicy::ByTile),
            "random" => Ok(CyclePolicy::Random { seed }),
            _ => Err(SheetError::InvalidCycleMode(mode.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CyclePolicy::ByRow => "row",
            CyclePolicy::ByTile => "tile",
            CyclePolicy::Random { .. } => "random",
        }
    }
}

// =============================================================================
// Seeded generator
// =============================================================================

/// 48-bit linear congruential generator.
///
/// Small and fully specified, so a seed yields the same sequence on every
/// platform and release.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    const MULTIPLIER: u64 = 0x5_DEEC_E66D;
    const INCREMENT: u64 = 0xB;
    const MASK: u64 = (1 << 48) - 1;

    pub fn new(seed: u64) -> Self {
        Self {
            state: (seed ^ Self::MULTIPLIER) & Self::MASK,
        }
    }

    fn next_bits(&mut self, bits: u32) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & Self::MASK;
        (self.state >> (48 - bits)) as u32
    }

    /// Uniform value in `0..bound`. `bound` must be in `1..=i32::MAX`.
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0 && bound <= i32::MAX as u32);

        if bound.is_power_of_two() {
            return ((bound as u64 * self.next_bits(31) as u64) >> 31) as u32;
        }

        // Reject draws from the incomplete last bucket to stay unbiased
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if (bits - value) as u64 + (bound as u64 - 1) < (1 << 31) {
                return value;
            }
        }
    }
}

// =============================================================================
// Picking
// =============================================================================

/// Stateful source chooser; call [`SourcePicker::pick`] once per tile in
/// row-major order.
#[derive(Debug, Clone)]
pub struct SourcePicker {
    policy: CyclePolicy,
    source_count: usize,
    cols: u32,
    rng: Option<SeededRng>,
}

impl SourcePicker {
    pub fn new(policy: CyclePolicy, source_count: usize, cols: u32) -> Result<Self> {
        if source_count == 0 {
            return Err(SheetError::EmptySourceSet);
        }
        if source_count > i32::MAX as usize {
            return Err(SheetError::Config(format!(
                "Too many sources: {}",
                source_count
            )));
        }

        let rng = match policy {
            CyclePolicy::Random { seed } => Some(SeededRng::new(seed)),
            CyclePolicy::ByRow | CyclePolicy::ByTile => None,
        };

        Ok(Self {
            policy,
            source_count,
            cols,
            rng,
        })
    }

    /// Source index for the tile at `pos`
    pub fn pick(&mut self, pos: GridPosition) -> usize {
        let n = self.source_count;
        match (&self.policy, self.rng.as_mut()) {
            (CyclePolicy::Random { .. }, Some(rng)) => rng.next_below(n as u32) as usize,
            (CyclePolicy::ByTile, _) => {
                (pos.row as usize * self.cols as usize + pos.col as usize) % n
            }
            _ => pos.row as usize % n,
        }
    }
}

/// Source index for every tile of `plan`, in row-major order.
pub fn assign_sources(
    plan: &GridPlan,
    policy: CyclePolicy,
    source_count: usize,
) -> Result<Vec<usize>> {
    let mut picker = SourcePicker::new(policy, source_count, plan.cols)?;
    Ok(plan.positions().map(|pos| picker.pick(pos)).collect())
}
