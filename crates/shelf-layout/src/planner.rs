#![forbid(unsafe_code)]

//! Full/half width planning for the two-column theme card grid.
//!
//! [`LayoutPlanner`] takes the ordered theme list and decides, per theme,
//! whether its card spans the whole row or shares it with a neighbour.
//! Planning runs in two passes that are exposed on their own:
//!
//! 1. [`classify_intrinsic`]: a theme is *naturally* full width when its
//!    item count reaches the threshold.
//! 2. [`resolve_positions`]: every index is resolved against the whole
//!    pass-1 array with a fixed priority ladder (first match wins):
//!
//! | Rung | Rule              | Result |
//! |------|-------------------|--------|
//! | 1    | single theme      | full   |
//! | 2    | two half themes   | half   |
//! | 3    | naturally full    | full   |
//! | 4    | sandwiched        | full   |
//! | 5    | trailing orphan   | full   |
//! | 6    | flow              | half   |
//!
//! # Usage
//!
//! ```
//! use shelf_layout::{LayoutPlanner, PlacementRule, ThemeDescriptor};
//!
//! let themes = [
//!     ThemeDescriptor::new(1, 8),
//!     ThemeDescriptor::new(2, 2),
//!     ThemeDescriptor::new(3, 9),
//! ];
//! let planned = LayoutPlanner::default().plan(&themes).unwrap();
//! assert!(planned.iter().all(|p| p.is_full_width()));
//! assert_eq!(planned[1].decision.rule, PlacementRule::Sandwich);
//! ```
//!
//! # Invariants
//!
//! 1. Output length, order, and ids equal the input.
//! 2. `naturally_full_width` depends only on the theme's own count.
//! 3. Pass 2 reads pass-1 values and indices only, never another theme's
//!    final decision.
//! 4. Same input, same output; nothing is retained between calls.
//!
//! # Failure Modes
//!
//! - Negative item count or non-positive threshold: [`PlanError`], with no
//!   partial output.
//! - Empty input: `Ok` with an empty plan.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::{PlanCache, PlanKey};
use crate::error::{PlanError, Result};

/// Item count at which a theme fills a row on its own.
pub const FULL_WIDTH_THRESHOLD: i64 = 7;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A theme as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeDescriptor<Id> {
    /// Opaque identifier, only used for keying the output.
    pub id: Id,
    /// Number of sets in the theme.
    #[serde(rename = "itemCount", alias = "item_count")]
    pub item_count: i64,
}

impl<Id> ThemeDescriptor<Id> {
    pub fn new(id: Id, item_count: i64) -> Self {
        Self { id, item_count }
    }
}

/// The ladder rung that decided a theme's width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementRule {
    /// The only theme in the list.
    Singleton,
    /// One of exactly two themes, neither naturally full.
    BalancedPair,
    /// Naturally full width.
    Intrinsic,
    /// Half theme with naturally full themes somewhere before and after it.
    Sandwich,
    /// Last theme promoted so it is not left alone in its row.
    TrailingOrphan,
    /// Default half-width flow.
    Flow,
}

impl PlacementRule {
    /// Width implied by the rule.
    #[must_use]
    pub const fn is_full_width(self) -> bool {
        !matches!(self, Self::BalancedPair | Self::Flow)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::BalancedPair => "balanced_pair",
            Self::Intrinsic => "intrinsic",
            Self::Sandwich => "sandwich",
            Self::TrailingOrphan => "trailing_orphan",
            Self::Flow => "flow",
        }
    }
}

impl fmt::Display for PlacementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width decision for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutDecision {
    /// Pass-1 result: the count alone reaches the threshold.
    pub naturally_full_width: bool,
    /// Final placement.
    pub is_full_width: bool,
    /// Rung that produced `is_full_width`.
    pub rule: PlacementRule,
}

impl LayoutDecision {
    fn from_rule(naturally_full_width: bool, rule: PlacementRule) -> Self {
        Self {
            naturally_full_width,
            is_full_width: rule.is_full_width(),
            rule,
        }
    }
}

/// A theme paired with its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedTheme<'a, Id> {
    pub theme: &'a ThemeDescriptor<Id>,
    pub decision: LayoutDecision,
}

impl<'a, Id> PlannedTheme<'a, Id> {
    #[inline]
    pub fn id(&self) -> &'a Id {
        &self.theme.id
    }

    #[inline]
    pub fn is_full_width(&self) -> bool {
        self.decision.is_full_width
    }
}

// ---------------------------------------------------------------------------
// Pass 1
// ---------------------------------------------------------------------------

/// Classify each count as naturally full width (`count >= threshold`).
///
/// The threshold is checked before any count, and the first negative count
/// aborts the pass.
pub fn classify_intrinsic<I>(counts: I, threshold: i64) -> Result<Vec<bool>>
where
    I: IntoIterator<Item = i64>,
{
    if threshold <= 0 {
        return Err(PlanError::NonPositiveThreshold { threshold });
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| {
            if count < 0 {
                Err(PlanError::NegativeItemCount { index, count })
            } else {
                Ok(count >= threshold)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pass 2
// ---------------------------------------------------------------------------

/// Resolve every index of a pass-1 array into a decision.
///
/// Linear: whether a naturally full theme exists before or after each index
/// is precomputed with one forward and one backward scan.
#[must_use]
pub fn resolve_positions(natural: &[bool]) -> Vec<LayoutDecision> {
    let len = natural.len();

    let mut full_before = vec![false; len];
    let mut seen = false;
    for (slot, &is_full) in full_before.iter_mut().zip(natural) {
        *slot = seen;
        seen |= is_full;
    }

    let mut full_after = vec![false; len];
    seen = false;
    for (slot, &is_full) in full_after.iter_mut().zip(natural).rev() {
        *slot = seen;
        seen |= is_full;
    }

    (0..len)
        .map(|index| {
            let rule = rule_for(natural, index, full_before[index], full_after[index]);
            LayoutDecision::from_rule(natural[index], rule)
        })
        .collect()
}

/// Resolve a single index against a pass-1 array.
///
/// Returns `None` when `index` is out of range. Scans the array, so prefer
/// [`resolve_positions`] for whole lists.
#[must_use]
pub fn resolve_at(natural: &[bool], index: usize) -> Option<PlacementRule> {
    natural.get(index)?;
    let full_before = natural[..index].iter().any(|&f| f);
    let full_after = natural[index + 1..].iter().any(|&f| f);
    Some(rule_for(natural, index, full_before, full_after))
}

fn rule_for(natural: &[bool], index: usize, full_before: bool, full_after: bool) -> PlacementRule {
    let len = natural.len();
    if len == 1 {
        return PlacementRule::Singleton;
    }
    if len == 2 && !natural[0] && !natural[1] {
        return PlacementRule::BalancedPair;
    }
    if natural[index] {
        return PlacementRule::Intrinsic;
    }
    if full_before && full_after {
        return PlacementRule::Sandwich;
    }
    // len >= 2 here, so the last index always has a predecessor.
    if index + 1 == len && (!natural[index - 1] || index % 2 == 1) {
        return PlacementRule::TrailingOrphan;
    }
    PlacementRule::Flow
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Planner bound to a validated full-width threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutPlanner {
    threshold: i64,
}

impl Default for LayoutPlanner {
    /// Planner using [`FULL_WIDTH_THRESHOLD`].
    fn default() -> Self {
        Self {
            threshold: FULL_WIDTH_THRESHOLD,
        }
    }
}

impl LayoutPlanner {
    /// Create a planner, rejecting a non-positive threshold.
    pub fn new(threshold: i64) -> Result<Self> {
        if threshold <= 0 {
            return Err(PlanError::NonPositiveThreshold { threshold });
        }
        Ok(Self { threshold })
    }

    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> i64 {
        self.threshold
    }

    /// Plan a theme list, pairing each theme with its decision.
    pub fn plan<'a, Id>(&self, themes: &'a [ThemeDescriptor<Id>]) -> Result<Vec<PlannedTheme<'a, Id>>> {
        let decisions = self.decide(themes.iter().map(|t| t.item_count))?;
        Ok(pair(themes, decisions))
    }

    /// Plan from bare item counts.
    pub fn decide<I>(&self, counts: I) -> Result<Vec<LayoutDecision>>
    where
        I: IntoIterator<Item = i64>,
    {
        let counts: Vec<i64> = counts.into_iter().collect();
        let span = tracing::debug_span!(
            "shelf.layout.plan",
            themes = counts.len(),
            threshold = self.threshold,
            full_count = tracing::field::Empty,
        );
        let _guard = span.enter();

        let natural = match classify_intrinsic(counts.iter().copied(), self.threshold) {
            Ok(natural) => natural,
            Err(error) => {
                tracing::warn!(target: "shelf.layout", %error, "rejected theme list");
                return Err(error);
            }
        };

        let decisions = resolve_positions(&natural);
        for (index, decision) in decisions.iter().enumerate() {
            tracing::trace!(
                target: "shelf.layout",
                index,
                natural = decision.naturally_full_width,
                full = decision.is_full_width,
                rule = %decision.rule,
                "placed theme"
            );
        }
        let full_count = decisions.iter().filter(|d| d.is_full_width).count();
        span.record("full_count", full_count);

        Ok(decisions)
    }

    /// Plan through a [`PlanCache`], computing only on a miss.
    ///
    /// Invalid input is rejected before the cache is consulted, so errors are
    /// never memoized.
    pub fn plan_cached<'a, Id>(
        &self,
        themes: &'a [ThemeDescriptor<Id>],
        cache: &mut PlanCache,
    ) -> Result<Vec<PlannedTheme<'a, Id>>> {
        let counts: Vec<i64> = themes.iter().map(|t| t.item_count).collect();
        if let Some(index) = counts.iter().position(|&c| c < 0) {
            return Err(PlanError::NegativeItemCount {
                index,
                count: counts[index],
            });
        }
        let key = PlanKey::new(counts, self.threshold);
        let decisions = cache.get_or_try_compute(key, |key| self.decide(key.counts().iter().copied()))?;
        Ok(pair(themes, decisions))
    }
}

/// Plan with an explicit threshold.
pub fn plan<Id>(themes: &[ThemeDescriptor<Id>], threshold: i64) -> Result<Vec<PlannedTheme<'_, Id>>> {
    LayoutPlanner::new(threshold)?.plan(themes)
}

fn pair<Id>(themes: &[ThemeDescriptor<Id>], decisions: Vec<LayoutDecision>) -> Vec<PlannedTheme<'_, Id>> {
    debug_assert_eq!(themes.len(), decisions.len());
    themes
        .iter()
        .zip(decisions)
        .map(|(theme, decision)| PlannedTheme { theme, decision })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
