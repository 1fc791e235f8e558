use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::scoring::Scorer;
use crate::models::{
    Allocation, AllocationConstraints, AllocationResult, AllocationStats, Listing, MatchResult,
    Profile, QualityBands,
};

/// Score floor for the "excellent" quality band.
const EXCELLENT_FLOOR: f64 = 80.0;
/// Score floor for the "good" quality band.
const GOOD_FLOOR: f64 = 60.0;

/// Errors from malformed allocation input, detected before any scoring
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("invalid profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("invalid listing {id}: {reason}")]
    InvalidListing { id: String, reason: String },

    #[error("invalid constraints: {0}")]
    InvalidConstraints(String),
}

/// One-to-one batch allocator
///
/// Assigns each profile to at most one listing and fills each listing up to
/// its capacity, taking candidate pairs in descending score order. Greedy
/// highest-score-first selection, not a maximum-weight matching; that is the
/// documented baseline behavior.
#[derive(Debug, Clone)]
pub struct Allocator {
    scorer: Scorer,
}

impl Allocator {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn with_default_weights() -> Self {
        Self {
            scorer: Scorer::with_default_weights(),
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Allocate profiles to listings under the given constraints.
    ///
    /// Validates all inputs up front and fails fast on malformed data.
    /// Zero profiles or zero listings is a normal state and yields an empty
    /// result with a zero success rate.
    pub fn allocate(
        &self,
        profiles: &[Profile],
        listings: &[Listing],
        constraints: &AllocationConstraints,
    ) -> Result<AllocationResult, AllocationError> {
        validate_inputs(profiles, listings, constraints)?;

        // Score every pairing against listings with free capacity left.
        let mut candidates: Vec<(usize, usize, MatchResult)> =
            Vec::with_capacity(profiles.len() * listings.len());
        for (pi, profile) in profiles.iter().enumerate() {
            for (li, listing) in listings.iter().enumerate() {
                if !listing.has_free_slot() {
                    continue;
                }
                candidates.push((pi, li, self.scorer.score(profile, listing)));
            }
        }

        // Stable sort: among equal scores the first-encountered pair wins.
        candidates.sort_by(|a, b| {
            b.2.score
                .partial_cmp(&a.2.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut allocated = Vec::new();
        let mut used_profiles: HashSet<usize> = HashSet::new();
        let mut filled: Vec<u32> = listings.iter().map(|l| l.filled).collect();

        for (pi, li, result) in candidates {
            if let Some(max) = constraints.max_allocations {
                if allocated.len() >= max {
                    break;
                }
            }
            if used_profiles.contains(&pi) {
                continue;
            }
            if filled[li] >= listings[li].slots() {
                continue;
            }
            if let Some(floor) = constraints.min_score {
                if result.score < floor {
                    continue;
                }
            }

            used_profiles.insert(pi);
            filled[li] += 1;

            let profile = &profiles[pi];
            let listing = &listings[li];
            allocated.push(Allocation {
                profile_id: profile.id.clone(),
                profile_name: profile.name.clone(),
                listing_id: listing.id.clone(),
                title: listing.title.clone(),
                company: listing.company.clone(),
                location: listing.location.clone(),
                salary: listing.salary,
                result,
            });
        }

        let stats = derive_stats(&allocated, profiles.len(), listings);

        Ok(AllocationResult { allocated, stats })
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn validate_inputs(
    profiles: &[Profile],
    listings: &[Listing],
    constraints: &AllocationConstraints,
) -> Result<(), AllocationError> {
    for profile in profiles {
        if !profile.cgpa.is_finite() || profile.cgpa < 0.0 {
            return Err(AllocationError::InvalidProfile {
                id: profile.id.clone(),
                reason: format!("CGPA must be a non-negative number, got {}", profile.cgpa),
            });
        }
        if let Some(range) = &profile.salary_range {
            if range.min > range.max {
                return Err(AllocationError::InvalidProfile {
                    id: profile.id.clone(),
                    reason: format!("salary range {}..{} is inverted", range.min, range.max),
                });
            }
        }
    }

    for listing in listings {
        if !listing.min_cgpa.is_finite() || listing.min_cgpa < 0.0 {
            return Err(AllocationError::InvalidListing {
                id: listing.id.clone(),
                reason: format!(
                    "minimum CGPA must be a non-negative number, got {}",
                    listing.min_cgpa
                ),
            });
        }
        if listing.filled > listing.slots() {
            return Err(AllocationError::InvalidListing {
                id: listing.id.clone(),
                reason: format!(
                    "filled count {} exceeds capacity {}",
                    listing.filled,
                    listing.slots()
                ),
            });
        }
    }

    if let Some(floor) = constraints.min_score {
        if !(0.0..=100.0).contains(&floor) {
            return Err(AllocationError::InvalidConstraints(format!(
                "minimum score must lie in 0..=100, got {}",
                floor
            )));
        }
    }

    Ok(())
}

/// Derive run statistics from the accepted allocations.
///
/// All divisions are guarded: an empty run reports zero averages and a zero
/// success rate instead of NaN.
fn derive_stats(
    allocated: &[Allocation],
    total_profiles: usize,
    listings: &[Listing],
) -> AllocationStats {
    let total_matches = allocated.len();

    let average_score = if total_matches > 0 {
        allocated.iter().map(|a| a.result.score).sum::<f64>() / total_matches as f64
    } else {
        0.0
    };

    let success_rate = if total_profiles > 0 {
        total_matches as f64 / total_profiles as f64
    } else {
        0.0
    };

    let mut quality = QualityBands::default();
    for allocation in allocated {
        if allocation.result.score >= EXCELLENT_FLOOR {
            quality.excellent += 1;
        } else if allocation.result.score >= GOOD_FLOOR {
            quality.good += 1;
        } else {
            quality.fair += 1;
        }
    }

    let industry_by_listing: HashMap<&str, &str> = listings
        .iter()
        .map(|l| (l.id.as_str(), l.industry.as_str()))
        .collect();
    let mut industry_distribution: HashMap<String, usize> = HashMap::new();
    for allocation in allocated {
        if let Some(industry) = industry_by_listing.get(allocation.listing_id.as_str()) {
            *industry_distribution
                .entry((*industry).to_string())
                .or_insert(0) += 1;
        }
    }

    AllocationStats {
        total_matches,
        average_score,
        success_rate,
        unallocated_profiles: total_profiles - total_matches,
        quality,
        industry_distribution,
    }
}
