use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

/// Candidate profile with skills and placement preferences
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub cgpa: f64,
    #[serde(default)]
    pub industry: String,
    #[serde(rename = "preferredLocations", default)]
    pub preferred_locations: Vec<String>,
    #[serde(rename = "salaryRange", default)]
    pub salary_range: Option<SalaryRange>,
    #[serde(rename = "workMode", default)]
    pub work_mode: Option<WorkMode>,
}

impl Profile {
    /// Whether the given salary falls inside the expected range.
    /// A missing range is unrestricted.
    pub fn salary_within_expectations(&self, salary: u32) -> bool {
        match &self.salary_range {
            Some(range) => range.min <= salary && salary <= range.max,
            None => true,
        }
    }
}

/// Inclusive expected compensation range
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkMode {
    Onsite,
    Remote,
    Hybrid,
}

/// Internship listing from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub industry: String,
    pub salary: u32,
    #[serde(rename = "isRemote", default)]
    pub is_remote: bool,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
    #[serde(rename = "minCgpa", default)]
    pub min_cgpa: f64,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub filled: u32,
}

impl Listing {
    /// Number of open positions. Listings without an explicit capacity
    /// offer a single slot.
    pub fn slots(&self) -> u32 {
        self.capacity.unwrap_or(1)
    }

    /// Whether the listing still has free slots.
    pub fn has_free_slot(&self) -> bool {
        self.filled < self.slots()
    }
}

/// Per-factor sub-scores behind a total match score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub academic: f64,
    pub location: f64,
    pub industry: f64,
    pub salary: f64,
}

/// Scored (profile, listing) pairing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    #[serde(rename = "listingId")]
    pub listing_id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "skillOverlap")]
    pub skill_overlap: Vec<String>,
    pub reasons: Vec<String>,
}

/// Listing enriched with its match score, for ranked display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedListing {
    #[serde(rename = "listingId")]
    pub listing_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub industry: String,
    pub salary: u32,
    #[serde(rename = "isRemote")]
    pub is_remote: bool,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "skillOverlap")]
    pub skill_overlap: Vec<String>,
    pub reasons: Vec<String>,
}

impl RankedListing {
    pub fn from_parts(listing: &Listing, result: MatchResult) -> Self {
        Self {
            listing_id: result.listing_id,
            title: listing.title.clone(),
            company: listing.company.clone(),
            location: listing.location.clone(),
            industry: listing.industry.clone(),
            salary: listing.salary,
            is_remote: listing.is_remote,
            match_score: result.score,
            breakdown: result.breakdown,
            skill_overlap: result.skill_overlap,
            reasons: result.reasons,
        }
    }
}

/// Constraints applied during an allocation run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AllocationConstraints {
    #[serde(rename = "minScore", default)]
    pub min_score: Option<f64>,
    #[serde(rename = "maxAllocations", default)]
    pub max_allocations: Option<usize>,
}

/// One accepted (profile, listing) assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    #[serde(rename = "profileName")]
    pub profile_name: String,
    #[serde(rename = "listingId")]
    pub listing_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: u32,
    pub result: MatchResult,
}

/// Accepted-score counts per quality band
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct QualityBands {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
}

/// Aggregate statistics over one allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationStats {
    #[serde(rename = "totalMatches")]
    pub total_matches: usize,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
    #[serde(rename = "successRate")]
    pub success_rate: f64,
    #[serde(rename = "unallocatedProfiles")]
    pub unallocated_profiles: usize,
    pub quality: QualityBands,
    #[serde(rename = "industryDistribution")]
    pub industry_distribution: HashMap<String, usize>,
}

/// Output of one allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResult {
    pub allocated: Vec<Allocation>,
    pub stats: AllocationStats,
}

/// Scoring weights, one per factor. Must sum to 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub academic: f64,
    pub location: f64,
    pub industry: f64,
    pub salary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 40.0,
            academic: 20.0,
            location: 20.0,
            industry: 15.0,
            salary: 5.0,
        }
    }
}

/// Errors from an invalid scoring weight table
#[derive(Debug, Error)]
pub enum WeightsError {
    #[error("scoring weight for {0} must be non-negative")]
    Negative(&'static str),

    #[error("scoring weights must sum to 100, got {0:.2}")]
    BadSum(f64),
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.academic + self.location + self.industry + self.salary
    }

    /// Reject weight tables that would break the 0-100 score contract.
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in [
            ("skills", self.skills),
            ("academic", self.academic),
            ("location", self.location),
            ("industry", self.industry),
            ("salary", self.salary),
        ] {
            if !(value >= 0.0) {
                return Err(WeightsError::Negative(name));
            }
        }

        let total = self.total();
        if (total - 100.0).abs() > 1e-6 {
            return Err(WeightsError::BadSum(total));
        }

        Ok(())
    }
}
