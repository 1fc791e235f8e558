use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Profile;

/// Request to rank catalog listings for one profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(nested)]
    pub profile: Profile,
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(rename = "minScore", default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_score: Option<f64>,
    /// Apply the randomized display offset to the returned scores.
    #[serde(default)]
    pub jitter: bool,
}

fn default_limit() -> u16 {
    20
}

/// Request to run a batch allocation over the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunAllocationRequest {
    #[validate(nested)]
    pub profiles: Vec<Profile>,
    #[serde(rename = "minScore", default)]
    #[validate(range(min = 0.0, max = 100.0))]
    pub min_score: Option<f64>,
    #[serde(rename = "maxAllocations", default)]
    pub max_allocations: Option<usize>,
}
