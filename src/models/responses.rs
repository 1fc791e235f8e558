use serde::{Deserialize, Serialize};

use crate::models::domain::{Allocation, AllocationStats, Listing, RankedListing};

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<RankedListing>,
    #[serde(rename = "totalListings")]
    pub total_listings: usize,
}

/// Response for an allocation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationRunResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub allocated: Vec<Allocation>,
    pub stats: AllocationStats,
}

/// Response for the catalog endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub listings: Vec<Listing>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
