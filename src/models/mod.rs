// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Allocation, AllocationConstraints, AllocationResult, AllocationStats, Listing, MatchResult,
    Profile, QualityBands, RankedListing, SalaryRange, ScoreBreakdown, ScoringWeights,
    WeightsError, WorkMode,
};
pub use requests::{FindMatchesRequest, RunAllocationRequest};
pub use responses::{
    AllocationRunResponse, CatalogResponse, ErrorResponse, FindMatchesResponse, HealthResponse,
};
