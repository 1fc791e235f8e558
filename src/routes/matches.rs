use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{jittered_score, Allocator, Scorer};
use crate::models::{
    AllocationConstraints, AllocationRunResponse, CatalogResponse, ErrorResponse,
    FindMatchesRequest, FindMatchesResponse, HealthResponse, RankedListing, RunAllocationRequest,
};
use crate::services::CatalogStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub scorer: Scorer,
    pub allocator: Allocator,
    pub max_limit: usize,
    pub default_constraints: AllocationConstraints,
}

/// Configure all matching and allocation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/catalog", web::get().to(get_catalog))
        .route("/matches/find", web::post().to(find_matches))
        .route("/allocations/run", web::post().to(run_allocation));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.catalog.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.catalog.len(),
    })
}

/// Listing catalog endpoint
///
/// GET /api/v1/catalog
async fn get_catalog(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CatalogResponse {
        listings: state.catalog.listings().to_vec(),
        total: state.catalog.len(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "profile": { "id": "...", "name": "...", "skills": [], "cgpa": 8.0 },
///   "limit": 20,
///   "minScore": 60.0,
///   "jitter": false
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let limit = (req.limit as usize).min(state.max_limit);

    tracing::info!(
        "Finding matches for profile {} (limit: {}, floor: {:?})",
        req.profile.id,
        limit,
        req.min_score
    );

    let ranked = state
        .scorer
        .rank(&req.profile, state.catalog.listings(), limit, req.min_score);

    let mut matches: Vec<RankedListing> = ranked
        .into_iter()
        .filter_map(|result| {
            state
                .catalog
                .get(&result.listing_id)
                .map(|listing| RankedListing::from_parts(listing, result))
        })
        .collect();

    // Optional display-only offset, applied after ranking.
    if req.jitter {
        let mut rng = rand::thread_rng();
        for entry in &mut matches {
            entry.match_score = jittered_score(entry.match_score, &mut rng);
        }
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    tracing::info!(
        "Returning {} matches for profile {} (from {} listings)",
        matches.len(),
        req.profile.id,
        state.catalog.len()
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        matches,
        total_listings: state.catalog.len(),
    })
}

/// Allocation run endpoint
///
/// POST /api/v1/allocations/run
///
/// Request body:
/// ```json
/// {
///   "profiles": [ { "id": "...", "name": "...", "skills": [], "cgpa": 8.0 } ],
///   "minScore": 60.0,
///   "maxAllocations": 50
/// }
/// ```
async fn run_allocation(
    state: web::Data<AppState>,
    req: web::Json<RunAllocationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for run_allocation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Request values override the configured defaults.
    let constraints = AllocationConstraints {
        min_score: req.min_score.or(state.default_constraints.min_score),
        max_allocations: req
            .max_allocations
            .or(state.default_constraints.max_allocations),
    };

    tracing::info!(
        "Running allocation for {} profiles over {} listings (constraints: {:?})",
        req.profiles.len(),
        state.catalog.len(),
        constraints
    );

    let result = match state
        .allocator
        .allocate(&req.profiles, state.catalog.listings(), &constraints)
    {
        Ok(result) => result,
        Err(e) => {
            tracing::info!("Allocation rejected: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid input".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Allocated {} of {} profiles (avg score: {:.1})",
        result.allocated.len(),
        req.profiles.len(),
        result.stats.average_score
    );

    HttpResponse::Ok().json(AllocationRunResponse {
        run_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now(),
        allocated: result.allocated,
        stats: result.stats,
    })
}
