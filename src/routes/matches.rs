use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{
    CaregiverProfile, ChildContext, ComputeMatchRequest, FamilyContext, HealthResponse,
    JobOpportunity, MatchResult, RankCandidatesRequest, RankCandidatesResponse, RankedCandidate,
};
use crate::routes::ServiceError;
use crate::services::{CacheKey, MatchCache};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub cache: Arc<MatchCache>,
    pub matching: MatchingSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/compute", web::post().to(compute_match))
        .route("/matches/rank", web::post().to(rank_candidates));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Evaluate through the result cache, falling back to a direct computation
/// when the snapshots cannot be keyed.
async fn evaluate(
    state: &AppState,
    job: &JobOpportunity,
    family: &FamilyContext,
    children: &[ChildContext],
    caregiver: &CaregiverProfile,
    evaluated_at: DateTime<Utc>,
) -> MatchResult {
    let compute = || state.matcher.compute_match(job, family, children, caregiver, evaluated_at);

    match CacheKey::evaluation(job, family, children, caregiver, evaluated_at.date_naive()) {
        Ok(key) => state.cache.get_or_compute(key, compute).await,
        Err(e) => {
            tracing::warn!("Could not build cache key for caregiver {}: {}", caregiver.id, e);
            compute()
        }
    }
}

/// Compute match endpoint
///
/// POST /api/v1/matches/compute
///
/// Request body:
/// ```json
/// {
///   "job": { "id": "string", "mandatoryRequirements": ["NON_SMOKER"], "childIds": ["string"] },
///   "family": { "id": "string", ... },
///   "children": [ { "id": "string", "birthDate": "2022-01-31" } ],
///   "caregiver": { "id": "string", ... },
///   "evaluatedAt": "2024-06-15T12:00:00Z"
/// }
/// ```
async fn compute_match(
    state: web::Data<AppState>,
    req: web::Json<ComputeMatchRequest>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for compute_match request: {:?}", errors);
        return Err(errors.into());
    }

    let evaluated_at = req.evaluated_at.unwrap_or_else(Utc::now);

    tracing::info!(
        "Computing match for caregiver {} on job {}",
        req.caregiver.id,
        req.job.id
    );

    let result = evaluate(
        &state,
        &req.job,
        &req.family,
        &req.children,
        &req.caregiver,
        evaluated_at,
    )
    .await;

    Ok(HttpResponse::Ok().json(result))
}

/// Rank candidates endpoint
///
/// POST /api/v1/matches/rank
///
/// Evaluates every caregiver against the job, then sorts by score. Ineligible
/// caregivers are dropped unless `includeIneligible` is set.
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> Result<HttpResponse, ServiceError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_candidates request: {:?}", errors);
        return Err(errors.into());
    }

    let evaluated_at = req.evaluated_at.unwrap_or_else(Utc::now);
    let limit = req
        .limit
        .unwrap_or(state.matching.default_limit)
        .min(state.matching.max_limit) as usize;
    let total_candidates = req.caregivers.len();

    tracing::info!(
        "Ranking {} caregivers for job {}, limit: {}",
        total_candidates,
        req.job.id,
        limit
    );

    let mut evaluated = Vec::with_capacity(total_candidates);
    for caregiver in &req.caregivers {
        let result = evaluate(
            &state,
            &req.job,
            &req.family,
            &req.children,
            caregiver,
            evaluated_at,
        )
        .await;
        evaluated.push(RankedCandidate {
            caregiver_id: caregiver.id.clone(),
            result,
        });
    }

    let eligible_candidates = evaluated.iter().filter(|c| c.result.is_eligible).count();
    let matches = rank(evaluated, req.include_ineligible, limit);

    tracing::info!(
        "Returning {} caregivers for job {} ({} of {} eligible)",
        matches.len(),
        req.job.id,
        eligible_candidates,
        total_candidates
    );

    Ok(HttpResponse::Ok().json(RankCandidatesResponse {
        matches,
        total_candidates,
        eligible_candidates,
    }))
}

/// Order evaluated caregivers for display
///
/// Eligible before ineligible, then score descending, then caregiver id so
/// ties are stable across calls.
pub fn rank(
    mut candidates: Vec<RankedCandidate>,
    include_ineligible: bool,
    limit: usize,
) -> Vec<RankedCandidate> {
    if !include_ineligible {
        candidates.retain(|c| c.result.is_eligible);
    }

    candidates.sort_by(|a, b| {
        b.result
            .is_eligible
            .cmp(&a.result.is_eligible)
            .then_with(|| b.result.score.cmp(&a.result.score))
            .then_with(|| {
                let a_total = a.result.fit_score + a.result.trust_score + a.result.bonus_score;
                let b_total = b.result.fit_score + b.result.trust_score + b.result.bonus_score;
                b_total.partial_cmp(&a_total).unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.caregiver_id.cmp(&b.caregiver_id))
    });

    candidates.truncate(limit);
    candidates
}
