use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{CaregiverProfile, ChildContext, FamilyContext, JobOpportunity};

/// Request to evaluate one caregiver against one job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_compute_ids"))]
pub struct ComputeMatchRequest {
    pub job: JobOpportunity,
    pub family: FamilyContext,
    #[serde(default)]
    pub children: Vec<ChildContext>,
    pub caregiver: CaregiverProfile,
    /// Reference time for ages and document expiry; defaults to now
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

/// Request to evaluate and rank many caregivers against one job
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rank_ids"))]
pub struct RankCandidatesRequest {
    pub job: JobOpportunity,
    pub family: FamilyContext,
    #[serde(default)]
    pub children: Vec<ChildContext>,
    #[validate(length(min = 1, max = 500))]
    pub caregivers: Vec<CaregiverProfile>,
    /// Falls back to the configured default limit
    #[serde(default)]
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u16>,
    #[serde(default)]
    pub include_ineligible: bool,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

fn missing_id(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_snapshot_ids(job: &JobOpportunity, family: &FamilyContext) -> Result<(), ValidationError> {
    if job.id.trim().is_empty() {
        return Err(missing_id("job_id", "job.id must not be empty"));
    }
    if family.id.trim().is_empty() {
        return Err(missing_id("family_id", "family.id must not be empty"));
    }
    Ok(())
}

fn validate_compute_ids(req: &ComputeMatchRequest) -> Result<(), ValidationError> {
    validate_snapshot_ids(&req.job, &req.family)?;
    if req.caregiver.id.trim().is_empty() {
        return Err(missing_id("caregiver_id", "caregiver.id must not be empty"));
    }
    Ok(())
}

fn validate_rank_ids(req: &RankCandidatesRequest) -> Result<(), ValidationError> {
    validate_snapshot_ids(&req.job, &req.family)?;
    if req.caregivers.iter().any(|c| c.id.trim().is_empty()) {
        return Err(missing_id("caregiver_id", "every caregiver needs a non-empty id"));
    }
    Ok(())
}
