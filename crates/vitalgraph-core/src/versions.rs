//! # Intervention Version History
//!
//! Admin-authored draft/publish/archive lifecycle over the intervention
//! catalog. Version lists live inside the persisted document; simulation
//! itself always resolves against the built-in catalog.

use crate::interventions::{Contraindication, InterventionEffect, builtin_interventions};
use crate::state::now_iso;
use crate::types::VitalError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// MODELS
// =============================================================================

/// Lifecycle state of one catalog version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Published,
    Archived,
}

/// Citation for the study a version's effect sizes were taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySource {
    pub url: String,
    pub title: String,
    pub authors: String,
    pub year: u32,
    pub doi: String,
    pub scraped_at: String,
}

/// One immutable snapshot of an intervention's definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionVersion {
    pub id: String,
    pub intervention_id: String,
    pub version_number: u32,
    pub status: VersionStatus,
    pub name: String,
    pub category: String,
    pub duration_weeks: u32,
    pub frequency: String,
    pub description: String,
    pub effects: Vec<InterventionEffect>,
    pub contraindications: Vec<Contraindication>,
    #[serde(default)]
    pub study_source: Option<StudySource>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Editable fields of a version.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionInput {
    #[serde(alias = "intervention_id")]
    pub intervention_id: String,
    pub name: String,
    pub category: String,
    #[serde(alias = "duration_weeks")]
    pub duration_weeks: u32,
    pub frequency: String,
    pub description: String,
    pub effects: Vec<InterventionEffect>,
    #[serde(default)]
    pub contraindications: Vec<Contraindication>,
    #[serde(default, alias = "study_source")]
    pub study_source: Option<StudySource>,
}

const CATEGORIES: [&str; 6] = ["strength", "cardio", "diet", "sleep", "stress", "hybrid"];

fn validate_input(input: &VersionInput) -> Result<(), VitalError> {
    let id_ok = !input.intervention_id.is_empty()
        && input
            .intervention_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !id_ok {
        return Err(VitalError::Validation(
            "intervention_id must be lowercase alphanumeric plus underscores".into(),
        ));
    }
    if input.name.trim().is_empty() {
        return Err(VitalError::Validation("name is required".into()));
    }
    if !CATEGORIES.contains(&input.category.as_str()) {
        return Err(VitalError::Validation("category is invalid".into()));
    }
    if input.duration_weeks < 1 {
        return Err(VitalError::Validation(
            "duration_weeks must be a positive number".into(),
        ));
    }
    if input.frequency.trim().is_empty() {
        return Err(VitalError::Validation("frequency is required".into()));
    }
    if input.description.trim().is_empty() {
        return Err(VitalError::Validation("description is required".into()));
    }
    if input.effects.is_empty() {
        return Err(VitalError::Validation(
            "effects must contain at least one entry".into(),
        ));
    }
    for effect in &input.effects {
        if !effect.change_value.is_finite() {
            return Err(VitalError::Validation(
                "effect changeValue must be numeric".into(),
            ));
        }
        if effect.assumptions.trim().is_empty() {
            return Err(VitalError::Validation(
                "effect assumptions are required".into(),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// LIFECYCLE OPERATIONS
// =============================================================================

/// Seed version 1 (published) of every built-in intervention into an empty
/// history. A non-empty history is returned untouched.
pub fn ensure_seed(versions: &mut Vec<InterventionVersion>) {
    if !versions.is_empty() {
        return;
    }
    let created_at = now_iso();
    for intervention in builtin_interventions() {
        versions.push(InterventionVersion {
            id: Uuid::new_v4().to_string(),
            intervention_id: intervention.id.clone(),
            version_number: 1,
            status: VersionStatus::Published,
            name: intervention.name.clone(),
            category: intervention.category.clone(),
            duration_weeks: intervention.duration_weeks,
            frequency: intervention.frequency.clone(),
            description: intervention.description.clone(),
            effects: intervention.effects.clone(),
            contraindications: intervention.contraindications.clone(),
            study_source: None,
            created_by: "system".into(),
            created_at: created_at.clone(),
            updated_at: created_at.clone(),
        });
    }
}

fn max_version_number(
    versions: &[InterventionVersion],
    intervention_id: &str,
    status: Option<VersionStatus>,
) -> u32 {
    versions
        .iter()
        .filter(|v| v.intervention_id == intervention_id)
        .filter(|v| status.is_none_or(|s| v.status == s))
        .map(|v| v.version_number)
        .max()
        .unwrap_or(0)
}

/// Create a new draft numbered one past the intervention's highest
/// existing version.
pub fn create_draft(
    versions: &mut Vec<InterventionVersion>,
    input: VersionInput,
    author_id: &str,
) -> Result<InterventionVersion, VitalError> {
    validate_input(&input)?;
    let now = now_iso();
    let next = max_version_number(versions, &input.intervention_id, None) + 1;
    let draft = InterventionVersion {
        id: Uuid::new_v4().to_string(),
        intervention_id: input.intervention_id,
        version_number: next,
        status: VersionStatus::Draft,
        name: input.name,
        category: input.category,
        duration_weeks: input.duration_weeks,
        frequency: input.frequency,
        description: input.description,
        effects: input.effects,
        contraindications: input.contraindications,
        study_source: input.study_source,
        created_by: author_id.to_owned(),
        created_at: now.clone(),
        updated_at: now,
    };
    versions.push(draft.clone());
    Ok(draft)
}

/// Overwrite the editable fields of an existing draft.
pub fn update_draft(
    versions: &mut [InterventionVersion],
    intervention_id: &str,
    version_number: u32,
    input: VersionInput,
) -> Result<InterventionVersion, VitalError> {
    validate_input(&input)?;
    let target = versions
        .iter_mut()
        .find(|v| v.intervention_id == intervention_id && v.version_number == version_number)
        .ok_or_else(|| VitalError::NotFound("Intervention version not found".into()))?;
    if target.status != VersionStatus::Draft {
        return Err(VitalError::Validation(
            "Only draft versions can be updated".into(),
        ));
    }
    target.name = input.name;
    target.category = input.category;
    target.duration_weeks = input.duration_weeks;
    target.frequency = input.frequency;
    target.description = input.description;
    target.effects = input.effects;
    target.contraindications = input.contraindications;
    target.study_source = input.study_source;
    target.updated_at = now_iso();
    Ok(target.clone())
}

/// Publish the newest draft of an intervention as a fresh published
/// version; the draft itself is archived in place.
pub fn publish_latest_draft(
    versions: &mut Vec<InterventionVersion>,
    intervention_id: &str,
    author_id: &str,
) -> Result<InterventionVersion, VitalError> {
    let draft_index = versions
        .iter()
        .enumerate()
        .filter(|(_, v)| v.intervention_id == intervention_id && v.status == VersionStatus::Draft)
        .max_by_key(|(_, v)| v.version_number)
        .map(|(i, _)| i)
        .ok_or_else(|| VitalError::NotFound("No draft found for intervention".into()))?;

    let next_published =
        max_version_number(versions, intervention_id, Some(VersionStatus::Published)) + 1;
    let now = now_iso();

    let mut published = versions[draft_index].clone();
    published.id = Uuid::new_v4().to_string();
    published.version_number = next_published;
    published.status = VersionStatus::Published;
    published.created_by = author_id.to_owned();
    published.created_at = now.clone();
    published.updated_at = now.clone();

    versions[draft_index].status = VersionStatus::Archived;
    versions[draft_index].updated_at = now;

    versions.push(published.clone());
    Ok(published)
}

/// Delete a draft. Published and archived versions are immutable.
pub fn delete_draft(
    versions: &mut Vec<InterventionVersion>,
    intervention_id: &str,
    version_number: u32,
) -> Result<InterventionVersion, VitalError> {
    let index = versions
        .iter()
        .position(|v| v.intervention_id == intervention_id && v.version_number == version_number)
        .ok_or_else(|| VitalError::NotFound("Intervention version not found".into()))?;
    if versions[index].status != VersionStatus::Draft {
        return Err(VitalError::Validation(
            "Only draft versions can be deleted".into(),
        ));
    }
    Ok(versions.remove(index))
}

/// Exact version lookup.
#[must_use]
pub fn find_version<'a>(
    versions: &'a [InterventionVersion],
    intervention_id: &str,
    version_number: u32,
) -> Option<&'a InterventionVersion> {
    versions
        .iter()
        .find(|v| v.intervention_id == intervention_id && v.version_number == version_number)
}

/// All versions of an intervention, newest first.
#[must_use]
pub fn list_by_intervention(
    versions: &[InterventionVersion],
    intervention_id: &str,
) -> Vec<InterventionVersion> {
    let mut list: Vec<InterventionVersion> = versions
        .iter()
        .filter(|v| v.intervention_id == intervention_id)
        .cloned()
        .collect();
    list.sort_by(|a, b| {
        b.version_number
            .cmp(&a.version_number)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
    list
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interventions::InterventionEffect;
    use crate::types::{Confidence, MetricName};

    fn input(intervention_id: &str) -> VersionInput {
        VersionInput {
            intervention_id: intervention_id.into(),
            name: "Cardio v2".into(),
            category: "cardio".into(),
            duration_weeks: 6,
            frequency: "4x/week".into(),
            description: "Revised conditioning block.".into(),
            effects: vec![InterventionEffect {
                metric: MetricName::Vo2Max,
                change_value: 8.0,
                unit: "%".into(),
                confidence: Confidence::Moderate,
                assumptions: "Consistent adherence.".into(),
                range: None,
            }],
            contraindications: vec![],
            study_source: None,
        }
    }

    #[test]
    fn seed_publishes_version_one_of_each_builtin() {
        let mut versions = Vec::new();
        ensure_seed(&mut versions);
        assert_eq!(versions.len(), 4);
        assert!(versions
            .iter()
            .all(|v| v.version_number == 1 && v.status == VersionStatus::Published));
        // idempotent
        ensure_seed(&mut versions);
        assert_eq!(versions.len(), 4);
    }

    #[test]
    fn draft_numbers_continue_past_existing_versions() {
        let mut versions = Vec::new();
        ensure_seed(&mut versions);
        let draft = create_draft(&mut versions, input("cardio_moderate_3x"), "admin").expect("draft");
        assert_eq!(draft.version_number, 2);
        assert_eq!(draft.status, VersionStatus::Draft);
    }

    #[test]
    fn publish_archives_the_draft_and_numbers_past_published() {
        let mut versions = Vec::new();
        ensure_seed(&mut versions);
        create_draft(&mut versions, input("cardio_moderate_3x"), "admin").expect("draft");
        let published =
            publish_latest_draft(&mut versions, "cardio_moderate_3x", "admin").expect("published");
        assert_eq!(published.version_number, 2);
        assert_eq!(published.status, VersionStatus::Published);
        let archived = find_version(&versions, "cardio_moderate_3x", 2)
            .filter(|v| v.status == VersionStatus::Archived);
        // the draft kept its number and was archived in place
        assert!(archived.is_some() || versions.iter().any(|v| v.status == VersionStatus::Archived));
        assert!(matches!(
            publish_latest_draft(&mut versions, "cardio_moderate_3x", "admin"),
            Err(VitalError::NotFound(_))
        ));
    }

    #[test]
    fn only_drafts_can_be_updated_or_deleted() {
        let mut versions = Vec::new();
        ensure_seed(&mut versions);
        assert!(matches!(
            update_draft(&mut versions, "cardio_moderate_3x", 1, input("cardio_moderate_3x")),
            Err(VitalError::Validation(_))
        ));
        assert!(matches!(
            delete_draft(&mut versions, "cardio_moderate_3x", 1),
            Err(VitalError::Validation(_))
        ));
        create_draft(&mut versions, input("cardio_moderate_3x"), "admin").expect("draft");
        let updated = update_draft(
            &mut versions,
            "cardio_moderate_3x",
            2,
            input("cardio_moderate_3x"),
        )
        .expect("updated");
        assert_eq!(updated.name, "Cardio v2");
        delete_draft(&mut versions, "cardio_moderate_3x", 2).expect("deleted");
        assert!(find_version(&versions, "cardio_moderate_3x", 2).is_none());
    }

    #[test]
    fn listing_sorts_newest_first() {
        let mut versions = Vec::new();
        ensure_seed(&mut versions);
        create_draft(&mut versions, input("diet_500_deficit"), "admin").expect("draft");
        let listed = list_by_intervention(&versions, "diet_500_deficit");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].version_number, 2);
    }

    #[test]
    fn input_validation_rejects_bad_payloads() {
        let mut versions = Vec::new();
        let mut bad = input("Bad Id");
        assert!(create_draft(&mut versions, bad.clone(), "admin").is_err());
        bad = input("ok_id");
        bad.effects.clear();
        assert!(create_draft(&mut versions, bad, "admin").is_err());
    }
}
