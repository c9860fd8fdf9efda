//! Backend payload types.
//!
//! Field names follow the backend's camelCase JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::API_SUCCESS_CODE;
use crate::core::error::ApiError;

/// Highest display order a custom concept may occupy.
pub const MAX_CONCEPT_SLOTS: u8 = 3;

/// Maximum number of concepts in a single combination.
pub const MAX_CONCEPTS_PER_SLOT: usize = 5;

// ============================================================================
// Envelope
// ============================================================================

/// `{code, msg, data}` wrapper around every backend response.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: String,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap a success envelope, mapping failure codes to [`ApiError::Rejected`].
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.code == API_SUCCESS_CODE {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            })
        }
    }
}

// ============================================================================
// Processing Status
// ============================================================================

/// Pipeline stage of an uploaded paper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Uploading,
    Converting,
    Extracting,
    Analyzing,
    PendingApproval,
    Approved,
    Rejected,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// `true` once the task will not change anymore.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Failed)
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Uploading => "Uploading",
            Self::Converting => "Converting",
            Self::Extracting => "Extracting",
            Self::Analyzing => "Analyzing",
            Self::PendingApproval => "Pending approval",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

/// Progress record of an upload-and-extract task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingStatus {
    pub task_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    pub status: TaskStatus,
    /// 0-100
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub extracted_title: Option<String>,
    #[serde(default)]
    pub extracted_authors: Option<String>,
    #[serde(default)]
    pub extracted_institution: Option<String>,
    #[serde(default)]
    pub extracted_year: Option<String>,
    #[serde(default)]
    pub extracted_source: Option<String>,
    #[serde(default)]
    pub extracted_keywords: Option<String>,
    #[serde(default)]
    pub extracted_doi: Option<String>,
    #[serde(default)]
    pub extracted_abstract: Option<String>,
    #[serde(default)]
    pub extracted_summary: Option<String>,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub updated_time: Option<String>,
    #[serde(default)]
    pub completed_time: Option<String>,
}

// ============================================================================
// Articles
// ============================================================================

/// Article record, also used as the search filter and the approval payload.
///
/// Columns without a dedicated field round-trip through `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Uploaded file as stored by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathpdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathdocx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathtxt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_concept1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_concept2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_concept3: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ArticleInfo {
    /// Search filter matching articles by title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Approval payload prefilled from the metadata extracted for `status`.
    pub fn from_extracted(status: &ProcessingStatus) -> Self {
        Self {
            title: status.extracted_title.clone(),
            keyword: status.extracted_keywords.clone(),
            summary: status.extracted_summary.clone(),
            ..Default::default()
        }
    }
}

/// One page of a paginated result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo<T> {
    #[serde(default)]
    pub page_num: u32,
    #[serde(default)]
    pub page_size: u32,
    /// Total number of rows across all pages.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub list: Vec<T>,
    #[serde(default)]
    pub has_next_page: bool,
}

// ============================================================================
// Article Summary
// ============================================================================

/// Model-generated structured summary of an article.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleSummary {
    pub id: Option<i64>,
    pub model: Option<String>,
    pub title: Option<String>,
    pub summary1: Option<String>,
    pub summary2: Option<String>,
    pub summary3: Option<String>,
    pub summary4: Option<String>,
    pub summary5: Option<String>,
    pub summary6: Option<String>,
    pub target: Option<String>,
    pub algorithm1: Option<String>,
    pub algorithm2: Option<String>,
    pub algorithm3: Option<String>,
    pub algorithm4: Option<String>,
    pub environment: Option<String>,
    pub tools: Option<String>,
    pub datas: Option<String>,
    pub standard: Option<String>,
    pub result: Option<String>,
    pub future: Option<String>,
    pub weekpoint: Option<String>,
    pub full_summary: Option<String>,
    pub keyword: Option<String>,
    pub ifteacher: Option<i32>,
}

// ============================================================================
// Custom Concepts
// ============================================================================

/// User-defined concept combination shown on the personalized graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomConcept {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Relationship the concepts hang off (e.g. `method`).
    pub relationship_name: String,
    /// `;`-separated concept list.
    pub concepts: String,
    /// Slot 1..=3.
    pub display_order: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
}

impl CustomConcept {
    /// Concepts split on `;`, trimmed, empties dropped.
    pub fn concepts_list(&self) -> Vec<&str> {
        self.concepts
            .split(';')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect()
    }

    /// Number of items the backend counts against [`MAX_CONCEPTS_PER_SLOT`].
    ///
    /// Interior empty items count; trailing separators do not.
    pub fn concept_count(&self) -> usize {
        if self.concepts.trim().is_empty() {
            return 0;
        }
        match self.concepts.trim_end_matches(';') {
            "" => 0,
            items => items.split(';').count(),
        }
    }

    /// Check the limits the backend enforces before sending.
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(1..=MAX_CONCEPT_SLOTS).contains(&self.display_order) {
            return Err(ApiError::Invalid(format!(
                "display order must be between 1 and {MAX_CONCEPT_SLOTS}"
            )));
        }
        if self.concept_count() > MAX_CONCEPTS_PER_SLOT {
            return Err(ApiError::Invalid(format!(
                "at most {MAX_CONCEPTS_PER_SLOT} concepts per combination"
            )));
        }
        if self.relationship_name.trim().is_empty() {
            return Err(ApiError::Invalid(
                "relationship name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
