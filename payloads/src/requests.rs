use crate::{Difficulty, ExamTypeId, LevelType, NodeId, Pagination, SubjectId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query string shared by every list endpoint.
///
/// Entity specific filters (e.g. `examTypeId`) go into `filters` and are
/// flattened into the query string next to the common keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            sort_by: None,
            sort_order: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    /// Large pages, used to fill dropdowns together with
    /// [`APIClient::list_all`](crate::APIClient::list_all).
    pub fn everything() -> Self {
        Self {
            limit: 100,
            ..Self::default()
        }
    }

    /// The query for the page after the one `pagination` describes, if the
    /// server reports more. A server that answered with some other page
    /// than the one asked for ends the walk.
    pub fn next_page(&self, pagination: Option<&Pagination>) -> Option<Self> {
        let pagination = pagination?;
        (pagination.has_next_page() && pagination.page == self.page).then(|| {
            Self {
                page: self.page + 1,
                ..self.clone()
            }
        })
    }

    pub fn with_filter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamTypeDraft {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDraft {
    pub name: String,
    pub code: String,
    pub exam_type_id: ExamTypeId,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSeriesDraft {
    pub title: String,
    pub exam_type_id: ExamTypeId,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub discount_price: Option<Decimal>,
    pub total_tests: u32,
    pub free_tests: u32,
    pub validity_days: u32,
    pub is_active: bool,
    pub is_featured: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTestDraft {
    pub title: String,
    pub exam_type_id: ExamTypeId,
    pub subject_id: Option<SubjectId>,
    pub description: Option<String>,
    pub total_questions: u32,
    pub duration_minutes: u32,
    pub total_marks: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyqDraft {
    pub title: String,
    pub exam_type_id: ExamTypeId,
    pub year: i32,
    pub shift: Option<String>,
    pub total_questions: u32,
    pub duration_minutes: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option: u8,
    pub explanation: Option<String>,
    pub subject_id: Option<SubjectId>,
    pub hierarchy_node_id: Option<NodeId>,
    pub difficulty: Difficulty,
    #[serde(with = "rust_decimal::serde::float")]
    pub marks: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub negative_marks: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDraft {
    pub title: String,
    pub subject_id: Option<SubjectId>,
    pub hierarchy_node_id: Option<NodeId>,
    pub file_url: String,
    pub is_free: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    pub name: String,
    pub exam_type_id: ExamTypeId,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_days: u32,
    pub features: Vec<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Body for creating a hierarchy node. A missing parent creates a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHierarchyNode {
    pub subject_id: SubjectId,
    pub parent_id: Option<NodeId>,
    pub level_name: String,
    pub level_type: LevelType,
    pub order_index: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHierarchyNode {
    pub parent_id: Option<NodeId>,
    pub level_name: String,
    pub level_type: LevelType,
    pub order_index: i32,
    pub is_active: bool,
}
