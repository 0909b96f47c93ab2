use crate::{
    AdminId, Difficulty, ExamTypeId, FreeTestId, LevelType, NodeId,
    Pagination, PdfId, PyqId, QuestionId, StudentId, SubjectId,
    SubscriptionId, TestSeriesId,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Every endpoint wraps its payload in this envelope. List endpoints add a
/// pagination block, mutations usually add a message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(alias = "_id")]
    pub id: AdminId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_exam_types: u64,
    pub total_test_series: u64,
    pub total_questions: u64,
    pub active_subscriptions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamType {
    #[serde(alias = "_id")]
    pub id: ExamTypeId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(alias = "_id")]
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    pub exam_type_id: ExamTypeId,
    /// Populated by the backend for display.
    #[serde(default)]
    pub exam_type_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A node of a subject hierarchy. Nodes arrive either flat (with
/// `parentId`) or nested (with `children`); both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    #[serde(alias = "_id")]
    pub id: NodeId,
    pub subject_id: SubjectId,
    pub level_name: String,
    pub level_type: LevelType,
    #[serde(default)]
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub order_index: i32,
    pub is_active: bool,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSeries {
    #[serde(alias = "_id")]
    pub id: TestSeriesId,
    pub title: String,
    pub exam_type_id: ExamTypeId,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount_price: Option<Decimal>,
    pub total_tests: u32,
    pub free_tests: u32,
    pub validity_days: u32,
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTest {
    #[serde(alias = "_id")]
    pub id: FreeTestId,
    pub title: String,
    pub exam_type_id: ExamTypeId,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub description: Option<String>,
    pub total_questions: u32,
    pub duration_minutes: u32,
    pub total_marks: u32,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// A previous-year question paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pyq {
    #[serde(alias = "_id")]
    pub id: PyqId,
    pub title: String,
    pub exam_type_id: ExamTypeId,
    pub year: i32,
    #[serde(default)]
    pub shift: Option<String>,
    pub total_questions: u32,
    pub duration_minutes: u32,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "_id")]
    pub id: QuestionId,
    pub question_text: String,
    pub options: Vec<String>,
    /// 1-based index into `options`.
    pub correct_option: u8,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub hierarchy_node_id: Option<NodeId>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(with = "rust_decimal::serde::float")]
    pub marks: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub negative_marks: Decimal,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(alias = "_id")]
    pub id: StudentId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub active_subscriptions: u32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pdf {
    #[serde(alias = "_id")]
    pub id: PdfId,
    pub title: String,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub hierarchy_node_id: Option<NodeId>,
    pub file_url: String,
    pub is_free: bool,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(alias = "_id")]
    pub id: SubscriptionId,
    pub name: String,
    pub exam_type_id: ExamTypeId,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}
