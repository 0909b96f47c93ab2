//! Wire types for the MockTale admin API and the client that speaks it.
//!
//! Records returned by the backend live in [`responses`], request bodies in
//! [`requests`]. Every list endpoint shares the [`responses::Envelope`] shape
//! and the [`Pagination`] block defined here.

use derive_more::Display;
use serde::{Deserialize, Serialize};

pub mod api_client;
pub mod requests;
pub mod resource;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use resource::{ApiResource, Featurable};

/// Declares a string id newtype. Backend ids are opaque strings.
macro_rules! string_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(
                Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display,
                Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(pub String);

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }
        )*
    };
}

string_id!(
    ExamTypeId,
    SubjectId,
    /// Id of a node in a subject hierarchy.
    NodeId,
    TestSeriesId,
    FreeTestId,
    PyqId,
    QuestionId,
    StudentId,
    PdfId,
    SubscriptionId,
    AdminId,
);

/// Pagination block reported by list endpoints. The client only echoes
/// these values into controls; it never derives page counts itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Fixed ordering of hierarchy levels. The ordering is advisory: it only
/// drives the suggested type of a new child node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    #[display("Standard")]
    Standard,
    #[display("Class")]
    Class,
    #[display("Chapter")]
    Chapter,
    #[display("Topic")]
    Topic,
}

impl LevelType {
    pub const ALL: [LevelType; 4] = [
        LevelType::Standard,
        LevelType::Class,
        LevelType::Chapter,
        LevelType::Topic,
    ];

    /// The level a new child of this level defaults to. Topics have no
    /// deeper level, so their children stay topics.
    pub fn next(self) -> LevelType {
        match self {
            LevelType::Standard => LevelType::Class,
            LevelType::Class => LevelType::Chapter,
            LevelType::Chapter | LevelType::Topic => LevelType::Topic,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LevelType::Standard => "standard",
            LevelType::Class => "class",
            LevelType::Chapter => "chapter",
            LevelType::Topic => "topic",
        }
    }

    pub fn parse(value: &str) -> Option<LevelType> {
        Self::ALL.into_iter().find(|level| level.as_str() == value)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[display("Easy")]
    Easy,
    #[default]
    #[display("Medium")]
    Medium,
    #[display("Hard")]
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] =
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(value: &str) -> Option<Difficulty> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_type_suggests_next_level() {
        assert_eq!(LevelType::Standard.next(), LevelType::Class);
        assert_eq!(LevelType::Class.next(), LevelType::Chapter);
        assert_eq!(LevelType::Chapter.next(), LevelType::Topic);
        assert_eq!(LevelType::Topic.next(), LevelType::Topic);
    }

    #[test]
    fn level_type_parses_wire_names() {
        for level in LevelType::ALL {
            assert_eq!(LevelType::parse(level.as_str()), Some(level));
        }
        assert_eq!(LevelType::parse("unit"), None);
    }

    #[test]
    fn pagination_reports_next_page() {
        let pagination = Pagination {
            total: 45,
            page: 2,
            limit: 20,
            total_pages: 3,
        };
        assert!(pagination.has_next_page());
        assert!(
            !Pagination {
                page: 3,
                ..pagination
            }
            .has_next_page()
        );
    }
}
