//! Ties each record type to its REST collection so the client can offer one
//! generic set of CRUD calls instead of a method per entity.

use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Display;

use crate::{requests, responses};

/// A record managed through a standard collection endpoint:
/// `GET {path}`, `POST {path}`, `PUT {path}/{id}`, `DELETE {path}/{id}` and
/// `PATCH {path}/{id}/toggle-status`.
pub trait ApiResource: DeserializeOwned + Clone + PartialEq + 'static {
    type Id: Display + Clone + PartialEq + 'static;
    /// Request body for create and update.
    type Draft: Serialize + Clone + PartialEq + 'static;

    /// Collection path below `/api/admin/`.
    const PATH: &'static str;

    fn id(&self) -> &Self::Id;
    fn is_active(&self) -> bool;
}

/// Records that additionally expose `PATCH {path}/{id}/toggle-featured`.
pub trait Featurable: ApiResource {
    fn is_featured(&self) -> bool;
}

macro_rules! api_resource {
    ($record:ty, $id:ty, $draft:ty, $path:literal) => {
        impl ApiResource for $record {
            type Id = $id;
            type Draft = $draft;

            const PATH: &'static str = $path;

            fn id(&self) -> &Self::Id {
                &self.id
            }

            fn is_active(&self) -> bool {
                self.is_active
            }
        }
    };
}

api_resource!(
    responses::ExamType,
    crate::ExamTypeId,
    requests::ExamTypeDraft,
    "exam-types"
);
api_resource!(
    responses::Subject,
    crate::SubjectId,
    requests::SubjectDraft,
    "subjects"
);
api_resource!(
    responses::TestSeries,
    crate::TestSeriesId,
    requests::TestSeriesDraft,
    "test-series"
);
api_resource!(
    responses::FreeTest,
    crate::FreeTestId,
    requests::FreeTestDraft,
    "free-tests"
);
api_resource!(responses::Pyq, crate::PyqId, requests::PyqDraft, "pyqs");
api_resource!(
    responses::Question,
    crate::QuestionId,
    requests::QuestionDraft,
    "questions"
);
api_resource!(
    responses::Student,
    crate::StudentId,
    requests::StudentDraft,
    "students"
);
api_resource!(responses::Pdf, crate::PdfId, requests::PdfDraft, "pdfs");
api_resource!(
    responses::Subscription,
    crate::SubscriptionId,
    requests::SubscriptionDraft,
    "subscriptions"
);

impl Featurable for responses::TestSeries {
    fn is_featured(&self) -> bool {
        self.is_featured
    }
}

impl Featurable for responses::Subscription {
    fn is_featured(&self) -> bool {
        self.is_featured
    }
}
