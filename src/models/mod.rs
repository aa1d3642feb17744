//! Domain record types shared by all storage backends.
//!
//! These are the semantic shapes of the four record kinds the backend
//! manages. Storage backends serialize them directly; the aggregation
//! engine only ever reads them.

pub mod client;
pub mod feedback;
pub mod form;
pub mod report;

pub use client::{Client, ClientPatch, ClientStatus, NewClient};
pub use feedback::{FeedbackRecord, FeedbackSource, NewFeedback, RatingEntry};
pub use form::{Form, FormCategory, FormPatch, FormQuestion, FormStatus, NewForm, QuestionType};
pub use report::{NewReport, Report, ReportFormat, ReportPatch, ReportStatus, ReportType};
