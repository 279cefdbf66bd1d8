//! Entity structs for all auditdesk domain objects.
//!
//! Each stored entity maps to a table in the SQL backend and to a collection
//! in the in-memory backend. The `*View` types add the joined display columns
//! the dashboard reads.

mod audit;
mod company;
mod news;
mod user;

pub use audit::{Audit, AuditView};
pub use company::{Company, CompanySummary};
pub use news::{News, NewsView};
pub use user::{User, UserInfo};
