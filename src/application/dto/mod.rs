/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod collect_request;
mod collect_response;
mod report_request;
mod report_response;

pub use collect_request::CollectRequest;
pub use collect_response::{CollectResponse, FileFailure};
pub use report_request::ReportRequest;
pub use report_response::{ReportResponse, TenantFailure};
