/// Use cases module containing application business logic orchestration
mod collect_exports;
mod generate_report;

pub use collect_exports::CollectExportsUseCase;
pub use generate_report::GenerateReportUseCase;
