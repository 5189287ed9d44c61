// ==========================================
// 교원 전보 배치 시스템 - API 계층
// ==========================================
// 책임: 업무 API 제공, CLI 명령이 호출
// ==========================================

pub mod assignment_api;
pub mod error;
pub mod import_api;

// 핵심 타입 재수출
pub use assignment_api::{AssignmentApi, ReconcileReport};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
