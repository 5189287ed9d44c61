// ==========================================
// 교원 전보 배치 시스템 - 영역 계층
// ==========================================
// 책임: 엔터티와 타입 정의, 비즈니스 규칙은 엔진 계층에
// ==========================================

pub mod school;
pub mod transfer;
pub mod types;

pub use school::{School, SchoolShortage};
pub use transfer::{
    AssignmentDecision, AssignmentStats, ExclusionUpdate, ExternalIn, ExternalOut, PriorityRecord,
    PriorityScoreUpdate, SurplusRecord, TransferCandidate, VacancyRecord,
};
pub use types::{PreferenceRound, PriorityKind, RunState, SeparateQuota};
