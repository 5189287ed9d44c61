// ==========================================
// 교원 전보 배치 시스템 - 엔진 계층
// ==========================================
// 레드라인: 엔진은 순수 연산, DB 접근 금지 (영속화는 API 계층)
// 파이프라인: 과부족 계산 → 서열순정렬 → 라운드 배정 → 자동 진행
// ==========================================

pub mod assignment;
pub mod ordering;
pub mod orchestrator;
pub mod reconcile;
pub mod shortage;

pub use assignment::{AssignmentEngine, AssignmentOutcome, MAX_PASSES};
pub use orchestrator::{AutoAssignReport, RoundOrchestrator, RoundResult};
pub use ordering::RankSorter;
pub use reconcile::{
    ExclusionChecker, ExclusionOutcome, MatchWarning, PriorityChecker, PriorityOutcome,
    SurplusOutcome, SurplusResolver,
};
pub use shortage::{MovementSnapshot, ShortageCalculator};
