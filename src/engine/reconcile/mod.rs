// ==========================================
// 교원 전보 배치 시스템 - 점검 엔진 모음
// ==========================================
// 제외 점검 / 우선유예 점검 / 과원해소 점검
// 공통 규칙: 이름 대조가 0건 또는 2건 이상이면 자동 반영하지 않고
//            경고만 남긴다 (동명이인 오배정 방지)
// ==========================================

pub mod exclusion;
pub mod priority;
pub mod surplus;

pub use exclusion::{ExclusionChecker, ExclusionOutcome};
pub use priority::{PriorityChecker, PriorityOutcome};
pub use surplus::{SurplusOutcome, SurplusResolver};

use serde::{Deserialize, Serialize};

// ==========================================
// MatchWarning - 대조 실패 경고
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWarning {
    /// 대조 기준 학교 (기재 없으면 None)
    pub school_id: Option<i64>,
    pub teacher_name: String,
    /// 대조된 건수 (0 = 대상 없음, 2 이상 = 동명 다수)
    pub matches: usize,
    /// 경고를 낸 기록 출처 (결원/관외전출/우선전보 등)
    pub source: String,
}
