// ==========================================
// 교원 전보 배치 시스템 - 영역 타입 정의
// ==========================================
// 희망구분/별도정원/우선유예/라운드 상태 열거형
// 직렬화 형식: DB 텍스트 컬럼과 일치 (한국어 코드값)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 희망구분 (Preference Round)
// ==========================================
// 현재 라운드에서 어느 희망학교 열이 "활성"인지 결정한다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreferenceRound {
    First,     // 1희망
    Second,    // 2희망
    Third,     // 3희망
    Irregular, // 비정기 (배치 대상 아님)
}

impl PreferenceRound {
    /// DB 코드값 → 열거형 (알 수 없는 값은 비정기로 정규화)
    pub fn from_code(s: &str) -> Self {
        match s {
            "1희망" => PreferenceRound::First,
            "2희망" => PreferenceRound::Second,
            "3희망" => PreferenceRound::Third,
            _ => PreferenceRound::Irregular,
        }
    }

    /// 열거형 → DB 코드값
    pub fn as_code(&self) -> &'static str {
        match self {
            PreferenceRound::First => "1희망",
            PreferenceRound::Second => "2희망",
            PreferenceRound::Third => "3희망",
            PreferenceRound::Irregular => "비정기",
        }
    }

    /// 라운드 번호(1..=3) → 희망구분
    pub fn from_round_no(n: u8) -> Option<Self> {
        match n {
            1 => Some(PreferenceRound::First),
            2 => Some(PreferenceRound::Second),
            3 => Some(PreferenceRound::Third),
            _ => None,
        }
    }

    /// 서열순정렬용 순위 (1희망=1, 2희망=2, 3희망=3, 그 외=4)
    pub fn sort_rank(&self) -> i32 {
        match self {
            PreferenceRound::First => 1,
            PreferenceRound::Second => 2,
            PreferenceRound::Third => 3,
            PreferenceRound::Irregular => 4,
        }
    }
}

impl fmt::Display for PreferenceRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

// ==========================================
// 별도정원 (Separate Quota)
// ==========================================
// 설정된 교사의 이동은 과부족 계산에 반영하지 않는다 (정원 중립)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeparateQuota {
    LeaveOfAbsence, // 휴직
    Dispatched,     // 파견
}

impl SeparateQuota {
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "휴직" => Some(SeparateQuota::LeaveOfAbsence),
            "파견" => Some(SeparateQuota::Dispatched),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            SeparateQuota::LeaveOfAbsence => "휴직",
            SeparateQuota::Dispatched => "파견",
        }
    }
}

impl fmt::Display for SeparateQuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

// ==========================================
// 우선전보/전보유예 구분 (Priority Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriorityKind {
    Priority, // 우선 (총점 대체 + 우선 배치)
    Deferral, // 전보유예 (제외 처리)
}

impl PriorityKind {
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "우선" => Some(PriorityKind::Priority),
            "전보유예" => Some(PriorityKind::Deferral),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            PriorityKind::Priority => "우선",
            PriorityKind::Deferral => "전보유예",
        }
    }
}

impl fmt::Display for PriorityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

// ==========================================
// 배치 진행 상태 (Run State)
// ==========================================
// 자동 배치 상태 기계: 2/3라운드는 만기 미배치자가 있을 때만 진입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    NotStarted,
    Round1Running,
    Round1Done,
    Round2Running,
    Round2Done,
    Round3Running,
    Round3Done,
    Complete,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "NOT_STARTED"),
            RunState::Round1Running => write!(f, "ROUND1_RUNNING"),
            RunState::Round1Done => write!(f, "ROUND1_DONE"),
            RunState::Round2Running => write!(f, "ROUND2_RUNNING"),
            RunState::Round2Done => write!(f, "ROUND2_DONE"),
            RunState::Round3Running => write!(f, "ROUND3_RUNNING"),
            RunState::Round3Done => write!(f, "ROUND3_DONE"),
            RunState::Complete => write!(f, "COMPLETE"),
        }
    }
}

// ==========================================
// 고정 코드값
// ==========================================

// 관외전출입 transfer_type 이 이 값이면 과부족 계산에서 제외
pub const TRANSFER_TYPE_OUTSIDE_QUOTA: &str = "정원외";

// 제외사유 고정 라벨
pub const EXCLUSION_SAME_SCHOOL: &str = "현소속 지원";
pub const EXCLUSION_DEFERRAL: &str = "전보유예";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_round_code_round_trip() {
        for round in [
            PreferenceRound::First,
            PreferenceRound::Second,
            PreferenceRound::Third,
            PreferenceRound::Irregular,
        ] {
            assert_eq!(PreferenceRound::from_code(round.as_code()), round);
        }
    }

    #[test]
    fn test_preference_round_unknown_code_is_irregular() {
        // 알 수 없는 코드값은 비정기로 정규화 (어느 라운드에도 포함되지 않음)
        assert_eq!(PreferenceRound::from_code("임시"), PreferenceRound::Irregular);
        assert_eq!(PreferenceRound::from_code(""), PreferenceRound::Irregular);
    }

    #[test]
    fn test_sort_rank_order() {
        assert_eq!(PreferenceRound::First.sort_rank(), 1);
        assert_eq!(PreferenceRound::Second.sort_rank(), 2);
        assert_eq!(PreferenceRound::Third.sort_rank(), 3);
        assert_eq!(PreferenceRound::Irregular.sort_rank(), 4);
    }

    #[test]
    fn test_separate_quota_codes() {
        assert_eq!(SeparateQuota::from_code("휴직"), Some(SeparateQuota::LeaveOfAbsence));
        assert_eq!(SeparateQuota::from_code("파견"), Some(SeparateQuota::Dispatched));
        assert_eq!(SeparateQuota::from_code("기타"), None);
    }

    #[test]
    fn test_priority_kind_codes() {
        assert_eq!(PriorityKind::from_code("우선"), Some(PriorityKind::Priority));
        assert_eq!(PriorityKind::from_code("전보유예"), Some(PriorityKind::Deferral));
        assert_eq!(PriorityKind::from_code("과원"), None);
    }
}
