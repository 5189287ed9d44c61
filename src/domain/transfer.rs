// ==========================================
// 교원 전보 배치 시스템 - 전보 영역 모델
// ==========================================
// 관내전출입(배치 대상 명부) + 이동 기록(결원/충원/관외전출입/우선유예/과원)
// 용도: 가져오기 계층이 기록, 엔진 계층이 판독/배정 기록
// ==========================================

use crate::domain::types::{PreferenceRound, PriorityKind, SeparateQuota};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// TransferCandidate - 관내전출입 레코드 (배치 대상)
// ==========================================
// 불변식:
// - exclusion_reason 이 설정되면 배치 대상에서 영구 제외
// - "활성 희망학교"는 저장하지 않고 preference_round 로 계산
// - assigned_school_id 는 엔진의 출력이며 명시적 초기화 전까지 유지
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCandidate {
    // ===== 식별 =====
    pub id: i64,
    pub seq: Option<i32>, // 명부 순번 (엑셀 입력 순서)

    // ===== 기본 정보 =====
    pub teacher_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub note: Option<String>,

    // ===== 소속/배정 =====
    pub current_school_id: Option<i64>, // 현임교 (가져오기 후 필수)
    pub assigned_school_id: Option<i64>, // 배정학교 (엔진 출력)

    // ===== 희망 =====
    pub preference_round: PreferenceRound, // 희망구분 (라운드별 활성 희망 선택)
    pub wish_school_1_id: Option<i64>,
    pub wish_school_2_id: Option<i64>,
    pub wish_school_3_id: Option<i64>,

    // ===== 통합(벽지) 희망 (최대 8, 순서대로 선착 배정) =====
    pub remote_wish_1_id: Option<i64>,
    pub remote_wish_2_id: Option<i64>,
    pub remote_wish_3_id: Option<i64>,
    pub remote_wish_4_id: Option<i64>,
    pub remote_wish_5_id: Option<i64>,
    pub remote_wish_6_id: Option<i64>,
    pub remote_wish_7_id: Option<i64>,
    pub remote_wish_8_id: Option<i64>,

    // ===== 플래그 =====
    pub is_expired: bool,  // 만기자 (미배치 시 다음 라운드로 이월)
    pub is_priority: bool, // 우선 배치 대상

    // ===== 제외/별도정원 =====
    pub exclusion_reason: Option<String>,
    pub separate_quota: Option<SeparateQuota>, // 설정 시 정원 중립 이동

    // ===== 서열 =====
    pub total_score: f64,    // 총점 (소수 2자리)
    pub special_bonus: f64,  // 특별가산점 (1희망이 지정 지구일 때만 반영)
    pub tiebreaker_1: f64,   // 2_현임교 근무년수 (내림차순)
    pub tiebreaker_2: f64,   // 2_경력점 (내림차순)
    pub tiebreaker_3: f64,   // 1_생년월일 (오름차순: 숫자 작은 쪽 = 연장자 우선)
    pub tiebreaker_4: f64,   // 내림차순
    pub tiebreaker_5: f64,   // 내림차순
    pub tiebreaker_6: f64,   // 내림차순
    pub tiebreaker_7: f64,   // 내림차순
}

impl TransferCandidate {
    /// 희망구분에 따른 활성 희망학교 (저장하지 않고 계산)
    pub fn active_wish_school(&self) -> Option<i64> {
        match self.preference_round {
            PreferenceRound::First => self.wish_school_1_id,
            PreferenceRound::Second => self.wish_school_2_id,
            PreferenceRound::Third => self.wish_school_3_id,
            PreferenceRound::Irregular => self.wish_school_1_id,
        }
    }

    /// 통합(벽지) 희망 목록 (순서 유지)
    pub fn remote_wish_ids(&self) -> [Option<i64>; 8] {
        [
            self.remote_wish_1_id,
            self.remote_wish_2_id,
            self.remote_wish_3_id,
            self.remote_wish_4_id,
            self.remote_wish_5_id,
            self.remote_wish_6_id,
            self.remote_wish_7_id,
            self.remote_wish_8_id,
        ]
    }

    /// 통합(벽지) 희망자 여부 (활성 희망이 없고 벽지 1희망이 있음)
    pub fn is_remote_wisher(&self) -> bool {
        self.active_wish_school().is_none() && self.remote_wish_1_id.is_some()
    }
}

// ==========================================
// VacancyRecord - 결원/충원 레코드
// ==========================================
// 결원(vacancies)과 충원(supplements)은 동일 형태를 공유한다
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyRecord {
    pub id: i64,
    pub seq: Option<i32>,
    pub type_code: Option<String>, // 결원 종류 (휴직/파견/퇴직/...)
    pub school_id: Option<i64>,
    pub teacher_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub note: Option<String>,
}

// ==========================================
// ExternalOut - 관외전출 레코드
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalOut {
    pub id: i64,
    pub seq: Option<i32>,
    pub transfer_type: String, // "정원외" 면 과부족 계산 제외
    pub school_id: i64,
    pub teacher_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub destination: Option<String>, // 전출 지역
    pub separate_quota: Option<String>,
    pub note: Option<String>,
}

// ==========================================
// ExternalIn - 관외전입 레코드
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalIn {
    pub id: i64,
    pub seq: Option<i32>,
    pub transfer_type: String,
    pub origin_school: Option<String>, // 전입 전 소속 (자유 기재)
    pub teacher_name: String,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub assigned_school_id: Option<i64>,
    pub separate_quota: Option<String>,
    pub note: Option<String>,
}

// ==========================================
// PriorityRecord - 우선전보/전보유예 레코드
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityRecord {
    pub id: i64,
    pub kind: PriorityKind,
    pub school_id: Option<i64>,
    pub teacher_name: String,
    pub total_score: Option<f64>, // 우선전보 시 대체 총점
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub note: Option<String>,
}

// ==========================================
// SurplusRecord - 과원 레코드
// ==========================================
// stay_current=true 인 교사만 과원해소 점검 대상
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurplusRecord {
    pub id: i64,
    pub school_id: i64,
    pub teacher_name: String,
    pub surplus_number: i32, // 과원순번 (큰 번호부터 해소)
    pub stay_current: bool,  // 현학교 남기 희망
    pub resolved: bool,      // 과원해소 여부 (점검 출력)
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub note: Option<String>,
}

// ==========================================
// AssignmentDecision - 라운드 배정 결정
// ==========================================
// 엔진의 출력이자 저장소의 입력 (라운드 단위 일괄 반영)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDecision {
    pub candidate_id: i64,
    pub school_id: i64,
}

// ==========================================
// ExclusionUpdate - 제외 점검 반영값
// ==========================================
// 제외 점검 엔진의 출력이자 저장소의 입력 (점검 단위 일괄 반영)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionUpdate {
    pub candidate_id: i64,
    pub exclusion_reason: Option<String>,
    pub separate_quota: Option<SeparateQuota>,
}

// ==========================================
// PriorityScoreUpdate - 우선전보 반영값
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityScoreUpdate {
    pub candidate_id: i64,
    pub total_score: f64,
}

// ==========================================
// 보고 구조체
// ==========================================

/// 배치 통계
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentStats {
    pub total: usize,
    pub assigned: usize,
    pub excluded: usize,
    pub unassigned: usize,
    pub assignment_rate: i32, // 제외 인원을 뺀 모수 대비 % (반올림)
}
