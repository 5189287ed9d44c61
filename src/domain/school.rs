// ==========================================
// 교원 전보 배치 시스템 - 학교 영역 모델
// ==========================================
// 불변식: 정원(quota)과 현원(current_count)은 독립 관리,
//         과부족은 항상 재계산하며 저장값을 진실로 삼지 않는다
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// School - 학교 기본 정보
// ==========================================
// display_order: 사용자정의목록 정렬 순서 (보고서/동순위 판정의 정준 순서)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub full_name: Option<String>,
    pub display_order: i32,
    pub quota: i32,         // 정원
    pub current_count: i32, // 현원 (남 + 여)
    pub male_count: i32,
    pub female_count: i32,
}

impl School {
    /// 남/여 인원으로 현원 재계산
    pub fn recompute_current_count(&mut self) {
        self.current_count = self.male_count + self.female_count;
    }
}

// ==========================================
// SchoolShortage - 학교별 과부족 (파생 뷰)
// ==========================================
// shortage < 0: 결원 있음 (전입 수용 가능)
// shortage >= 0: 자리 없음
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolShortage {
    pub school_id: i64,
    pub name: String,
    pub quota: i32,
    pub current_count: i32, // 이동분 반영 후 현원
    pub shortage: i32,      // current_count - quota
}
