// ==========================================
// 교원 전보 배치 시스템 - 서열순정렬 엔진
// ==========================================
// 레드라인: 정렬은 전면 결정적이어야 한다 (동일 입력 = 동일 순서)
// ==========================================
// 정렬 기준 (앞 기준 동률 시 다음 기준):
// 1. 희망학교 사용자정의목록 순서 (통합 희망/희망 없음은 맨 뒤)
// 2. 우선 배치 대상 먼저
// 3. 희망구분 순위 (1희망 < 2희망 < 3희망 < 비정기)
// 4. 총점 내림차순
// 5. 동점자 기준 1~2 내림차순, 3(생년월일) 오름차순, 4~7 내림차순
// 6. 레코드 ID 오름차순 (최종 안전망)
// ==========================================

use crate::domain::school::School;
use crate::domain::transfer::TransferCandidate;
use std::cmp::Ordering;
use std::collections::HashMap;

// ==========================================
// RankSorter - 서열순정렬 엔진
// ==========================================
pub struct RankSorter {
    // 무상태 엔진
}

impl RankSorter {
    pub fn new() -> Self {
        Self {}
    }

    /// 학교 ID → 사용자정의목록 순서 맵
    pub fn school_order_map(schools: &[School]) -> HashMap<i64, i32> {
        schools.iter().map(|s| (s.id, s.display_order)).collect()
    }

    /// 맨 뒤 보정값 (통합 희망자/희망 미기재자용)
    pub fn fallback_order(schools: &[School]) -> i32 {
        schools
            .iter()
            .map(|s| s.display_order)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn target_order(
        c: &TransferCandidate,
        order_map: &HashMap<i64, i32>,
        fallback: i32,
    ) -> i32 {
        c.active_wish_school()
            .and_then(|id| order_map.get(&id).copied())
            .unwrap_or(fallback)
    }

    fn compare(
        a: &TransferCandidate,
        b: &TransferCandidate,
        order_map: &HashMap<i64, i32>,
        fallback: i32,
    ) -> Ordering {
        // 1. 희망학교 목록 순서
        let order_a = Self::target_order(a, order_map, fallback);
        let order_b = Self::target_order(b, order_map, fallback);
        match order_a.cmp(&order_b) {
            Ordering::Equal => {}
            other => return other,
        }

        // 2. 우선 배치 대상 먼저
        match b.is_priority.cmp(&a.is_priority) {
            Ordering::Equal => {}
            other => return other,
        }

        // 3. 희망구분 순위
        match a
            .preference_round
            .sort_rank()
            .cmp(&b.preference_round.sort_rank())
        {
            Ordering::Equal => {}
            other => return other,
        }

        // 4. 총점 내림차순
        match b.total_score.total_cmp(&a.total_score) {
            Ordering::Equal => {}
            other => return other,
        }

        // 5. 동점자 기준 (3번만 오름차순: 숫자 작은 생년월일 = 연장자 우선)
        match b.tiebreaker_1.total_cmp(&a.tiebreaker_1) {
            Ordering::Equal => {}
            other => return other,
        }
        match b.tiebreaker_2.total_cmp(&a.tiebreaker_2) {
            Ordering::Equal => {}
            other => return other,
        }
        match a.tiebreaker_3.total_cmp(&b.tiebreaker_3) {
            Ordering::Equal => {}
            other => return other,
        }
        match b.tiebreaker_4.total_cmp(&a.tiebreaker_4) {
            Ordering::Equal => {}
            other => return other,
        }
        match b.tiebreaker_5.total_cmp(&a.tiebreaker_5) {
            Ordering::Equal => {}
            other => return other,
        }
        match b.tiebreaker_6.total_cmp(&a.tiebreaker_6) {
            Ordering::Equal => {}
            other => return other,
        }
        match b.tiebreaker_7.total_cmp(&a.tiebreaker_7) {
            Ordering::Equal => {}
            other => return other,
        }

        // 6. 최종 안전망: 레코드 ID
        a.id.cmp(&b.id)
    }

    /// 서열순정렬 (원본 목록은 건드리지 않고 정렬본 반환)
    ///
    /// # 파라미터
    /// - candidates: 정렬 대상
    /// - schools: 사용자정의목록 (목표학교 순서 기준)
    pub fn sort(
        &self,
        candidates: &[TransferCandidate],
        schools: &[School],
    ) -> Vec<TransferCandidate> {
        let order_map = Self::school_order_map(schools);
        let fallback = Self::fallback_order(schools);

        let mut sorted = candidates.to_vec();
        sorted.sort_by(|a, b| Self::compare(a, b, &order_map, fallback));
        sorted
    }
}

impl Default for RankSorter {
    fn default() -> Self {
        Self::new()
    }
}
