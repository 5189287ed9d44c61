// ==========================================
// 교원 전보 배치 시스템 - 라운드 배정 엔진
// ==========================================
// 레드라인: 정원 초과 배정 금지 (shortage < 0 인 학교만 수용)
// ==========================================
// 책임: 서열순정렬된 명부를 여러 차례 순회하며 고정점까지 배정
// 한 명의 전출이 현임교 자리를 열어 뒷순위 배정을 연쇄로 가능하게
// 하므로, 변화가 없는 순회가 나올 때까지 반복한다 (상한 10회)
// ==========================================

use crate::domain::transfer::{AssignmentDecision, TransferCandidate};
use crate::domain::types::PreferenceRound;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 순회 상한 (이 안에 고정점 미도달 시 미수렴 보고)
pub const MAX_PASSES: u32 = 10;

// ==========================================
// AssignmentOutcome - 라운드 배정 결과
// ==========================================
#[derive(Debug, Clone)]
pub struct AssignmentOutcome {
    pub decisions: Vec<AssignmentDecision>,
    pub assigned: usize,
    pub passes_used: u32,
    pub converged: bool,
}

// ==========================================
// AssignmentEngine - 라운드 배정 엔진
// ==========================================
pub struct AssignmentEngine {
    // 무상태 엔진
}

impl AssignmentEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 라운드 배정 대상 여부
    ///
    /// 미배정 + 제외사유 없음 + 정기 희망구분 + 희망학교 기재
    pub fn is_round_eligible(c: &TransferCandidate) -> bool {
        c.assigned_school_id.is_none()
            && c.exclusion_reason.is_none()
            && c.preference_round != PreferenceRound::Irregular
            && (c.active_wish_school().is_some() || c.remote_wish_1_id.is_some())
    }

    /// 한 명 배정 시 과부족 반영
    ///
    /// - 별도정원 이동은 정원 중립: 목표학교 자리도 소진하지 않는다
    /// - 목표학교: 자리 하나 소진
    /// - 현임교: 만기자가 아니고 실제 이동이면 자리 하나 열림
    ///   (만기자의 이탈은 과부족 계산에서 이미 반영됨)
    fn apply_move(c: &TransferCandidate, target: i64, shortage: &mut HashMap<i64, i32>) {
        if c.separate_quota.is_some() {
            return;
        }

        *shortage.entry(target).or_insert(0) += 1;

        if !c.is_expired {
            if let Some(origin) = c.current_school_id {
                if origin != target {
                    *shortage.entry(origin).or_insert(0) -= 1;
                }
            }
        }
    }

    fn has_room(shortage: &HashMap<i64, i32>, school_id: i64) -> bool {
        shortage.get(&school_id).copied().unwrap_or(0) < 0
    }

    /// 라운드 배정 실행 (순수 연산, DB 접근 없음)
    ///
    /// # 파라미터
    /// - ordered: 서열순정렬된 명부 (배정 상태 포함)
    /// - shortage: 학교별 과부족 맵 (배정에 따라 갱신됨)
    ///
    /// # 반환
    /// AssignmentOutcome (결정 목록 + 수렴 여부)
    #[instrument(skip(self, ordered, shortage), fields(candidates = ordered.len()))]
    pub fn run_round(
        &self,
        ordered: &[TransferCandidate],
        shortage: &mut HashMap<i64, i32>,
    ) -> AssignmentOutcome {
        let mut assigned: HashMap<i64, i64> = HashMap::new();
        let mut decisions: Vec<AssignmentDecision> = Vec::new();
        let mut passes_used = 0;
        let mut converged = false;

        for pass in 1..=MAX_PASSES {
            passes_used = pass;
            let mut changed = 0usize;

            for c in ordered {
                if assigned.contains_key(&c.id) || !Self::is_round_eligible(c) {
                    continue;
                }

                // 지정 희망자: 활성 희망학교 한 곳만 시도
                if let Some(wish) = c.active_wish_school() {
                    if Self::has_room(shortage, wish) {
                        Self::apply_move(c, wish, shortage);
                        assigned.insert(c.id, wish);
                        decisions.push(AssignmentDecision {
                            candidate_id: c.id,
                            school_id: wish,
                        });
                        changed += 1;
                    }
                    continue;
                }

                // 통합 희망자: 기재 순서대로 선착 배정
                for wish in c.remote_wish_ids().into_iter().flatten() {
                    if Self::has_room(shortage, wish) {
                        Self::apply_move(c, wish, shortage);
                        assigned.insert(c.id, wish);
                        decisions.push(AssignmentDecision {
                            candidate_id: c.id,
                            school_id: wish,
                        });
                        changed += 1;
                        break;
                    }
                }
            }

            debug!(pass, changed, "배정 순회 완료");

            // 변화 없는 순회 = 고정점 도달
            if changed == 0 {
                converged = true;
                break;
            }
        }

        AssignmentOutcome {
            assigned: decisions.len(),
            decisions,
            passes_used,
            converged,
        }
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SeparateQuota;

    fn candidate(id: i64, current: i64, wish: Option<i64>, score: f64) -> TransferCandidate {
        TransferCandidate {
            id,
            seq: None,
            teacher_name: format!("교사{}", id),
            gender: None,
            birth_date: None,
            note: None,
            current_school_id: Some(current),
            assigned_school_id: None,
            preference_round: PreferenceRound::First,
            wish_school_1_id: wish,
            wish_school_2_id: None,
            wish_school_3_id: None,
            remote_wish_1_id: None,
            remote_wish_2_id: None,
            remote_wish_3_id: None,
            remote_wish_4_id: None,
            remote_wish_5_id: None,
            remote_wish_6_id: None,
            remote_wish_7_id: None,
            remote_wish_8_id: None,
            is_expired: false,
            is_priority: false,
            exclusion_reason: None,
            separate_quota: None,
            total_score: score,
            special_bonus: 0.0,
            tiebreaker_1: 0.0,
            tiebreaker_2: 0.0,
            tiebreaker_3: 0.0,
            tiebreaker_4: 0.0,
            tiebreaker_5: 0.0,
            tiebreaker_6: 0.0,
            tiebreaker_7: 0.0,
        }
    }

    #[test]
    fn test_assigns_only_when_room_exists() {
        // 학교 2만 자리 있음
        let mut shortage = HashMap::from([(1, 0), (2, -1), (3, 0)]);
        let candidates = vec![
            candidate(1, 1, Some(2), 90.0),
            candidate(2, 1, Some(3), 80.0),
        ];

        let outcome = AssignmentEngine::new().run_round(&candidates, &mut shortage);
        assert_eq!(outcome.assigned, 1);
        assert_eq!(outcome.decisions[0].candidate_id, 1);
        assert_eq!(shortage[&2], 0);
        assert!(outcome.converged);
    }

    #[test]
    fn test_departure_opens_cascading_slot() {
        // 1번의 전출(1→2)이 학교 1의 자리를 열어 2번(3→1)이 다음 순회에 배정
        let mut shortage = HashMap::from([(1, 0), (2, -1), (3, 0)]);
        let candidates = vec![
            candidate(1, 1, Some(2), 90.0),
            candidate(2, 3, Some(1), 80.0),
        ];

        let outcome = AssignmentEngine::new().run_round(&candidates, &mut shortage);
        assert_eq!(outcome.assigned, 2);
        assert!(outcome.converged);
        assert!(outcome.passes_used >= 2);
        assert_eq!(shortage[&1], 0);
        assert_eq!(shortage[&2], 0);
        assert_eq!(shortage[&3], -1);
    }

    #[test]
    fn test_separate_quota_move_is_quota_neutral() {
        let mut shortage = HashMap::from([(1, 0), (2, -1)]);
        let mut c = candidate(1, 1, Some(2), 90.0);
        c.separate_quota = Some(SeparateQuota::Dispatched);

        let outcome = AssignmentEngine::new().run_round(&[c], &mut shortage);
        assert_eq!(outcome.assigned, 1);
        // 별도정원 이동은 목표학교 자리를 소진하지도, 현임교 자리를 열지도 않는다
        assert_eq!(shortage[&1], 0);
        assert_eq!(shortage[&2], -1);
    }

    #[test]
    fn test_separate_quota_move_does_not_block_next_candidate() {
        // 자리 하나에 별도정원자 + 일반자: 둘 다 배정되어야 한다
        let mut shortage = HashMap::from([(1, 0), (2, -1)]);
        let mut neutral = candidate(1, 1, Some(2), 90.0);
        neutral.separate_quota = Some(SeparateQuota::LeaveOfAbsence);
        let normal = candidate(2, 1, Some(2), 80.0);

        let outcome = AssignmentEngine::new().run_round(&[neutral, normal], &mut shortage);
        assert_eq!(outcome.assigned, 2);
        assert_eq!(shortage[&2], 0);
    }

    #[test]
    fn test_expired_departure_does_not_double_open() {
        // 만기자의 이탈분은 과부족 계산에서 이미 빠져 있으므로
        // 배정 시 현임교를 추가로 열지 않는다
        let mut shortage = HashMap::from([(1, -1), (2, -1)]);
        let mut c = candidate(1, 1, Some(2), 90.0);
        c.is_expired = true;

        let outcome = AssignmentEngine::new().run_round(&[c], &mut shortage);
        assert_eq!(outcome.assigned, 1);
        assert_eq!(shortage[&1], -1);
        assert_eq!(shortage[&2], 0);
    }

    #[test]
    fn test_remote_wisher_first_fit() {
        let mut shortage = HashMap::from([(1, 0), (2, 0), (3, -1)]);
        let mut c = candidate(1, 9, None, 50.0);
        c.remote_wish_1_id = Some(1);
        c.remote_wish_2_id = Some(2);
        c.remote_wish_3_id = Some(3);

        let outcome = AssignmentEngine::new().run_round(&[c], &mut shortage);
        assert_eq!(outcome.assigned, 1);
        assert_eq!(outcome.decisions[0].school_id, 3);
    }

    #[test]
    fn test_excluded_and_assigned_are_skipped() {
        let mut shortage = HashMap::from([(2, -5)]);
        let mut excluded = candidate(1, 1, Some(2), 90.0);
        excluded.exclusion_reason = Some("전보유예".to_string());
        let mut already = candidate(2, 1, Some(2), 80.0);
        already.assigned_school_id = Some(2);

        let outcome = AssignmentEngine::new().run_round(&[excluded, already], &mut shortage);
        assert_eq!(outcome.assigned, 0);
        assert_eq!(shortage[&2], -5);
    }

    #[test]
    fn test_no_room_anywhere_converges_without_assignments() {
        let mut shortage = HashMap::from([(2, 0)]);
        let candidates = vec![candidate(1, 1, Some(2), 90.0)];

        let outcome = AssignmentEngine::new().run_round(&candidates, &mut shortage);
        assert_eq!(outcome.assigned, 0);
        assert_eq!(outcome.passes_used, 1);
        assert!(outcome.converged);
    }
}
