// ==========================================
// 교원 전보 배치 시스템 - 우선유예 점검 엔진
// ==========================================
// 책임: 우선전보/전보유예 기록을 명부에 반영
// - 우선: 대체 총점 적용 + 우선 배치 플래그
// - 전보유예: 제외사유 "전보유예" 설정
// 기록 기준으로 순회하며, 대조가 정확히 1명이 아니면 경고만 남긴다
// ==========================================

use crate::domain::transfer::{PriorityRecord, PriorityScoreUpdate, TransferCandidate};
use crate::domain::types::PriorityKind;
use crate::engine::reconcile::MatchWarning;
use tracing::instrument;

// ==========================================
// 결과 구조체
// ==========================================

#[derive(Debug, Clone)]
pub struct PriorityOutcome {
    pub score_updates: Vec<PriorityScoreUpdate>,
    /// 전보유예로 제외 처리할 대상
    pub deferral_ids: Vec<i64>,
    pub warnings: Vec<MatchWarning>,
}

// ==========================================
// PriorityChecker - 우선유예 점검 엔진
// ==========================================
pub struct PriorityChecker {
    // 무상태 엔진
}

impl PriorityChecker {
    pub fn new() -> Self {
        Self {}
    }

    /// 우선유예 점검 실행 (순수 연산)
    #[instrument(skip_all, fields(candidates = candidates.len(), records = records.len()))]
    pub fn check(
        &self,
        candidates: &[TransferCandidate],
        records: &[PriorityRecord],
    ) -> PriorityOutcome {
        let mut score_updates = Vec::new();
        let mut deferral_ids = Vec::new();
        let mut warnings = Vec::new();

        for record in records {
            let matched: Vec<&TransferCandidate> = candidates
                .iter()
                .filter(|c| {
                    c.current_school_id == record.school_id
                        && c.teacher_name == record.teacher_name
                })
                .collect();

            if matched.len() != 1 {
                warnings.push(MatchWarning {
                    school_id: record.school_id,
                    teacher_name: record.teacher_name.clone(),
                    matches: matched.len(),
                    source: record.kind.as_code().to_string(),
                });
                continue;
            }

            let target = matched[0];
            match record.kind {
                PriorityKind::Priority => {
                    score_updates.push(PriorityScoreUpdate {
                        candidate_id: target.id,
                        // 대체 총점 미기재 시 기존 총점 유지 (플래그만 반영)
                        total_score: record.total_score.unwrap_or(target.total_score),
                    });
                }
                PriorityKind::Deferral => {
                    deferral_ids.push(target.id);
                }
            }
        }

        PriorityOutcome {
            score_updates,
            deferral_ids,
            warnings,
        }
    }
}

impl Default for PriorityChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PreferenceRound;

    fn candidate(id: i64, name: &str, current: i64) -> TransferCandidate {
        TransferCandidate {
            id,
            seq: None,
            teacher_name: name.to_string(),
            gender: None,
            birth_date: None,
            note: None,
            current_school_id: Some(current),
            assigned_school_id: None,
            preference_round: PreferenceRound::First,
            wish_school_1_id: Some(99),
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
            total_score: 70.0,
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

    fn record(kind: PriorityKind, school: i64, name: &str, score: Option<f64>) -> PriorityRecord {
        PriorityRecord {
            id: 0,
            kind,
            school_id: Some(school),
            teacher_name: name.to_string(),
            total_score: score,
            gender: None,
            birth_date: None,
            note: None,
        }
    }

    #[test]
    fn test_priority_overrides_score() {
        let candidates = vec![candidate(1, "김교사", 10)];
        let records = vec![record(PriorityKind::Priority, 10, "김교사", Some(999.0))];

        let outcome = PriorityChecker::new().check(&candidates, &records);
        assert_eq!(outcome.score_updates.len(), 1);
        assert_eq!(outcome.score_updates[0].total_score, 999.0);
        assert!(outcome.deferral_ids.is_empty());
    }

    #[test]
    fn test_priority_without_score_keeps_existing() {
        let candidates = vec![candidate(1, "김교사", 10)];
        let records = vec![record(PriorityKind::Priority, 10, "김교사", None)];

        let outcome = PriorityChecker::new().check(&candidates, &records);
        assert_eq!(outcome.score_updates[0].total_score, 70.0);
    }

    #[test]
    fn test_deferral_marks_exclusion() {
        let candidates = vec![candidate(1, "김교사", 10)];
        let records = vec![record(PriorityKind::Deferral, 10, "김교사", None)];

        let outcome = PriorityChecker::new().check(&candidates, &records);
        assert_eq!(outcome.deferral_ids, vec![1]);
        assert!(outcome.score_updates.is_empty());
    }

    #[test]
    fn test_zero_or_many_matches_warn_without_applying() {
        // 대조 0건
        let candidates = vec![candidate(1, "김교사", 10)];
        let records = vec![record(PriorityKind::Priority, 11, "김교사", Some(999.0))];
        let outcome = PriorityChecker::new().check(&candidates, &records);
        assert!(outcome.score_updates.is_empty());
        assert_eq!(outcome.warnings[0].matches, 0);

        // 동명 2명
        let candidates = vec![candidate(1, "김교사", 10), candidate(2, "김교사", 10)];
        let records = vec![record(PriorityKind::Priority, 10, "김교사", Some(999.0))];
        let outcome = PriorityChecker::new().check(&candidates, &records);
        assert!(outcome.score_updates.is_empty());
        assert_eq!(outcome.warnings[0].matches, 2);
    }
}
