// ==========================================
// 교원 전보 배치 시스템 - 제외 점검 엔진
// ==========================================
// 책임: 결원/관외전출 기록과 명부를 대조해 제외사유·별도정원 도출
// 규칙 적용 순서 (뒤가 앞을 덮어쓴다):
// 1. 결원 대조: 휴직/파견 → 별도정원, 그 외 → 결원종류를 제외사유로
// 2. 관외전출 대조: "{전출지역} 전출" 을 제외사유로
// 3. 현임교 = 1희망 → "현소속 지원" (최종 우선)
// 제외사유는 지우지 않는다 (한 번 설정되면 점검 재실행에도 유지)
// ==========================================

use crate::domain::transfer::{ExclusionUpdate, ExternalOut, TransferCandidate, VacancyRecord};
use crate::domain::types::{SeparateQuota, EXCLUSION_SAME_SCHOOL};
use crate::engine::reconcile::MatchWarning;
use tracing::instrument;

// ==========================================
// 결과 구조체
// ==========================================

#[derive(Debug, Clone)]
pub struct ExclusionOutcome {
    pub updates: Vec<ExclusionUpdate>,
    pub warnings: Vec<MatchWarning>,
}

// ==========================================
// ExclusionChecker - 제외 점검 엔진
// ==========================================
pub struct ExclusionChecker {
    // 무상태 엔진
}

impl ExclusionChecker {
    pub fn new() -> Self {
        Self {}
    }

    /// 제외 점검 실행 (순수 연산)
    ///
    /// # 파라미터
    /// - candidates: 관내 명부
    /// - vacancies: 결원 기록
    /// - external_out: 관외전출 기록
    ///
    /// # 반환
    /// ExclusionOutcome (반영값 + 동명 다수 경고)
    #[instrument(skip_all, fields(
        candidates = candidates.len(),
        vacancies = vacancies.len(),
        external_out = external_out.len()
    ))]
    pub fn check(
        &self,
        candidates: &[TransferCandidate],
        vacancies: &[VacancyRecord],
        external_out: &[ExternalOut],
    ) -> ExclusionOutcome {
        let mut updates = Vec::new();
        let mut warnings = Vec::new();

        for c in candidates {
            let mut new_reason: Option<String> = None;
            let mut new_quota: Option<SeparateQuota> = None;

            // 1. 결원 대조 (현임교 + 성명)
            let matched_vacancies: Vec<&VacancyRecord> = vacancies
                .iter()
                .filter(|v| {
                    v.school_id == c.current_school_id && v.teacher_name == c.teacher_name
                })
                .collect();
            match matched_vacancies.len() {
                0 => {}
                1 => {
                    let v = matched_vacancies[0];
                    let type_code = v.type_code.as_deref().unwrap_or("결원");
                    match SeparateQuota::from_code(type_code) {
                        Some(q) => new_quota = Some(q),
                        None => new_reason = Some(type_code.to_string()),
                    }
                }
                n => warnings.push(MatchWarning {
                    school_id: c.current_school_id,
                    teacher_name: c.teacher_name.clone(),
                    matches: n,
                    source: "결원".to_string(),
                }),
            }

            // 2. 관외전출 대조
            let matched_out: Vec<&ExternalOut> = external_out
                .iter()
                .filter(|r| {
                    Some(r.school_id) == c.current_school_id && r.teacher_name == c.teacher_name
                })
                .collect();
            match matched_out.len() {
                0 => {}
                1 => {
                    let destination = matched_out[0]
                        .destination
                        .as_deref()
                        .filter(|d| !d.trim().is_empty())
                        .unwrap_or("타지역");
                    new_reason = Some(format!("{} 전출", destination));
                }
                n => warnings.push(MatchWarning {
                    school_id: c.current_school_id,
                    teacher_name: c.teacher_name.clone(),
                    matches: n,
                    source: "관외전출".to_string(),
                }),
            }

            // 3. 현임교 = 1희망 (최종 우선)
            if c.current_school_id.is_some() && c.current_school_id == c.wish_school_1_id {
                new_reason = Some(EXCLUSION_SAME_SCHOOL.to_string());
            }

            if new_reason.is_none() && new_quota.is_none() {
                continue;
            }

            // 기존 값은 지우지 않고 새 값만 덮어쓴다
            updates.push(ExclusionUpdate {
                candidate_id: c.id,
                exclusion_reason: new_reason.or_else(|| c.exclusion_reason.clone()),
                separate_quota: new_quota.or(c.separate_quota),
            });
        }

        ExclusionOutcome { updates, warnings }
    }
}

impl Default for ExclusionChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PreferenceRound;

    fn candidate(id: i64, name: &str, current: i64, wish_1: Option<i64>) -> TransferCandidate {
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
            wish_school_1_id: wish_1,
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
            total_score: 0.0,
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

    fn vacancy(school_id: i64, name: &str, type_code: &str) -> VacancyRecord {
        VacancyRecord {
            id: 0,
            seq: None,
            type_code: Some(type_code.to_string()),
            school_id: Some(school_id),
            teacher_name: name.to_string(),
            gender: None,
            birth_date: None,
            note: None,
        }
    }

    #[test]
    fn test_leave_vacancy_sets_separate_quota() {
        let candidates = vec![candidate(1, "김교사", 10, Some(20))];
        let vacancies = vec![vacancy(10, "김교사", "휴직")];

        let outcome = ExclusionChecker::new().check(&candidates, &vacancies, &[]);
        assert_eq!(outcome.updates.len(), 1);
        assert_eq!(
            outcome.updates[0].separate_quota,
            Some(SeparateQuota::LeaveOfAbsence)
        );
        assert_eq!(outcome.updates[0].exclusion_reason, None);
    }

    #[test]
    fn test_retirement_vacancy_sets_exclusion_reason() {
        let candidates = vec![candidate(1, "김교사", 10, Some(20))];
        let vacancies = vec![vacancy(10, "김교사", "퇴직")];

        let outcome = ExclusionChecker::new().check(&candidates, &vacancies, &[]);
        assert_eq!(
            outcome.updates[0].exclusion_reason.as_deref(),
            Some("퇴직")
        );
    }

    #[test]
    fn test_external_out_sets_destination_reason() {
        let candidates = vec![candidate(1, "김교사", 10, Some(20))];
        let out = ExternalOut {
            id: 1,
            seq: None,
            transfer_type: "일반".to_string(),
            school_id: 10,
            teacher_name: "김교사".to_string(),
            gender: None,
            birth_date: None,
            destination: Some("부산".to_string()),
            separate_quota: None,
            note: None,
        };

        let outcome = ExclusionChecker::new().check(&candidates, &[], &[out]);
        assert_eq!(
            outcome.updates[0].exclusion_reason.as_deref(),
            Some("부산 전출")
        );
    }

    #[test]
    fn test_same_school_wish_overrides_other_reasons() {
        // 현임교 = 1희망이면 다른 규칙보다 우선
        let candidates = vec![candidate(1, "김교사", 10, Some(10))];
        let vacancies = vec![vacancy(10, "김교사", "퇴직")];

        let outcome = ExclusionChecker::new().check(&candidates, &vacancies, &[]);
        assert_eq!(
            outcome.updates[0].exclusion_reason.as_deref(),
            Some(EXCLUSION_SAME_SCHOOL)
        );
    }

    #[test]
    fn test_duplicate_name_match_warns_and_skips() {
        let candidates = vec![candidate(1, "김교사", 10, Some(20))];
        let vacancies = vec![vacancy(10, "김교사", "휴직"), vacancy(10, "김교사", "퇴직")];

        let outcome = ExclusionChecker::new().check(&candidates, &vacancies, &[]);
        assert!(outcome.updates.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].matches, 2);
    }

    #[test]
    fn test_no_match_means_no_update() {
        let candidates = vec![candidate(1, "김교사", 10, Some(20))];
        let vacancies = vec![vacancy(11, "김교사", "휴직")];

        let outcome = ExclusionChecker::new().check(&candidates, &vacancies, &[]);
        assert!(outcome.updates.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
