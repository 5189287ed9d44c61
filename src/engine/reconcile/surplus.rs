// ==========================================
// 교원 전보 배치 시스템 - 과원해소 점검 엔진
// ==========================================
// 책임: 현학교 잔류 희망 과원 교사의 해소 가능 여부 판정
// 방법: 명부 사본으로 자동 배치를 시뮬레이션한 뒤 남는 자리를
//       과원순번 큰 쪽부터 소진시킨다 (실제 명부는 건드리지 않는다)
// ==========================================

use crate::domain::transfer::{SurplusRecord, TransferCandidate};
use crate::engine::orchestrator::RoundOrchestrator;
use crate::engine::shortage::{MovementSnapshot, ShortageCalculator};
use tracing::{info, instrument};

// ==========================================
// 결과 구조체
// ==========================================
#[derive(Debug, Clone)]
pub struct SurplusOutcome {
    /// 해소 가능 판정된 과원 레코드 ID
    pub resolved_ids: Vec<i64>,
    /// 잔류 희망이지만 자리가 없는 과원 레코드 ID
    pub unresolved_ids: Vec<i64>,
    /// 점검 대상 수 (잔류 희망자)
    pub stay_current_total: usize,
}

// ==========================================
// SurplusResolver - 과원해소 점검 엔진
// ==========================================
pub struct SurplusResolver {
    orchestrator: RoundOrchestrator,
    shortage: ShortageCalculator,
}

impl SurplusResolver {
    pub fn new() -> Self {
        Self {
            orchestrator: RoundOrchestrator::new(),
            shortage: ShortageCalculator::new(),
        }
    }

    /// 과원해소 점검 실행 (순수 연산, 명부 원본 보존)
    ///
    /// # 파라미터
    /// - snapshot: 학교/이동 기록 스냅샷
    /// - candidates: 관내 명부 (사본으로 시뮬레이션)
    /// - surplus_records: 과원 기록
    #[instrument(skip_all, fields(
        candidates = candidates.len(),
        surplus_records = surplus_records.len()
    ))]
    pub fn check(
        &self,
        snapshot: &MovementSnapshot,
        candidates: &[TransferCandidate],
        surplus_records: &[SurplusRecord],
    ) -> SurplusOutcome {
        // 자동 배치 완료 상태를 사본으로 재현
        let mut simulated: Vec<TransferCandidate> = candidates.to_vec();
        self.orchestrator.run_auto(snapshot, &mut simulated);

        let mut shortage_map = self.shortage.shortage_map(snapshot, &simulated);

        // 잔류 희망자만, 과원순번 큰 쪽부터 해소
        let mut stay: Vec<&SurplusRecord> = surplus_records
            .iter()
            .filter(|r| r.stay_current)
            .collect();
        stay.sort_by(|a, b| {
            b.surplus_number
                .cmp(&a.surplus_number)
                .then(a.id.cmp(&b.id))
        });

        let mut resolved_ids = Vec::new();
        let mut unresolved_ids = Vec::new();

        for record in &stay {
            let room = shortage_map
                .get(&record.school_id)
                .copied()
                .unwrap_or(0);
            if room < 0 {
                // 잔류 확정은 자리 하나를 소진한다
                *shortage_map.entry(record.school_id).or_insert(0) += 1;
                resolved_ids.push(record.id);
            } else {
                unresolved_ids.push(record.id);
            }
        }

        info!(
            resolved = resolved_ids.len(),
            unresolved = unresolved_ids.len(),
            "과원해소 점검 완료"
        );

        SurplusOutcome {
            resolved_ids,
            unresolved_ids,
            stay_current_total: stay.len(),
        }
    }
}

impl Default for SurplusResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::school::School;

    fn school(id: i64, name: &str, quota: i32, current: i32) -> School {
        School {
            id,
            name: name.to_string(),
            full_name: None,
            display_order: id as i32,
            quota,
            current_count: current,
            male_count: 0,
            female_count: 0,
        }
    }

    fn surplus(id: i64, school_id: i64, number: i32, stay: bool) -> SurplusRecord {
        SurplusRecord {
            id,
            school_id,
            teacher_name: format!("과원{}", id),
            surplus_number: number,
            stay_current: stay,
            resolved: false,
            gender: None,
            birth_date: None,
            note: None,
        }
    }

    #[test]
    fn test_room_resolves_highest_number_first() {
        // 학교 1에 자리 하나: 과원순번 큰 2번만 해소
        let snapshot = MovementSnapshot {
            schools: vec![school(1, "중앙초", 10, 9)],
            ..Default::default()
        };
        let records = vec![surplus(1, 1, 1, true), surplus(2, 1, 2, true)];

        let outcome = SurplusResolver::new().check(&snapshot, &[], &records);
        assert_eq!(outcome.resolved_ids, vec![2]);
        assert_eq!(outcome.unresolved_ids, vec![1]);
        assert_eq!(outcome.stay_current_total, 2);
    }

    #[test]
    fn test_stay_current_false_is_ignored() {
        let snapshot = MovementSnapshot {
            schools: vec![school(1, "중앙초", 10, 8)],
            ..Default::default()
        };
        let records = vec![surplus(1, 1, 1, false)];

        let outcome = SurplusResolver::new().check(&snapshot, &[], &records);
        assert!(outcome.resolved_ids.is_empty());
        assert!(outcome.unresolved_ids.is_empty());
        assert_eq!(outcome.stay_current_total, 0);
    }

    #[test]
    fn test_no_room_means_unresolved() {
        let snapshot = MovementSnapshot {
            schools: vec![school(1, "중앙초", 10, 10)],
            ..Default::default()
        };
        let records = vec![surplus(1, 1, 1, true)];

        let outcome = SurplusResolver::new().check(&snapshot, &[], &records);
        assert_eq!(outcome.unresolved_ids, vec![1]);
    }
}
