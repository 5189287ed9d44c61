// ==========================================
// 교원 전보 배치 시스템 - 자동 배치 오케스트레이터
// ==========================================
// 책임: 라운드 단위 파이프라인 (과부족 → 서열순정렬 → 배정)과
//       1→2→3 라운드 자동 진행을 메모리 안에서 조립
// 레드라인: 영속화는 상위 계층 몫, 여기서는 DB 를 만지지 않는다
// ==========================================
// 자동 배치 규칙:
// - 시작 시 배정 전체 초기화 + 전원 1희망으로 복원
// - 라운드 종료 후 만기 미배치자가 있으면 그들만 다음 희망으로 이월
// - 이월 대상이 없으면 그 시점에서 종료
// ==========================================

use crate::domain::transfer::{AssignmentDecision, TransferCandidate};
use crate::domain::types::{PreferenceRound, RunState};
use crate::engine::assignment::AssignmentEngine;
use crate::engine::ordering::RankSorter;
use crate::engine::shortage::{MovementSnapshot, ShortageCalculator};
use tracing::{info, instrument, warn};

// ==========================================
// 결과 구조체
// ==========================================

/// 라운드 1회 실행 결과
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub round_no: u8,
    pub assigned: usize,
    pub passes_used: u32,
    pub converged: bool,
    pub decisions: Vec<AssignmentDecision>,
    /// 이 라운드 종료 후 다음 희망으로 이월된 만기 미배치자
    pub escalated_ids: Vec<i64>,
}

/// 자동 배치 전체 보고
#[derive(Debug, Clone)]
pub struct AutoAssignReport {
    pub rounds: Vec<RoundResult>,
    pub total_assigned: usize,
    pub unassigned_after: usize,
    pub final_state: RunState,
}

// ==========================================
// RoundOrchestrator - 자동 배치 오케스트레이터
// ==========================================
pub struct RoundOrchestrator {
    shortage: ShortageCalculator,
    sorter: RankSorter,
    engine: AssignmentEngine,
}

impl RoundOrchestrator {
    pub fn new() -> Self {
        Self {
            shortage: ShortageCalculator::new(),
            sorter: RankSorter::new(),
            engine: AssignmentEngine::new(),
        }
    }

    /// 배정 전체 초기화 (메모리)
    pub fn reset_assignments(&self, candidates: &mut [TransferCandidate]) -> usize {
        let mut cleared = 0;
        for c in candidates.iter_mut() {
            if c.assigned_school_id.take().is_some() {
                cleared += 1;
            }
        }
        cleared
    }

    /// 만기 미배치자 ID 목록 (제외자 제외)
    pub fn expired_unassigned_ids(&self, candidates: &[TransferCandidate]) -> Vec<i64> {
        candidates
            .iter()
            .filter(|c| {
                c.is_expired && c.assigned_school_id.is_none() && c.exclusion_reason.is_none()
            })
            .map(|c| c.id)
            .collect()
    }

    /// 지정 대상의 희망구분 이월 (메모리)
    pub fn escalate_rounds(
        &self,
        candidates: &mut [TransferCandidate],
        ids: &[i64],
        round: PreferenceRound,
    ) {
        for c in candidates.iter_mut() {
            if ids.contains(&c.id) {
                c.preference_round = round;
            }
        }
    }

    /// 라운드 1회 실행 (과부족 재계산 → 서열순정렬 → 배정 → 메모리 반영)
    ///
    /// # 파라미터
    /// - round_no: 라운드 번호 (보고용)
    /// - snapshot: 학교/이동 기록 스냅샷
    /// - candidates: 명부 (배정 결과가 반영됨)
    #[instrument(skip(self, snapshot, candidates))]
    pub fn run_round(
        &self,
        round_no: u8,
        snapshot: &MovementSnapshot,
        candidates: &mut [TransferCandidate],
    ) -> RoundResult {
        // 과부족은 현재 배정 상태를 포함해 항상 재계산
        let mut shortage_map = self.shortage.shortage_map(snapshot, candidates);
        let ordered = self.sorter.sort(candidates, &snapshot.schools);

        let outcome = self.engine.run_round(&ordered, &mut shortage_map);

        // 결정을 명부에 반영
        for d in &outcome.decisions {
            if let Some(c) = candidates.iter_mut().find(|c| c.id == d.candidate_id) {
                c.assigned_school_id = Some(d.school_id);
            }
        }

        if !outcome.converged {
            warn!(round_no, passes = outcome.passes_used, "순회 상한 도달, 미수렴 종료");
        }
        info!(
            round_no,
            assigned = outcome.assigned,
            passes = outcome.passes_used,
            converged = outcome.converged,
            "라운드 배정 완료"
        );

        RoundResult {
            round_no,
            assigned: outcome.assigned,
            passes_used: outcome.passes_used,
            converged: outcome.converged,
            decisions: outcome.decisions,
            escalated_ids: Vec::new(),
        }
    }

    /// 1→2→3 라운드 자동 진행
    ///
    /// # 반환
    /// AutoAssignReport (라운드별 결과 + 최종 미배치 수)
    #[instrument(skip(self, snapshot, candidates), fields(candidates = candidates.len()))]
    pub fn run_auto(
        &self,
        snapshot: &MovementSnapshot,
        candidates: &mut [TransferCandidate],
    ) -> AutoAssignReport {
        // 초기화: 배정 비우고 전원 1희망으로
        self.reset_assignments(candidates);
        for c in candidates.iter_mut() {
            c.preference_round = PreferenceRound::First;
        }

        let mut rounds = Vec::new();

        for round_no in 1u8..=3 {
            let running = match round_no {
                1 => RunState::Round1Running,
                2 => RunState::Round2Running,
                _ => RunState::Round3Running,
            };
            info!(state = %running, "자동 배치 상태 전이");

            let mut result = self.run_round(round_no, snapshot, candidates);

            let done = match round_no {
                1 => RunState::Round1Done,
                2 => RunState::Round2Done,
                _ => RunState::Round3Done,
            };
            info!(state = %done, "자동 배치 상태 전이");

            // 3라운드 후에는 이월할 곳이 없다
            if round_no < 3 {
                let expired = self.expired_unassigned_ids(candidates);
                if expired.is_empty() {
                    rounds.push(result);
                    break;
                }
                let next_round = match PreferenceRound::from_round_no(round_no + 1) {
                    Some(r) => r,
                    None => {
                        rounds.push(result);
                        break;
                    }
                };
                info!(count = expired.len(), next = %next_round, "만기 미배치자 이월");
                self.escalate_rounds(candidates, &expired, next_round);
                result.escalated_ids = expired;
            }

            rounds.push(result);
        }

        let state = RunState::Complete;
        info!(state = %state, "자동 배치 상태 전이");

        let total_assigned = rounds.iter().map(|r| r.assigned).sum();
        let unassigned_after = candidates
            .iter()
            .filter(|c| c.assigned_school_id.is_none() && c.exclusion_reason.is_none())
            .count();

        info!(total_assigned, unassigned_after, "자동 배치 종료");

        AutoAssignReport {
            rounds,
            total_assigned,
            unassigned_after,
            final_state: state,
        }
    }
}

impl Default for RoundOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
