// ==========================================
// 교원 전보 배치 시스템 - 배치 API
// ==========================================
// 책임: 저장소에서 스냅샷 적재 → 엔진 실행 → 결과 영속화
// 영속화 단위: 라운드별 단일 트랜잭션 (중간 상태 노출 금지)
// ==========================================

use crate::domain::school::SchoolShortage;
use crate::domain::transfer::{AssignmentStats, ExclusionUpdate, TransferCandidate};
use crate::domain::types::{PreferenceRound, EXCLUSION_DEFERRAL};
use crate::engine::orchestrator::{AutoAssignReport, RoundOrchestrator, RoundResult};
use crate::engine::reconcile::{
    ExclusionChecker, MatchWarning, PriorityChecker, SurplusResolver,
};
use crate::engine::shortage::{MovementSnapshot, ShortageCalculator};
use crate::api::error::{ApiError, ApiResult};
use crate::i18n::t;
use crate::repository::{MovementRepository, SchoolRepository, TransferRepository};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

// ==========================================
// 보고 구조체
// ==========================================

/// 점검 결과 보고 (제외/우선유예/과원 공통)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// 반영된 건수
    pub touched: usize,
    /// 대조 실패 경고 (운영자 수동 확인 대상)
    pub warnings: Vec<MatchWarning>,
    /// 운영자 안내문 (동명이인 확인 등)
    pub notice: String,
}

// ==========================================
// AssignmentApi - 배치 API
// ==========================================
pub struct AssignmentApi {
    school_repo: SchoolRepository,
    transfer_repo: TransferRepository,
    movement_repo: MovementRepository,
    orchestrator: RoundOrchestrator,
    shortage: ShortageCalculator,
}

impl AssignmentApi {
    /// 기존 연결로 API 인스턴스 생성
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            school_repo: SchoolRepository::from_connection(conn.clone()),
            transfer_repo: TransferRepository::from_connection(conn.clone()),
            movement_repo: MovementRepository::from_connection(conn),
            orchestrator: RoundOrchestrator::new(),
            shortage: ShortageCalculator::new(),
        }
    }

    // ===== 적재 =====

    fn load_snapshot(&self) -> ApiResult<MovementSnapshot> {
        Ok(MovementSnapshot {
            schools: self.school_repo.list_all()?,
            vacancies: self.movement_repo.list_vacancies()?,
            supplements: self.movement_repo.list_supplements()?,
            external_out: self.movement_repo.list_external_out()?,
            external_in: self.movement_repo.list_external_in()?,
        })
    }

    fn load_candidates(&self) -> ApiResult<Vec<TransferCandidate>> {
        Ok(self.transfer_repo.list_all()?)
    }

    // ===== 배치 =====

    /// 배정 전체 초기화
    #[instrument(skip(self))]
    pub fn reset_assignments(&self) -> ApiResult<usize> {
        let cleared = self.transfer_repo.reset_assignments()?;
        info!(cleared, "{}", t("round.reset_done"));
        Ok(cleared)
    }

    /// 단일 라운드 실행 (현재 저장 상태에서 이어서)
    ///
    /// # 파라미터
    /// - round_no: 1..=3
    #[instrument(skip(self))]
    pub fn run_round(&self, round_no: u8) -> ApiResult<RoundResult> {
        if PreferenceRound::from_round_no(round_no).is_none() {
            return Err(ApiError::InvalidInput(format!(
                "라운드 번호는 1~3 이어야 합니다: {}",
                round_no
            )));
        }

        let snapshot = self.load_snapshot()?;
        let mut candidates = self.load_candidates()?;

        let result = self
            .orchestrator
            .run_round(round_no, &snapshot, &mut candidates);

        // 라운드 결과를 단일 트랜잭션으로 반영
        self.transfer_repo.apply_assignments(&result.decisions)?;

        Ok(result)
    }

    /// 자동 배치 (초기화 후 1→2→3 라운드, 만기 미배치자만 이월)
    #[instrument(skip(self))]
    pub fn run_auto(&self) -> ApiResult<AutoAssignReport> {
        let snapshot = self.load_snapshot()?;
        let mut candidates = self.load_candidates()?;

        let report = self.orchestrator.run_auto(&snapshot, &mut candidates);

        // 메모리 실행이 끝난 뒤 같은 순서로 영속화
        self.transfer_repo.reset_assignments()?;
        self.transfer_repo
            .set_all_preference_round(PreferenceRound::First)?;

        for round in &report.rounds {
            self.transfer_repo.apply_assignments(&round.decisions)?;

            if !round.escalated_ids.is_empty() {
                if let Some(next) = PreferenceRound::from_round_no(round.round_no + 1) {
                    self.transfer_repo
                        .update_preference_rounds(&round.escalated_ids, next)?;
                }
            }
        }

        Ok(report)
    }

    // ===== 점검 =====

    /// 제외 점검 (결원/관외전출/현소속 지원 대조)
    #[instrument(skip(self))]
    pub fn check_exclusion(&self) -> ApiResult<ReconcileReport> {
        let candidates = self.load_candidates()?;
        let vacancies = self.movement_repo.list_vacancies()?;
        let external_out = self.movement_repo.list_external_out()?;

        let outcome = ExclusionChecker::new().check(&candidates, &vacancies, &external_out);

        // 점검 결과는 단일 트랜잭션으로 반영 (중간 실패 시 전체 무효)
        self.transfer_repo.apply_exclusion_updates(&outcome.updates)?;

        info!(touched = outcome.updates.len(), "제외 점검 반영");

        Ok(ReconcileReport {
            touched: outcome.updates.len(),
            warnings: outcome.warnings,
            notice: t("check.verify_homonyms"),
        })
    }

    /// 우선유예 점검 (우선전보 총점 대체 / 전보유예 제외)
    #[instrument(skip(self))]
    pub fn check_priority(&self) -> ApiResult<ReconcileReport> {
        let candidates = self.load_candidates()?;
        let records = self.movement_repo.list_priority_records()?;

        let outcome = PriorityChecker::new().check(&candidates, &records);

        // 전보유예는 제외사유로 기록하되 기존 별도정원은 보존
        let deferrals: Vec<ExclusionUpdate> = outcome
            .deferral_ids
            .iter()
            .map(|id| ExclusionUpdate {
                candidate_id: *id,
                exclusion_reason: Some(EXCLUSION_DEFERRAL.to_string()),
                separate_quota: candidates
                    .iter()
                    .find(|c| c.id == *id)
                    .and_then(|c| c.separate_quota),
            })
            .collect();

        // 총점 대체와 유예 제외를 단일 트랜잭션으로 반영
        self.transfer_repo
            .apply_priority_updates(&outcome.score_updates, &deferrals)?;

        let touched = outcome.score_updates.len() + deferrals.len();
        info!(touched, "우선유예 점검 반영");

        Ok(ReconcileReport {
            touched,
            warnings: outcome.warnings,
            notice: t("check.verify_homonyms"),
        })
    }

    /// 과원해소 점검 (시뮬레이션 기반, resolved 플래그만 갱신)
    #[instrument(skip(self))]
    pub fn check_surplus(&self) -> ApiResult<ReconcileReport> {
        let snapshot = self.load_snapshot()?;
        let candidates = self.load_candidates()?;
        let records = self.movement_repo.list_surplus_records()?;

        let outcome = SurplusResolver::new().check(&snapshot, &candidates, &records);

        self.movement_repo.reset_surplus_resolved()?;
        self.movement_repo
            .mark_surplus_resolved(&outcome.resolved_ids, true)?;

        Ok(ReconcileReport {
            touched: outcome.resolved_ids.len(),
            warnings: Vec::new(),
            notice: t("check.verify_homonyms"),
        })
    }

    // ===== 조회 =====

    /// 학교별 과부족 현황
    pub fn school_shortages(&self) -> ApiResult<Vec<SchoolShortage>> {
        let snapshot = self.load_snapshot()?;
        let candidates = self.load_candidates()?;
        Ok(self.shortage.calculate(&snapshot, &candidates))
    }

    /// 배치 통계
    pub fn statistics(&self) -> ApiResult<AssignmentStats> {
        let candidates = self.load_candidates()?;

        let total = candidates.len();
        let excluded = candidates
            .iter()
            .filter(|c| c.exclusion_reason.is_some())
            .count();
        let assigned = candidates
            .iter()
            .filter(|c| c.assigned_school_id.is_some())
            .count();
        let unassigned = candidates
            .iter()
            .filter(|c| c.assigned_school_id.is_none() && c.exclusion_reason.is_none())
            .count();

        let base = total.saturating_sub(excluded);
        let assignment_rate = if base == 0 {
            0
        } else {
            ((assigned as f64 / base as f64) * 100.0).round() as i32
        };

        Ok(AssignmentStats {
            total,
            assigned,
            excluded,
            unassigned,
            assignment_rate,
        })
    }

    /// 미배치자 목록 (제외자 제외)
    pub fn unassigned(&self) -> ApiResult<Vec<TransferCandidate>> {
        let candidates = self.load_candidates()?;
        Ok(candidates
            .into_iter()
            .filter(|c| c.assigned_school_id.is_none() && c.exclusion_reason.is_none())
            .collect())
    }
}
