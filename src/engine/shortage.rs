// ==========================================
// 교원 전보 배치 시스템 - 과부족 계산 엔진
// ==========================================
// 레드라인: 과부족은 저장하지 않고 항상 원천 데이터에서 재계산
// ==========================================
// 책임: 학교별 현원/과부족 파생
// 입력: 학교 + 결원/충원 + 관외전출입 + 관내 명부
// 출력: SchoolShortage 목록 (shortage < 0 이면 수용 여력 있음)
// ==========================================

use crate::domain::school::{School, SchoolShortage};
use crate::domain::transfer::{ExternalIn, ExternalOut, TransferCandidate, VacancyRecord};
use crate::domain::types::TRANSFER_TYPE_OUTSIDE_QUOTA;
use std::collections::HashMap;

// ==========================================
// MovementSnapshot - 과부족 계산 입력 묶음
// ==========================================
// 라운드 시작 시 한 번 적재하고 라운드 내내 재사용한다
#[derive(Debug, Clone, Default)]
pub struct MovementSnapshot {
    pub schools: Vec<School>,
    pub vacancies: Vec<VacancyRecord>,
    pub supplements: Vec<VacancyRecord>,
    pub external_out: Vec<ExternalOut>,
    pub external_in: Vec<ExternalIn>,
}

// ==========================================
// ShortageCalculator - 과부족 계산 엔진
// ==========================================
pub struct ShortageCalculator {
    // 무상태 엔진
}

impl ShortageCalculator {
    pub fn new() -> Self {
        Self {}
    }

    /// 관외전출 레코드의 정원 중립 여부
    ///
    /// 별도정원 기재 또는 transfer_type 이 정원외면 현원에 반영하지 않는다
    fn external_out_is_neutral(r: &ExternalOut) -> bool {
        r.separate_quota.as_deref().map(str::trim).is_some_and(|s| !s.is_empty())
            || r.transfer_type == TRANSFER_TYPE_OUTSIDE_QUOTA
    }

    fn external_in_is_neutral(r: &ExternalIn) -> bool {
        r.separate_quota.as_deref().map(str::trim).is_some_and(|s| !s.is_empty())
            || r.transfer_type == TRANSFER_TYPE_OUTSIDE_QUOTA
    }

    /// 관내전출 집계 대상 여부 (학교를 실제로 떠나는 인원)
    ///
    /// - 제외사유/별도정원 기재자는 집계 제외
    /// - 타교 배정자, 또는 미배정 만기자 (만기자는 잔류 불가로 취급)
    fn counts_as_internal_out(c: &TransferCandidate, school_id: i64) -> bool {
        if c.exclusion_reason.is_some() || c.separate_quota.is_some() {
            return false;
        }
        if c.current_school_id != Some(school_id) {
            return false;
        }
        match c.assigned_school_id {
            Some(assigned) => assigned != school_id,
            None => c.is_expired,
        }
    }

    /// 관내전입 집계 대상 여부
    fn counts_as_internal_in(c: &TransferCandidate, school_id: i64) -> bool {
        c.separate_quota.is_none()
            && c.assigned_school_id == Some(school_id)
            && c.current_school_id != Some(school_id)
    }

    /// 학교별 과부족 계산
    ///
    /// 현원' = 현원 - 결원 + 충원 - 관외전출 + 관외전입 - 관내전출 + 관내전입
    /// 과부족 = 현원' - 정원
    ///
    /// # 파라미터
    /// - snapshot: 학교/결원/충원/관외전출입 스냅샷
    /// - candidates: 관내 명부 (배정 상태 반영분)
    ///
    /// # 반환
    /// 학교 display_order 순서의 과부족 목록
    pub fn calculate(
        &self,
        snapshot: &MovementSnapshot,
        candidates: &[TransferCandidate],
    ) -> Vec<SchoolShortage> {
        snapshot
            .schools
            .iter()
            .map(|school| {
                let id = school.id;

                let vacancy_count = snapshot
                    .vacancies
                    .iter()
                    .filter(|v| v.school_id == Some(id))
                    .count() as i32;

                let supplement_count = snapshot
                    .supplements
                    .iter()
                    .filter(|s| s.school_id == Some(id))
                    .count() as i32;

                let ext_out_count = snapshot
                    .external_out
                    .iter()
                    .filter(|r| r.school_id == id && !Self::external_out_is_neutral(r))
                    .count() as i32;

                let ext_in_count = snapshot
                    .external_in
                    .iter()
                    .filter(|r| {
                        r.assigned_school_id == Some(id) && !Self::external_in_is_neutral(r)
                    })
                    .count() as i32;

                let int_out_count = candidates
                    .iter()
                    .filter(|c| Self::counts_as_internal_out(c, id))
                    .count() as i32;

                let int_in_count = candidates
                    .iter()
                    .filter(|c| Self::counts_as_internal_in(c, id))
                    .count() as i32;

                let current_count = school.current_count - vacancy_count + supplement_count
                    - ext_out_count
                    + ext_in_count
                    - int_out_count
                    + int_in_count;

                SchoolShortage {
                    school_id: id,
                    name: school.name.clone(),
                    quota: school.quota,
                    current_count,
                    shortage: current_count - school.quota,
                }
            })
            .collect()
    }

    /// 학교 ID → 과부족 맵 (라운드 내 증분 갱신용)
    pub fn shortage_map(
        &self,
        snapshot: &MovementSnapshot,
        candidates: &[TransferCandidate],
    ) -> HashMap<i64, i32> {
        self.calculate(snapshot, candidates)
            .into_iter()
            .map(|s| (s.school_id, s.shortage))
            .collect()
    }
}

impl Default for ShortageCalculator {
    fn default() -> Self {
        Self::new()
    }
}
