// ==========================================
// 교원 전보 배치 시스템 - 관내전출입 명부 가져오기
// ==========================================
// 입력: 나이스 양식에서 내려받은 CSV (한국어 머리글)
// 규칙:
// - 행 단위 오류는 전체를 중단하지 않고 보고서에 집계
// - 학교명은 schools 테이블 기준으로 ID 해석, 실패 시 행 오류
// - 특별가산점은 1희망이 지정 지구일 때만 총점에 합산
// ==========================================

use crate::config::AppSettings;
use crate::domain::school::School;
use crate::domain::transfer::TransferCandidate;
use crate::domain::types::PreferenceRound;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ===== 필수 열 =====
const COL_NAME: &str = "성명";
const COL_CURRENT_SCHOOL: &str = "현임교";

// ===== 선택 열 =====
const COL_SEQ: &str = "순번";
const COL_GENDER: &str = "성별";
const COL_BIRTH_DATE: &str = "생년월일";
const COL_WISH_PREFIX: &str = "희망"; // 1희망, 2희망, 3희망
const COL_REMOTE_PREFIX: &str = "벽지"; // 벽지1 ~ 벽지8
const COL_EXPIRED: &str = "만기여부";
const COL_TOTAL_SCORE: &str = "총점";
const COL_SPECIAL_BONUS: &str = "특별가산점";
const COL_TIEBREAKER_PREFIX: &str = "동점"; // 동점1 ~ 동점7
const COL_NOTE: &str = "비고";

// ==========================================
// 보고 구조체
// ==========================================

/// 행 단위 가져오기 오류
#[derive(Debug, Clone)]
pub struct ImportRowError {
    /// 1부터 세는 데이터 행 번호 (머리글 제외)
    pub row: usize,
    pub reason: String,
}

/// 가져오기 결과 보고
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub batch_id: String,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    /// 특별가산점이 총점에 합산된 인원
    pub bonus_applied: usize,
    pub errors: Vec<ImportRowError>,
}

// ==========================================
// CandidateImporter - 명부 가져오기
// ==========================================
pub struct CandidateImporter {
    // 무상태
}

impl CandidateImporter {
    pub fn new() -> Self {
        Self {}
    }

    /// CSV 파일에서 명부를 읽어 후보 목록과 보고서 생성 (DB 접근 없음)
    ///
    /// # 파라미터
    /// - path: CSV 파일 경로
    /// - schools: 학교명 해석 기준 목록
    /// - settings: 특별가산점 지구 등 운영 설정
    ///
    /// # 반환
    /// - Ok((candidates, report)): 성공 행 목록 + 집계 보고
    /// - Err: 파일 단위 오류 (없는 파일, 필수 열 누락 등)
    #[instrument(skip(self, schools, settings), fields(path = %path.display()))]
    pub fn import_candidates(
        &self,
        path: &Path,
        schools: &[School],
        settings: &AppSettings,
    ) -> ImportResult<(Vec<TransferCandidate>, ImportReport)> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            return Err(ImportError::UnsupportedFormat(path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let col_index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_string(), i))
            .collect();

        for required in [COL_NAME, COL_CURRENT_SCHOOL] {
            if !col_index.contains_key(required) {
                return Err(ImportError::MissingColumn(required.to_string()));
            }
        }

        let name_to_id: HashMap<&str, i64> =
            schools.iter().map(|s| (s.name.as_str(), s.id)).collect();
        let id_to_name: HashMap<i64, &str> =
            schools.iter().map(|s| (s.id, s.name.as_str())).collect();

        let batch_id = Uuid::new_v4().to_string();
        let mut candidates = Vec::new();
        let mut errors = Vec::new();
        let mut bonus_applied = 0usize;
        let mut total = 0usize;

        for (idx, record) in reader.records().enumerate() {
            let row_no = idx + 1;
            total += 1;

            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportRowError {
                        row: row_no,
                        reason: format!("CSV 해석 실패: {}", e),
                    });
                    continue;
                }
            };

            match self.parse_row(row_no, &record, &col_index, &name_to_id) {
                Ok(mut candidate) => {
                    if self.apply_special_bonus(&mut candidate, &id_to_name, settings) {
                        bonus_applied += 1;
                    }
                    candidates.push(candidate);
                }
                Err(e) => {
                    warn!(row = row_no, error = %e, "행 가져오기 실패");
                    errors.push(ImportRowError {
                        row: row_no,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let report = ImportReport {
            batch_id: batch_id.clone(),
            total,
            success: candidates.len(),
            failed: errors.len(),
            bonus_applied,
            errors,
        };

        info!(
            batch_id = %batch_id,
            total = report.total,
            success = report.success,
            failed = report.failed,
            "명부 가져오기 완료"
        );

        Ok((candidates, report))
    }

    fn cell<'a>(
        record: &'a StringRecord,
        col_index: &HashMap<String, usize>,
        name: &str,
    ) -> Option<&'a str> {
        col_index
            .get(name)
            .and_then(|&i| record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn parse_school(
        row: usize,
        value: Option<&str>,
        name_to_id: &HashMap<&str, i64>,
    ) -> ImportResult<Option<i64>> {
        match value {
            None => Ok(None),
            Some(name) => name_to_id.get(name).copied().map(Some).ok_or_else(|| {
                ImportError::UnknownSchool {
                    row,
                    name: name.to_string(),
                }
            }),
        }
    }

    fn parse_score(row: usize, field: &str, value: Option<&str>) -> ImportResult<f64> {
        match value {
            None => Ok(0.0),
            Some(v) => v.parse::<f64>().map_err(|_| ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("숫자 형식 오류: {}", v),
            }),
        }
    }

    fn parse_birth_date(value: Option<&str>) -> Option<NaiveDate> {
        let v = value?;
        NaiveDate::parse_from_str(v, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(v, "%Y%m%d"))
            .ok()
    }

    fn parse_row(
        &self,
        row: usize,
        record: &StringRecord,
        col_index: &HashMap<String, usize>,
        name_to_id: &HashMap<&str, i64>,
    ) -> ImportResult<TransferCandidate> {
        let teacher_name = Self::cell(record, col_index, COL_NAME)
            .map(str::to_string)
            .ok_or_else(|| ImportError::FieldMappingError {
                row,
                message: "성명이 비어 있습니다".to_string(),
            })?;

        let current_school_name = Self::cell(record, col_index, COL_CURRENT_SCHOOL)
            .ok_or_else(|| ImportError::FieldMappingError {
                row,
                message: "현임교가 비어 있습니다".to_string(),
            })?;
        let current_school_id =
            Self::parse_school(row, Some(current_school_name), name_to_id)?;

        let seq = Self::cell(record, col_index, COL_SEQ)
            .and_then(|v| v.parse::<i32>().ok())
            .or(Some(row as i32));

        let mut wish_ids = [None; 3];
        for (i, slot) in wish_ids.iter_mut().enumerate() {
            let col = format!("{}{}", i + 1, COL_WISH_PREFIX);
            *slot = Self::parse_school(row, Self::cell(record, col_index, &col), name_to_id)?;
        }

        let mut remote_ids = [None; 8];
        for (i, slot) in remote_ids.iter_mut().enumerate() {
            let col = format!("{}{}", COL_REMOTE_PREFIX, i + 1);
            *slot = Self::parse_school(row, Self::cell(record, col_index, &col), name_to_id)?;
        }

        let is_expired = matches!(
            Self::cell(record, col_index, COL_EXPIRED),
            Some("만기") | Some("Y") | Some("y") | Some("1")
        );

        let total_score =
            Self::parse_score(row, COL_TOTAL_SCORE, Self::cell(record, col_index, COL_TOTAL_SCORE))?;
        let special_bonus = Self::parse_score(
            row,
            COL_SPECIAL_BONUS,
            Self::cell(record, col_index, COL_SPECIAL_BONUS),
        )?;

        let mut tiebreakers = [0.0f64; 7];
        for (i, slot) in tiebreakers.iter_mut().enumerate() {
            let col = format!("{}{}", COL_TIEBREAKER_PREFIX, i + 1);
            *slot = Self::parse_score(row, &col, Self::cell(record, col_index, &col))?;
        }

        Ok(TransferCandidate {
            id: 0, // DB 가 채번
            seq,
            teacher_name,
            gender: Self::cell(record, col_index, COL_GENDER).map(str::to_string),
            birth_date: Self::parse_birth_date(Self::cell(record, col_index, COL_BIRTH_DATE)),
            note: Self::cell(record, col_index, COL_NOTE).map(str::to_string),
            current_school_id,
            assigned_school_id: None,
            preference_round: PreferenceRound::First,
            wish_school_1_id: wish_ids[0],
            wish_school_2_id: wish_ids[1],
            wish_school_3_id: wish_ids[2],
            remote_wish_1_id: remote_ids[0],
            remote_wish_2_id: remote_ids[1],
            remote_wish_3_id: remote_ids[2],
            remote_wish_4_id: remote_ids[3],
            remote_wish_5_id: remote_ids[4],
            remote_wish_6_id: remote_ids[5],
            remote_wish_7_id: remote_ids[6],
            remote_wish_8_id: remote_ids[7],
            is_expired,
            is_priority: false,
            exclusion_reason: None,
            separate_quota: None,
            total_score,
            special_bonus,
            tiebreaker_1: tiebreakers[0],
            tiebreaker_2: tiebreakers[1],
            tiebreaker_3: tiebreakers[2],
            tiebreaker_4: tiebreakers[3],
            tiebreaker_5: tiebreakers[4],
            tiebreaker_6: tiebreakers[5],
            tiebreaker_7: tiebreakers[6],
        })
    }

    /// 특별가산점 합산 (1희망이 지정 지구 학교일 때만)
    fn apply_special_bonus(
        &self,
        candidate: &mut TransferCandidate,
        id_to_name: &HashMap<i64, &str>,
        settings: &AppSettings,
    ) -> bool {
        if candidate.special_bonus <= 0.0 {
            return false;
        }
        let district = match &settings.special_bonus_district {
            Some(d) => d,
            None => return false,
        };
        let wish_name = candidate
            .wish_school_1_id
            .and_then(|id| id_to_name.get(&id).copied());
        match wish_name {
            Some(name) if name.contains(district.as_str()) => {
                candidate.total_score += candidate.special_bonus;
                true
            }
            _ => false,
        }
    }
}

impl Default for CandidateImporter {
    fn default() -> Self {
        Self::new()
    }
}
