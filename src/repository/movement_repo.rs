// ==========================================
// 교원 전보 배치 시스템 - 이동 기록 저장소
// ==========================================
// 결원/충원/관외전출입/우선유예/과원 테이블 담당
// 이 다섯 테이블은 과부족 계산과 점검 기능의 입력 전용에 가깝다
// ==========================================

use crate::domain::transfer::{ExternalIn, ExternalOut, PriorityRecord, SurplusRecord, VacancyRecord};
use crate::domain::types::PriorityKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

fn parse_date(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}

fn format_date(d: Option<NaiveDate>) -> Option<String> {
    d.map(|v| v.format("%Y-%m-%d").to_string())
}

// ==========================================
// MovementRepository - 이동 기록 저장소
// ==========================================

/// 이동 기록 저장소
pub struct MovementRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MovementRepository {
    /// 새 저장소 인스턴스 생성
    pub fn new(db_path: String) -> RepositoryResult<Self> {
        let conn = Connection::open(&db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 기존 연결로 저장소 인스턴스 생성
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ===== 결원/충원 =====

    fn map_vacancy(row: &Row<'_>) -> SqliteResult<VacancyRecord> {
        Ok(VacancyRecord {
            id: row.get(0)?,
            seq: row.get(1)?,
            type_code: row.get(2)?,
            school_id: row.get(3)?,
            teacher_name: row.get(4)?,
            gender: row.get(5)?,
            birth_date: parse_date(row.get(6)?),
            note: row.get(7)?,
        })
    }

    fn list_vacancy_table(&self, table: &str) -> RepositoryResult<Vec<VacancyRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, seq, type_code, school_id, teacher_name, gender, birth_date, note \
             FROM {} ORDER BY id",
            table
        ))?;

        let records = stmt
            .query_map([], Self::map_vacancy)?
            .collect::<SqliteResult<Vec<VacancyRecord>>>()?;

        Ok(records)
    }

    fn insert_vacancy_table(&self, table: &str, v: &VacancyRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (seq, type_code, school_id, teacher_name, gender, birth_date, note) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                table
            ),
            params![
                v.seq,
                v.type_code,
                v.school_id,
                v.teacher_name,
                v.gender,
                format_date(v.birth_date),
                v.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 결원 전체 조회
    pub fn list_vacancies(&self) -> RepositoryResult<Vec<VacancyRecord>> {
        self.list_vacancy_table("vacancies")
    }

    /// 충원 전체 조회
    pub fn list_supplements(&self) -> RepositoryResult<Vec<VacancyRecord>> {
        self.list_vacancy_table("supplements")
    }

    /// 결원 단건 삽입
    pub fn insert_vacancy(&self, v: &VacancyRecord) -> RepositoryResult<i64> {
        self.insert_vacancy_table("vacancies", v)
    }

    /// 충원 단건 삽입
    pub fn insert_supplement(&self, v: &VacancyRecord) -> RepositoryResult<i64> {
        self.insert_vacancy_table("supplements", v)
    }

    // ===== 관외전출입 =====

    /// 관외전출 전체 조회
    pub fn list_external_out(&self) -> RepositoryResult<Vec<ExternalOut>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, seq, transfer_type, school_id, teacher_name, gender, birth_date, \
                    destination, separate_quota, note \
             FROM external_transfers_out ORDER BY id",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(ExternalOut {
                    id: row.get(0)?,
                    seq: row.get(1)?,
                    transfer_type: row.get(2)?,
                    school_id: row.get(3)?,
                    teacher_name: row.get(4)?,
                    gender: row.get(5)?,
                    birth_date: parse_date(row.get(6)?),
                    destination: row.get(7)?,
                    separate_quota: row.get(8)?,
                    note: row.get(9)?,
                })
            })?
            .collect::<SqliteResult<Vec<ExternalOut>>>()?;

        Ok(records)
    }

    /// 관외전입 전체 조회
    pub fn list_external_in(&self) -> RepositoryResult<Vec<ExternalIn>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, seq, transfer_type, origin_school, teacher_name, gender, birth_date, \
                    assigned_school_id, separate_quota, note \
             FROM external_transfers_in ORDER BY id",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(ExternalIn {
                    id: row.get(0)?,
                    seq: row.get(1)?,
                    transfer_type: row.get(2)?,
                    origin_school: row.get(3)?,
                    teacher_name: row.get(4)?,
                    gender: row.get(5)?,
                    birth_date: parse_date(row.get(6)?),
                    assigned_school_id: row.get(7)?,
                    separate_quota: row.get(8)?,
                    note: row.get(9)?,
                })
            })?
            .collect::<SqliteResult<Vec<ExternalIn>>>()?;

        Ok(records)
    }

    /// 관외전출 단건 삽입
    pub fn insert_external_out(&self, r: &ExternalOut) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO external_transfers_out \
             (seq, transfer_type, school_id, teacher_name, gender, birth_date, \
              destination, separate_quota, note) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                r.seq,
                r.transfer_type,
                r.school_id,
                r.teacher_name,
                r.gender,
                format_date(r.birth_date),
                r.destination,
                r.separate_quota,
                r.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 관외전입 단건 삽입
    pub fn insert_external_in(&self, r: &ExternalIn) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO external_transfers_in \
             (seq, transfer_type, origin_school, teacher_name, gender, birth_date, \
              assigned_school_id, separate_quota, note) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                r.seq,
                r.transfer_type,
                r.origin_school,
                r.teacher_name,
                r.gender,
                format_date(r.birth_date),
                r.assigned_school_id,
                r.separate_quota,
                r.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // ===== 우선전보/전보유예 =====

    /// 우선전보/전보유예 전체 조회
    pub fn list_priority_records(&self) -> RepositoryResult<Vec<PriorityRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, kind, school_id, teacher_name, total_score, gender, birth_date, note \
             FROM priority_transfers ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let kind_code: String = row.get(1)?;
                Ok((kind_code, row.get::<_, i64>(0)?, PriorityRecord {
                    id: row.get(0)?,
                    kind: PriorityKind::Priority, // 아래에서 코드값으로 대체
                    school_id: row.get(2)?,
                    teacher_name: row.get(3)?,
                    total_score: row.get(4)?,
                    gender: row.get(5)?,
                    birth_date: parse_date(row.get(6)?),
                    note: row.get(7)?,
                }))
            })?
            .collect::<SqliteResult<Vec<(String, i64, PriorityRecord)>>>()?;

        // 알 수 없는 구분 코드는 데이터 무결성 오류로 처리
        let mut records = Vec::with_capacity(rows.len());
        for (kind_code, id, mut record) in rows {
            record.kind = PriorityKind::from_code(&kind_code).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "kind".to_string(),
                    message: format!("priority_transfers id={} 구분 코드 불명: {}", id, kind_code),
                }
            })?;
            records.push(record);
        }

        Ok(records)
    }

    /// 우선전보/전보유예 단건 삽입
    pub fn insert_priority_record(&self, r: &PriorityRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO priority_transfers \
             (kind, school_id, teacher_name, total_score, gender, birth_date, note) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                r.kind.as_code(),
                r.school_id,
                r.teacher_name,
                r.total_score,
                r.gender,
                format_date(r.birth_date),
                r.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // ===== 과원 =====

    /// 과원 전체 조회 (과원순번 내림차순 - 해소 순서)
    pub fn list_surplus_records(&self) -> RepositoryResult<Vec<SurplusRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, school_id, teacher_name, surplus_number, stay_current, resolved, \
                    gender, birth_date, note \
             FROM surplus_transfers ORDER BY surplus_number DESC, id",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(SurplusRecord {
                    id: row.get(0)?,
                    school_id: row.get(1)?,
                    teacher_name: row.get(2)?,
                    surplus_number: row.get(3)?,
                    stay_current: row.get::<_, i64>(4)? != 0,
                    resolved: row.get::<_, i64>(5)? != 0,
                    gender: row.get(6)?,
                    birth_date: parse_date(row.get(7)?),
                    note: row.get(8)?,
                })
            })?
            .collect::<SqliteResult<Vec<SurplusRecord>>>()?;

        Ok(records)
    }

    /// 과원 단건 삽입
    pub fn insert_surplus_record(&self, r: &SurplusRecord) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO surplus_transfers \
             (school_id, teacher_name, surplus_number, stay_current, resolved, \
              gender, birth_date, note) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                r.school_id,
                r.teacher_name,
                r.surplus_number,
                r.stay_current as i64,
                r.resolved as i64,
                r.gender,
                format_date(r.birth_date),
                r.note,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 과원해소 여부 일괄 갱신 (단일 트랜잭션)
    ///
    /// resolved 플래그만 바꾸며 명부에는 손대지 않는다
    pub fn mark_surplus_resolved(&self, ids: &[i64], resolved: bool) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;
        for id in ids {
            let affected = conn.execute(
                "UPDATE surplus_transfers SET resolved = ?1 WHERE id = ?2",
                params![resolved as i64, id],
            );
            match affected {
                Ok(n) => updated_count += n,
                Err(e) => {
                    conn.execute("ROLLBACK", [])?;
                    return Err(e.into());
                }
            }
        }

        conn.execute("COMMIT", [])?;
        Ok(updated_count)
    }

    /// 과원해소 여부 전체 초기화
    pub fn reset_surplus_resolved(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE surplus_transfers SET resolved = 0 WHERE resolved != 0",
            [],
        )?;
        Ok(affected)
    }
}
