// ==========================================
// 교원 전보 배치 시스템 - 관내전출입 저장소
// ==========================================
// 책임: internal_transfers 테이블 CRUD + 라운드 결과 일괄 반영
// 레드라인: Repository 에 비즈니스 로직을 두지 않는다
// ==========================================

use crate::domain::transfer::{
    AssignmentDecision, ExclusionUpdate, PriorityScoreUpdate, TransferCandidate,
};
use crate::domain::types::{PreferenceRound, SeparateQuota};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

/// DB 텍스트 날짜 → NaiveDate (형식 오류는 None 으로 정규화)
fn parse_date(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}

fn format_date(d: Option<NaiveDate>) -> Option<String> {
    d.map(|v| v.format("%Y-%m-%d").to_string())
}

// ==========================================
// TransferRepository - 관내전출입 저장소
// ==========================================

/// 관내전출입 저장소
pub struct TransferRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TransferRepository {
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

    /// 데이터베이스 연결 획득
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    const SELECT_COLS: &'static str = "id, seq, teacher_name, gender, birth_date, note, \
         current_school_id, assigned_school_id, preference_round, \
         wish_school_1_id, wish_school_2_id, wish_school_3_id, \
         remote_wish_1_id, remote_wish_2_id, remote_wish_3_id, remote_wish_4_id, \
         remote_wish_5_id, remote_wish_6_id, remote_wish_7_id, remote_wish_8_id, \
         is_expired, is_priority, exclusion_reason, separate_quota, \
         total_score, special_bonus, \
         tiebreaker_1, tiebreaker_2, tiebreaker_3, tiebreaker_4, \
         tiebreaker_5, tiebreaker_6, tiebreaker_7";

    fn map_row(row: &Row<'_>) -> SqliteResult<TransferCandidate> {
        let round_code: String = row.get(8)?;
        let separate_code: Option<String> = row.get(23)?;

        Ok(TransferCandidate {
            id: row.get(0)?,
            seq: row.get(1)?,
            teacher_name: row.get(2)?,
            gender: row.get(3)?,
            birth_date: parse_date(row.get(4)?),
            note: row.get(5)?,
            current_school_id: row.get(6)?,
            assigned_school_id: row.get(7)?,
            preference_round: PreferenceRound::from_code(&round_code),
            wish_school_1_id: row.get(9)?,
            wish_school_2_id: row.get(10)?,
            wish_school_3_id: row.get(11)?,
            remote_wish_1_id: row.get(12)?,
            remote_wish_2_id: row.get(13)?,
            remote_wish_3_id: row.get(14)?,
            remote_wish_4_id: row.get(15)?,
            remote_wish_5_id: row.get(16)?,
            remote_wish_6_id: row.get(17)?,
            remote_wish_7_id: row.get(18)?,
            remote_wish_8_id: row.get(19)?,
            is_expired: row.get::<_, i64>(20)? != 0,
            is_priority: row.get::<_, i64>(21)? != 0,
            exclusion_reason: row.get(22)?,
            separate_quota: separate_code.as_deref().and_then(SeparateQuota::from_code),
            total_score: row.get(24)?,
            special_bonus: row.get(25)?,
            tiebreaker_1: row.get(26)?,
            tiebreaker_2: row.get(27)?,
            tiebreaker_3: row.get(28)?,
            tiebreaker_4: row.get(29)?,
            tiebreaker_5: row.get(30)?,
            tiebreaker_6: row.get(31)?,
            tiebreaker_7: row.get(32)?,
        })
    }

    /// 전체 명부 조회 (ID 오름차순 - 최종 동순위 판정의 정준 순서)
    pub fn list_all(&self) -> RepositoryResult<Vec<TransferCandidate>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM internal_transfers ORDER BY id",
            Self::SELECT_COLS
        ))?;

        let candidates = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<TransferCandidate>>>()?;

        Ok(candidates)
    }

    /// 단건 삽입
    ///
    /// # 반환
    /// - Ok(i64): 생성된 레코드 ID
    pub fn insert(&self, c: &TransferCandidate) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Self::insert_with_conn(&conn, c)?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_with_conn(conn: &Connection, c: &TransferCandidate) -> RepositoryResult<()> {
        conn.execute(
            r#"
            INSERT INTO internal_transfers (
                seq, teacher_name, gender, birth_date, note,
                current_school_id, assigned_school_id, preference_round,
                wish_school_1_id, wish_school_2_id, wish_school_3_id,
                remote_wish_1_id, remote_wish_2_id, remote_wish_3_id, remote_wish_4_id,
                remote_wish_5_id, remote_wish_6_id, remote_wish_7_id, remote_wish_8_id,
                is_expired, is_priority, exclusion_reason, separate_quota,
                total_score, special_bonus,
                tiebreaker_1, tiebreaker_2, tiebreaker_3, tiebreaker_4,
                tiebreaker_5, tiebreaker_6, tiebreaker_7
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19,
                ?20, ?21, ?22, ?23, ?24, ?25,
                ?26, ?27, ?28, ?29, ?30, ?31, ?32
            )
            "#,
            params![
                c.seq,
                c.teacher_name,
                c.gender,
                format_date(c.birth_date),
                c.note,
                c.current_school_id,
                c.assigned_school_id,
                c.preference_round.as_code(),
                c.wish_school_1_id,
                c.wish_school_2_id,
                c.wish_school_3_id,
                c.remote_wish_1_id,
                c.remote_wish_2_id,
                c.remote_wish_3_id,
                c.remote_wish_4_id,
                c.remote_wish_5_id,
                c.remote_wish_6_id,
                c.remote_wish_7_id,
                c.remote_wish_8_id,
                c.is_expired as i64,
                c.is_priority as i64,
                c.exclusion_reason,
                c.separate_quota.map(|q| q.as_code()),
                c.total_score,
                c.special_bonus,
                c.tiebreaker_1,
                c.tiebreaker_2,
                c.tiebreaker_3,
                c.tiebreaker_4,
                c.tiebreaker_5,
                c.tiebreaker_6,
                c.tiebreaker_7,
            ],
        )?;
        Ok(())
    }

    /// 명부 전체 교체 (가져오기용, 단일 트랜잭션)
    ///
    /// # 반환
    /// - Ok(usize): 삽입된 레코드 수
    pub fn bulk_replace(&self, candidates: &[TransferCandidate]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;
        conn.execute("DELETE FROM internal_transfers", [])?;

        for c in candidates {
            if let Err(e) = Self::insert_with_conn(&conn, c) {
                conn.execute("ROLLBACK", [])?;
                return Err(e);
            }
        }

        conn.execute("COMMIT", [])?;
        Ok(candidates.len())
    }

    /// 라운드 배정 결과 일괄 반영 (단일 트랜잭션)
    ///
    /// # 반환
    /// - Ok(usize): 갱신된 레코드 수
    pub fn apply_assignments(&self, decisions: &[AssignmentDecision]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;
        for d in decisions {
            let affected = conn.execute(
                "UPDATE internal_transfers SET assigned_school_id = ?1 WHERE id = ?2",
                params![d.school_id, d.candidate_id],
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

    /// 전체 배정 초기화
    pub fn reset_assignments(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE internal_transfers SET assigned_school_id = NULL \
             WHERE assigned_school_id IS NOT NULL",
            [],
        )?;
        Ok(affected)
    }

    /// 전체 희망구분 일괄 변경 (자동 배치 시작 시 1희망으로)
    pub fn set_all_preference_round(&self, round: PreferenceRound) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE internal_transfers SET preference_round = ?1",
            params![round.as_code()],
        )?;
        Ok(affected)
    }

    /// 지정 대상의 희망구분 변경 (만기 미배치자 이월, 단일 트랜잭션)
    pub fn update_preference_rounds(
        &self,
        ids: &[i64],
        round: PreferenceRound,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;
        for id in ids {
            let affected = conn.execute(
                "UPDATE internal_transfers SET preference_round = ?1 WHERE id = ?2",
                params![round.as_code(), id],
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

    fn update_exclusion_with_conn(
        conn: &Connection,
        u: &ExclusionUpdate,
    ) -> RepositoryResult<usize> {
        let affected = conn.execute(
            "UPDATE internal_transfers SET exclusion_reason = ?1, separate_quota = ?2 \
             WHERE id = ?3",
            params![
                u.exclusion_reason,
                u.separate_quota.map(|q| q.as_code()),
                u.candidate_id
            ],
        )?;
        Ok(affected)
    }

    /// 제외 점검 결과 일괄 반영 (단일 트랜잭션)
    ///
    /// # 반환
    /// - Ok(usize): 갱신된 레코드 수
    pub fn apply_exclusion_updates(&self, updates: &[ExclusionUpdate]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;
        for u in updates {
            match Self::update_exclusion_with_conn(&conn, u) {
                Ok(n) => updated_count += n,
                Err(e) => {
                    conn.execute("ROLLBACK", [])?;
                    return Err(e);
                }
            }
        }

        conn.execute("COMMIT", [])?;
        Ok(updated_count)
    }

    /// 우선유예 점검 결과 일괄 반영 (단일 트랜잭션)
    ///
    /// 총점 대체 + 우선 플래그와 전보유예 제외를 한 트랜잭션으로 묶는다
    ///
    /// # 반환
    /// - Ok(usize): 갱신된 레코드 수
    pub fn apply_priority_updates(
        &self,
        score_updates: &[PriorityScoreUpdate],
        deferrals: &[ExclusionUpdate],
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;
        for u in score_updates {
            let affected = conn.execute(
                "UPDATE internal_transfers SET total_score = ?1, is_priority = 1 WHERE id = ?2",
                params![u.total_score, u.candidate_id],
            );
            match affected {
                Ok(n) => updated_count += n,
                Err(e) => {
                    conn.execute("ROLLBACK", [])?;
                    return Err(e.into());
                }
            }
        }
        for u in deferrals {
            match Self::update_exclusion_with_conn(&conn, u) {
                Ok(n) => updated_count += n,
                Err(e) => {
                    conn.execute("ROLLBACK", [])?;
                    return Err(e);
                }
            }
        }

        conn.execute("COMMIT", [])?;
        Ok(updated_count)
    }
}
