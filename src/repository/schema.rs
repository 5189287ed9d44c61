// ==========================================
// 교원 전보 배치 시스템 - 스키마 초기화
// ==========================================
// 레드라인: 스키마 변경은 CURRENT_SCHEMA_VERSION 상향과 함께
// ==========================================

use crate::db::CURRENT_SCHEMA_VERSION;
use crate::repository::error::RepositoryResult;
use rusqlite::Connection;

/// 전체 테이블 생성 (존재하면 무시)
///
/// # 파라미터
/// - conn: SQLite 연결
///
/// # 반환
/// - Ok(()): 초기화 성공
/// - Err: 데이터베이스 오류
pub fn init_schema(conn: &Connection) -> RepositoryResult<()> {
    conn.execute_batch(
        r#"
        -- 학교 기본 정보
        CREATE TABLE IF NOT EXISTS schools (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL UNIQUE,
            full_name       TEXT,
            display_order   INTEGER NOT NULL DEFAULT 0,
            quota           INTEGER NOT NULL DEFAULT 0,
            current_count   INTEGER NOT NULL DEFAULT 0,
            male_count      INTEGER NOT NULL DEFAULT 0,
            female_count    INTEGER NOT NULL DEFAULT 0
        );

        -- 관내전출입 (배치 대상 명부)
        CREATE TABLE IF NOT EXISTS internal_transfers (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            seq                 INTEGER,
            teacher_name        TEXT NOT NULL,
            gender              TEXT,
            birth_date          TEXT,
            note                TEXT,
            current_school_id   INTEGER REFERENCES schools(id),
            assigned_school_id  INTEGER REFERENCES schools(id),
            preference_round    TEXT NOT NULL DEFAULT '1희망',
            wish_school_1_id    INTEGER REFERENCES schools(id),
            wish_school_2_id    INTEGER REFERENCES schools(id),
            wish_school_3_id    INTEGER REFERENCES schools(id),
            remote_wish_1_id    INTEGER REFERENCES schools(id),
            remote_wish_2_id    INTEGER REFERENCES schools(id),
            remote_wish_3_id    INTEGER REFERENCES schools(id),
            remote_wish_4_id    INTEGER REFERENCES schools(id),
            remote_wish_5_id    INTEGER REFERENCES schools(id),
            remote_wish_6_id    INTEGER REFERENCES schools(id),
            remote_wish_7_id    INTEGER REFERENCES schools(id),
            remote_wish_8_id    INTEGER REFERENCES schools(id),
            is_expired          INTEGER NOT NULL DEFAULT 0,
            is_priority         INTEGER NOT NULL DEFAULT 0,
            exclusion_reason    TEXT,
            separate_quota      TEXT,
            total_score         REAL NOT NULL DEFAULT 0,
            special_bonus       REAL NOT NULL DEFAULT 0,
            tiebreaker_1        REAL NOT NULL DEFAULT 0,
            tiebreaker_2        REAL NOT NULL DEFAULT 0,
            tiebreaker_3        REAL NOT NULL DEFAULT 0,
            tiebreaker_4        REAL NOT NULL DEFAULT 0,
            tiebreaker_5        REAL NOT NULL DEFAULT 0,
            tiebreaker_6        REAL NOT NULL DEFAULT 0,
            tiebreaker_7        REAL NOT NULL DEFAULT 0
        );

        -- 결원 (휴직/파견/퇴직 등으로 비는 자리)
        CREATE TABLE IF NOT EXISTS vacancies (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            seq          INTEGER,
            type_code    TEXT,
            school_id    INTEGER REFERENCES schools(id),
            teacher_name TEXT NOT NULL,
            gender       TEXT,
            birth_date   TEXT,
            note         TEXT
        );

        -- 충원 (결원과 동일 형태)
        CREATE TABLE IF NOT EXISTS supplements (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            seq          INTEGER,
            type_code    TEXT,
            school_id    INTEGER REFERENCES schools(id),
            teacher_name TEXT NOT NULL,
            gender       TEXT,
            birth_date   TEXT,
            note         TEXT
        );

        -- 관외전출
        CREATE TABLE IF NOT EXISTS external_transfers_out (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            seq            INTEGER,
            transfer_type  TEXT NOT NULL DEFAULT '',
            school_id      INTEGER NOT NULL REFERENCES schools(id),
            teacher_name   TEXT NOT NULL,
            gender         TEXT,
            birth_date     TEXT,
            destination    TEXT,
            separate_quota TEXT,
            note           TEXT
        );

        -- 관외전입
        CREATE TABLE IF NOT EXISTS external_transfers_in (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            seq                INTEGER,
            transfer_type      TEXT NOT NULL DEFAULT '',
            origin_school      TEXT,
            teacher_name       TEXT NOT NULL,
            gender             TEXT,
            birth_date         TEXT,
            assigned_school_id INTEGER REFERENCES schools(id),
            separate_quota     TEXT,
            note               TEXT
        );

        -- 우선전보/전보유예
        CREATE TABLE IF NOT EXISTS priority_transfers (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            kind         TEXT NOT NULL,
            school_id    INTEGER REFERENCES schools(id),
            teacher_name TEXT NOT NULL,
            total_score  REAL,
            gender       TEXT,
            birth_date   TEXT,
            note         TEXT
        );

        -- 과원
        CREATE TABLE IF NOT EXISTS surplus_transfers (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            school_id      INTEGER NOT NULL REFERENCES schools(id),
            teacher_name   TEXT NOT NULL,
            surplus_number INTEGER NOT NULL DEFAULT 0,
            stay_current   INTEGER NOT NULL DEFAULT 0,
            resolved       INTEGER NOT NULL DEFAULT 0,
            gender         TEXT,
            birth_date     TEXT,
            note           TEXT
        );

        -- 운영 설정 (키-값)
        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        -- 스키마 버전
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_internal_current_school
            ON internal_transfers(current_school_id);
        CREATE INDEX IF NOT EXISTS idx_internal_assigned_school
            ON internal_transfers(assigned_school_id);
        CREATE INDEX IF NOT EXISTS idx_vacancies_school ON vacancies(school_id);
        CREATE INDEX IF NOT EXISTS idx_supplements_school ON supplements(school_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}
