// ==========================================
// 교원 전보 배치 시스템 - SQLite 연결 초기화
// ==========================================
// 목표:
// - 모든 Connection::open 의 PRAGMA 동작 통일 (외래키 일부만 켜지는 상황 방지)
// - busy_timeout 통일로 동시 기록 시 산발적 busy 오류 감소
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::path::PathBuf;
use std::time::Duration;

/// 기본 busy_timeout (밀리초)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 현재 코드가 기대하는 schema_version
///
/// 버전 불일치는 경고용이며 자동 마이그레이션은 하지 않는다.
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// SQLite 연결 공통 PRAGMA 설정
///
/// - foreign_keys 는 연결마다 개별 활성화 필요
/// - busy_timeout 은 연결마다 개별 설정 필요
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 연결을 열고 공통 설정 적용
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// schema_version 조회 (테이블이 없으면 None)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// 기본 데이터베이스 경로 (데이터 디렉터리 하위)
pub fn default_db_path() -> String {
    let mut path: PathBuf = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("teacher-transfer");
    path.push("transfer.db");
    path.to_string_lossy().to_string()
}
