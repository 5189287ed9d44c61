// ==========================================
// 교원 전보 배치 시스템 - 학교 저장소
// ==========================================
// 레드라인: Repository 에 비즈니스 로직을 두지 않는다
// ==========================================

use crate::domain::school::School;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// SchoolRepository - 학교 저장소
// ==========================================

/// 학교 저장소
/// 책임: schools 테이블 CRUD
pub struct SchoolRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SchoolRepository {
    /// 새 저장소 인스턴스 생성
    ///
    /// # 파라미터
    /// - db_path: 데이터베이스 파일 경로
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

    fn map_row(row: &Row<'_>) -> SqliteResult<School> {
        Ok(School {
            id: row.get(0)?,
            name: row.get(1)?,
            full_name: row.get(2)?,
            display_order: row.get(3)?,
            quota: row.get(4)?,
            current_count: row.get(5)?,
            male_count: row.get(6)?,
            female_count: row.get(7)?,
        })
    }

    const SELECT_COLS: &'static str = "id, name, full_name, display_order, quota, \
         current_count, male_count, female_count";

    /// 전체 학교 조회 (사용자정의목록 순서)
    ///
    /// # 반환
    /// - Ok(Vec<School>): display_order 오름차순 목록
    pub fn list_all(&self) -> RepositoryResult<Vec<School>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schools ORDER BY display_order, name",
            Self::SELECT_COLS
        ))?;

        let schools = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<School>>>()?;

        Ok(schools)
    }

    /// ID 로 단건 조회
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<School>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schools WHERE id = ?1",
            Self::SELECT_COLS
        ))?;

        let school = stmt.query_row(params![id], Self::map_row).optional()?;
        Ok(school)
    }

    /// 학교명으로 단건 조회 (가져오기 시 이름→ID 해석)
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<School>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM schools WHERE name = ?1",
            Self::SELECT_COLS
        ))?;

        let school = stmt.query_row(params![name], Self::map_row).optional()?;
        Ok(school)
    }

    /// 단건 삽입
    ///
    /// # 반환
    /// - Ok(i64): 생성된 학교 ID
    pub fn insert(&self, school: &School) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO schools (
                name, full_name, display_order, quota,
                current_count, male_count, female_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                school.name,
                school.full_name,
                school.display_order,
                school.quota,
                school.current_count,
                school.male_count,
                school.female_count,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 단건 갱신
    pub fn update(&self, school: &School) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE schools SET
                name = ?1, full_name = ?2, display_order = ?3, quota = ?4,
                current_count = ?5, male_count = ?6, female_count = ?7
            WHERE id = ?8
            "#,
            params![
                school.name,
                school.full_name,
                school.display_order,
                school.quota,
                school.current_count,
                school.male_count,
                school.female_count,
                school.id,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "School".to_string(),
                id: school.id.to_string(),
            });
        }
        Ok(())
    }

    /// 학교명 기준 일괄 삽입/갱신
    ///
    /// # 반환
    /// - Ok(usize): 반영된 레코드 수
    pub fn upsert_batch(&self, schools: &[School]) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let mut updated_count = 0;
        for school in schools {
            let affected = conn.execute(
                r#"
                INSERT INTO schools (
                    name, full_name, display_order, quota,
                    current_count, male_count, female_count
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(name) DO UPDATE SET
                    full_name = excluded.full_name,
                    display_order = excluded.display_order,
                    quota = excluded.quota,
                    current_count = excluded.current_count,
                    male_count = excluded.male_count,
                    female_count = excluded.female_count
                "#,
                params![
                    school.name,
                    school.full_name,
                    school.display_order,
                    school.quota,
                    school.current_count,
                    school.male_count,
                    school.female_count,
                ],
            )?;
            updated_count += affected;
        }

        conn.execute("COMMIT", [])?;
        Ok(updated_count)
    }

    /// 전체 삭제 (재가져오기 전 초기화용)
    pub fn delete_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM schools", [])?;
        Ok(affected)
    }
}
