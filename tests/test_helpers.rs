// ==========================================
// 테스트 보조 함수
// ==========================================
// 책임: 임시 데이터베이스 초기화와 테스트 데이터 생성
// ==========================================

#![allow(dead_code)]

use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use teacher_transfer::domain::school::School;
use teacher_transfer::domain::transfer::TransferCandidate;
use teacher_transfer::domain::types::PreferenceRound;
use teacher_transfer::db::configure_sqlite_connection;
use teacher_transfer::repository::init_schema;

/// 임시 테스트 데이터베이스 생성 + 스키마 초기화
///
/// # 반환
/// - NamedTempFile: 임시 파일 (살아 있어야 DB 유지)
/// - Arc<Mutex<Connection>>: 공유 연결
pub fn create_test_db() -> Result<(NamedTempFile, Arc<Mutex<Connection>>), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;

    Ok((temp_file, Arc::new(Mutex::new(conn))))
}

/// 테스트용 학교 생성
pub fn make_school(id: i64, name: &str, quota: i32, current: i32) -> School {
    School {
        id,
        name: name.to_string(),
        full_name: Some(format!("{}등학교", name)),
        display_order: id as i32,
        quota,
        current_count: current,
        male_count: current / 2,
        female_count: current - current / 2,
    }
}

/// 테스트용 전보 후보 생성 (id=0, DB 채번)
pub fn make_candidate(name: &str, current: i64, wish_1: Option<i64>) -> TransferCandidate {
    TransferCandidate {
        id: 0,
        seq: None,
        teacher_name: name.to_string(),
        gender: Some("여".to_string()),
        birth_date: None,
        note: None,
        current_school_id: Some(current),
        assigned_school_id: None,
        preference_round: PreferenceRound::First,
        wish_school_1_id: wish_1,
        wish_school_2_id: None,
        wish_school_3_id: None,
        remote_wish_1_id: None,
        remote_wish_2_id: None,
        remote_wish_3_id: None,
        remote_wish_4_id: None,
        remote_wish_5_id: None,
        remote_wish_6_id: None,
        remote_wish_7_id: None,
        remote_wish_8_id: None,
        is_expired: false,
        is_priority: false,
        exclusion_reason: None,
        separate_quota: None,
        total_score: 50.0,
        special_bonus: 0.0,
        tiebreaker_1: 0.0,
        tiebreaker_2: 0.0,
        tiebreaker_3: 0.0,
        tiebreaker_4: 0.0,
        tiebreaker_5: 0.0,
        tiebreaker_6: 0.0,
        tiebreaker_7: 0.0,
    }
}

/// 학교 목록 시드 (직접 INSERT, display_order = id 순)
pub fn seed_schools(
    conn: &Arc<Mutex<Connection>>,
    schools: &[School],
) -> Result<(), Box<dyn Error>> {
    let conn = conn.lock().unwrap();
    for s in schools {
        conn.execute(
            "INSERT INTO schools (id, name, full_name, display_order, quota, \
                                  current_count, male_count, female_count) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                s.id,
                s.name,
                s.full_name,
                s.display_order,
                s.quota,
                s.current_count,
                s.male_count,
                s.female_count,
            ],
        )?;
    }
    Ok(())
}
