// ==========================================
// 가져오기 통합 테스트
// ==========================================
// 책임: CSV 명부 가져오기 → DB 반영 → 배치 입력으로 사용 검증
// ==========================================

mod test_helpers;

use std::io::Write;

use teacher_transfer::api::{AssignmentApi, ImportApi};
use teacher_transfer::config::{SettingsManager, KEY_SPECIAL_BONUS_DISTRICT};
use teacher_transfer::repository::TransferRepository;
use test_helpers::{create_test_db, make_school, seed_schools};

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_import_replaces_roster_and_feeds_assignment() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(
        &conn,
        &[make_school(1, "중앙초", 10, 10), make_school(2, "동부초", 10, 9)],
    )
    .unwrap();

    let csv = write_csv(
        "순번,성명,성별,생년월일,현임교,1희망,2희망,만기여부,총점\n\
         1,김교사,여,1980-05-02,중앙초,동부초,,만기,85.5\n\
         2,이교사,남,1990-11-20,중앙초,동부초,,,70\n",
    );

    let import_api = ImportApi::from_connection(conn.clone());
    let report = import_api.import_candidates(csv.path()).unwrap();
    assert_eq!(report.success, 2);
    assert_eq!(report.failed, 0);

    let repo = TransferRepository::from_connection(conn.clone());
    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].teacher_name, "김교사");
    assert!(all[0].is_expired);
    assert_eq!(all[0].current_school_id, Some(1));
    assert_eq!(all[0].wish_school_1_id, Some(2));

    // 가져온 명부로 바로 배치 가능 (자리 하나 → 고득점자)
    let api = AssignmentApi::from_connection(conn);
    let result = api.run_round(1).unwrap();
    assert_eq!(result.assigned, 1);

    let all = repo.list_all().unwrap();
    assert_eq!(all[0].assigned_school_id, Some(2));
    assert_eq!(all[1].assigned_school_id, None);
}

#[test]
fn test_import_collects_row_errors_without_aborting() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10)]).unwrap();

    let csv = write_csv(
        "성명,현임교,총점\n\
         김교사,중앙초,80\n\
         이교사,미등록초,70\n",
    );

    let import_api = ImportApi::from_connection(conn.clone());
    let report = import_api.import_candidates(csv.path()).unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors[0].row, 2);
    assert!(report.errors[0].reason.contains("미등록초"));

    let repo = TransferRepository::from_connection(conn);
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn test_reimport_replaces_previous_roster() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10)]).unwrap();

    let import_api = ImportApi::from_connection(conn.clone());
    let first = write_csv("성명,현임교\n김교사,중앙초\n이교사,중앙초\n");
    import_api.import_candidates(first.path()).unwrap();

    let second = write_csv("성명,현임교\n박교사,중앙초\n");
    import_api.import_candidates(second.path()).unwrap();

    let repo = TransferRepository::from_connection(conn);
    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].teacher_name, "박교사");
}

#[test]
fn test_special_bonus_applied_from_settings() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(
        &conn,
        &[make_school(1, "중앙초", 10, 10), make_school(2, "웅상초", 10, 10)],
    )
    .unwrap();

    let settings = SettingsManager::from_connection(conn.clone());
    settings.set(KEY_SPECIAL_BONUS_DISTRICT, "웅상").unwrap();

    let csv = write_csv(
        "성명,현임교,1희망,총점,특별가산점\n\
         김교사,중앙초,웅상초,80,2.5\n",
    );

    let import_api = ImportApi::from_connection(conn.clone());
    let report = import_api.import_candidates(csv.path()).unwrap();
    assert_eq!(report.bonus_applied, 1);

    let repo = TransferRepository::from_connection(conn);
    let all = repo.list_all().unwrap();
    assert_eq!(all[0].total_score, 82.5);
    assert_eq!(all[0].special_bonus, 2.5);
}
