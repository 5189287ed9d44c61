// ==========================================
// 저장소 통합 테스트
// ==========================================
// 책임: 실제 SQLite 파일 위에서 저장소 왕복/트랜잭션 검증
// ==========================================

mod test_helpers;

use teacher_transfer::config::SettingsManager;
use teacher_transfer::domain::transfer::{AssignmentDecision, ExclusionUpdate, PriorityScoreUpdate};
use teacher_transfer::domain::types::{PreferenceRound, SeparateQuota};
use teacher_transfer::repository::{SchoolRepository, TransferRepository};
use test_helpers::{create_test_db, make_candidate, make_school, seed_schools};

#[test]
fn test_school_repo_list_orders_by_display_order() {
    let (_file, conn) = create_test_db().unwrap();

    let repo = SchoolRepository::from_connection(conn);
    let mut first = make_school(0, "나중초", 10, 10);
    first.display_order = 5;
    let mut second = make_school(0, "먼저초", 10, 10);
    second.display_order = 1;
    repo.insert(&first).unwrap();
    repo.insert(&second).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all[0].name, "먼저초");
    assert_eq!(all[1].name, "나중초");
}

#[test]
fn test_candidate_round_trip_preserves_fields() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10), make_school(2, "동부초", 10, 10)])
        .unwrap();

    let repo = TransferRepository::from_connection(conn);
    let mut c = make_candidate("김교사", 1, Some(2));
    c.preference_round = PreferenceRound::Second;
    c.separate_quota = Some(SeparateQuota::Dispatched);
    c.is_expired = true;
    c.total_score = 88.75;
    c.tiebreaker_3 = 19_800_502.0;
    c.birth_date = chrono::NaiveDate::from_ymd_opt(1980, 5, 2);
    let id = repo.insert(&c).unwrap();

    let all = repo.list_all().unwrap();
    let row = all.iter().find(|r| r.id == id).unwrap();
    assert_eq!(row.preference_round, PreferenceRound::Second);
    assert_eq!(row.separate_quota, Some(SeparateQuota::Dispatched));
    assert!(row.is_expired);
    assert_eq!(row.total_score, 88.75);
    assert_eq!(row.tiebreaker_3, 19_800_502.0);
    assert_eq!(row.birth_date, chrono::NaiveDate::from_ymd_opt(1980, 5, 2));
}

#[test]
fn test_apply_assignments_is_atomic_batch() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10), make_school(2, "동부초", 10, 10)])
        .unwrap();

    let repo = TransferRepository::from_connection(conn);
    let a = repo.insert(&make_candidate("갑", 1, Some(2))).unwrap();
    let b = repo.insert(&make_candidate("을", 1, Some(2))).unwrap();

    let updated = repo
        .apply_assignments(&[
            AssignmentDecision { candidate_id: a, school_id: 2 },
            AssignmentDecision { candidate_id: b, school_id: 2 },
        ])
        .unwrap();
    assert_eq!(updated, 2);

    let all = repo.list_all().unwrap();
    assert!(all.iter().all(|c| c.assigned_school_id == Some(2)));
}

#[test]
fn test_apply_exclusion_updates_is_atomic_batch() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10), make_school(2, "동부초", 10, 10)])
        .unwrap();

    let repo = TransferRepository::from_connection(conn);
    let a = repo.insert(&make_candidate("갑", 1, Some(2))).unwrap();
    let b = repo.insert(&make_candidate("을", 1, Some(2))).unwrap();

    let updated = repo
        .apply_exclusion_updates(&[
            ExclusionUpdate {
                candidate_id: a,
                exclusion_reason: Some("퇴직".to_string()),
                separate_quota: None,
            },
            ExclusionUpdate {
                candidate_id: b,
                exclusion_reason: None,
                separate_quota: Some(SeparateQuota::LeaveOfAbsence),
            },
        ])
        .unwrap();
    assert_eq!(updated, 2);

    let all = repo.list_all().unwrap();
    let row_a = all.iter().find(|c| c.id == a).unwrap();
    let row_b = all.iter().find(|c| c.id == b).unwrap();
    assert_eq!(row_a.exclusion_reason.as_deref(), Some("퇴직"));
    assert_eq!(row_b.separate_quota, Some(SeparateQuota::LeaveOfAbsence));
}

#[test]
fn test_apply_priority_updates_combines_score_and_deferral() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10), make_school(2, "동부초", 10, 10)])
        .unwrap();

    let repo = TransferRepository::from_connection(conn);
    let a = repo.insert(&make_candidate("갑", 1, Some(2))).unwrap();
    let b = repo.insert(&make_candidate("을", 1, Some(2))).unwrap();

    // 총점 대체와 유예 제외가 한 번의 호출로 함께 반영된다
    let updated = repo
        .apply_priority_updates(
            &[PriorityScoreUpdate { candidate_id: a, total_score: 999.0 }],
            &[ExclusionUpdate {
                candidate_id: b,
                exclusion_reason: Some("전보유예".to_string()),
                separate_quota: None,
            }],
        )
        .unwrap();
    assert_eq!(updated, 2);

    let all = repo.list_all().unwrap();
    let row_a = all.iter().find(|c| c.id == a).unwrap();
    let row_b = all.iter().find(|c| c.id == b).unwrap();
    assert_eq!(row_a.total_score, 999.0);
    assert!(row_a.is_priority);
    assert_eq!(row_b.exclusion_reason.as_deref(), Some("전보유예"));
}

#[test]
fn test_update_preference_rounds_targets_only_given_ids() {
    let (_file, conn) = create_test_db().unwrap();
    seed_schools(&conn, &[make_school(1, "중앙초", 10, 10), make_school(2, "동부초", 10, 10)])
        .unwrap();

    let repo = TransferRepository::from_connection(conn);
    let a = repo.insert(&make_candidate("갑", 1, Some(2))).unwrap();
    let b = repo.insert(&make_candidate("을", 1, Some(2))).unwrap();

    repo.update_preference_rounds(&[a], PreferenceRound::Second)
        .unwrap();

    let all = repo.list_all().unwrap();
    let row_a = all.iter().find(|c| c.id == a).unwrap();
    let row_b = all.iter().find(|c| c.id == b).unwrap();
    assert_eq!(row_a.preference_round, PreferenceRound::Second);
    assert_eq!(row_b.preference_round, PreferenceRound::First);
}

#[test]
fn test_settings_defaults_and_override() {
    let (_file, conn) = create_test_db().unwrap();

    let settings = SettingsManager::from_connection(conn);
    settings.init_defaults().unwrap();

    let loaded = settings.load().unwrap();
    assert_eq!(loaded.office_name, "양산교육지원청");
    assert_eq!(loaded.transfer_year, 2025);
    assert_eq!(loaded.school_level, "초등학교");
    assert_eq!(loaded.special_bonus_district, None);

    settings.set("office_name", "창원교육지원청").unwrap();
    // init_defaults 는 기존 값을 덮어쓰지 않는다
    settings.init_defaults().unwrap();
    let loaded = settings.load().unwrap();
    assert_eq!(loaded.office_name, "창원교육지원청");
}
