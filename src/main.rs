// ==========================================
// 교원 전보 배치 시스템 - CLI 주 진입점
// ==========================================
// 기술 스택: Rust + SQLite
// 시스템 성격: 의사결정 지원 시스템 (배치 결과는 운영자가 최종 검토)
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex};

use teacher_transfer::api::{AssignmentApi, ImportApi};
use teacher_transfer::config::SettingsManager;
use teacher_transfer::db;
use teacher_transfer::logging;
use teacher_transfer::repository::init_schema;

fn print_usage() {
    println!("사용법: teacher-transfer [--db <경로>] [--json] <명령> [인자]");
    println!();
    println!("명령:");
    println!("  import <CSV경로>   관내전출입 명부 가져오기 (기존 명부 교체)");
    println!("  check-exclusion    제외 점검 (결원/관외전출/현소속 지원 대조)");
    println!("  check-priority     우선유예 점검 (우선전보/전보유예 반영)");
    println!("  check-surplus      과원해소 점검 (시뮬레이션 기반)");
    println!("  reset              배정 결과 전체 초기화");
    println!("  round <1|2|3>      단일 라운드 배치 실행");
    println!("  auto               자동 배치 (1→2→3 라운드)");
    println!("  shortage           학교별 과부족 현황");
    println!("  stats              배치 통계");
    println!("  unassigned         미배치자 목록");
}

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 의사결정 지원 시스템", teacher_transfer::APP_NAME);
    tracing::info!("시스템 버전: {}", teacher_transfer::VERSION);
    tracing::info!("==================================================");

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    // --json: shortage/stats 를 JSON 으로 출력
    let json_output = if let Some(pos) = args.iter().position(|a| a == "--json") {
        args.remove(pos);
        true
    } else {
        false
    };

    // --db <경로> 옵션 (기본: 데이터 디렉터리)
    let mut db_path = db::default_db_path();
    if let Some(pos) = args.iter().position(|a| a == "--db") {
        if pos + 1 >= args.len() {
            print_usage();
            anyhow::bail!("--db 옵션에 경로가 없습니다");
        }
        db_path = args.remove(pos + 1);
        args.remove(pos);
    }

    let command = match args.first() {
        Some(c) => c.clone(),
        None => {
            print_usage();
            return Ok(());
        }
    };

    tracing::info!("사용 데이터베이스: {}", db_path);
    if let Some(parent) = Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = db::open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    let settings = SettingsManager::from_connection(conn.clone());
    settings.init_defaults()?;

    let assignment_api = AssignmentApi::from_connection(conn.clone());
    let import_api = ImportApi::from_connection(conn);

    match command.as_str() {
        "import" => {
            let path = args.get(1).ok_or_else(|| {
                anyhow::anyhow!("import 명령에 CSV 경로가 필요합니다")
            })?;
            let report = import_api.import_candidates(Path::new(path))?;
            println!(
                "가져오기 완료 (batch={}): 총 {}건, 성공 {}건, 실패 {}건, 가산점 반영 {}건",
                report.batch_id, report.total, report.success, report.failed, report.bonus_applied
            );
            for e in &report.errors {
                println!("  [{}행] {}", e.row, e.reason);
            }
        }
        "check-exclusion" => {
            let report = assignment_api.check_exclusion()?;
            println!("제외 점검 완료: {}건 반영", report.touched);
            print_warnings(&report);
        }
        "check-priority" => {
            let report = assignment_api.check_priority()?;
            println!("우선유예 점검 완료: {}건 반영", report.touched);
            print_warnings(&report);
        }
        "check-surplus" => {
            let report = assignment_api.check_surplus()?;
            println!("과원해소 점검 완료: {}건 해소 가능", report.touched);
        }
        "reset" => {
            let cleared = assignment_api.reset_assignments()?;
            println!("배정 초기화 완료: {}건", cleared);
        }
        "round" => {
            let round_no: u8 = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("round 명령에 라운드 번호(1~3)가 필요합니다"))?
                .parse()?;
            let result = assignment_api.run_round(round_no)?;
            println!(
                "{}라운드 완료: {}명 배정 (순회 {}회, 수렴 {})",
                result.round_no,
                result.assigned,
                result.passes_used,
                if result.converged { "예" } else { "아니오" }
            );
            if !result.converged {
                println!("주의: 순회 상한에 도달했습니다. 결과를 검토하세요.");
            }
        }
        "auto" => {
            let report = assignment_api.run_auto()?;
            for round in &report.rounds {
                println!(
                    "{}라운드: {}명 배정 (순회 {}회, 수렴 {}, 이월 {}명)",
                    round.round_no,
                    round.assigned,
                    round.passes_used,
                    if round.converged { "예" } else { "아니오" },
                    round.escalated_ids.len()
                );
            }
            println!(
                "자동 배치 종료: 총 {}명 배정, 미배치 {}명",
                report.total_assigned, report.unassigned_after
            );
        }
        "shortage" => {
            let shortages = assignment_api.school_shortages()?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&shortages)?);
            } else {
                println!("{:<16} {:>6} {:>6} {:>6}", "학교", "정원", "현원", "과부족");
                for s in &shortages {
                    println!(
                        "{:<16} {:>6} {:>6} {:>6}",
                        s.name, s.quota, s.current_count, s.shortage
                    );
                }
            }
        }
        "stats" => {
            let stats = assignment_api.statistics()?;
            if json_output {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "전체 {}명 / 배정 {}명 / 제외 {}명 / 미배치 {}명 (배치율 {}%)",
                    stats.total, stats.assigned, stats.excluded, stats.unassigned, stats.assignment_rate
                );
            }
        }
        "unassigned" => {
            let list = assignment_api.unassigned()?;
            println!("미배치자 {}명:", list.len());
            for c in &list {
                println!(
                    "  [{}] {} ({})",
                    c.id,
                    c.teacher_name,
                    c.preference_round.as_code()
                );
            }
        }
        other => {
            print_usage();
            anyhow::bail!("알 수 없는 명령: {}", other);
        }
    }

    Ok(())
}

fn print_warnings(report: &teacher_transfer::api::ReconcileReport) {
    if report.warnings.is_empty() {
        return;
    }
    println!("경고 {}건 (자동 반영하지 않음):", report.warnings.len());
    for w in &report.warnings {
        println!(
            "  [{}] {} - 대조 {}건 (학교 id={:?})",
            w.source, w.teacher_name, w.matches, w.school_id
        );
    }
    println!("{}", report.notice);
}
