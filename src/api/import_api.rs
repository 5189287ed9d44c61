// ==========================================
// 교원 전보 배치 시스템 - 가져오기 API
// ==========================================
// 책임: CSV 명부 가져오기 → 명부 전체 교체 (단일 트랜잭션)
// 행 단위 오류는 보고서로 반환, 성공 행만 반영
// ==========================================

use crate::api::error::ApiResult;
use crate::config::SettingsManager;
use crate::i18n::t_with_args;
use crate::importer::candidate_importer::{CandidateImporter, ImportReport};
use crate::repository::{SchoolRepository, TransferRepository};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

// ==========================================
// ImportApi - 가져오기 API
// ==========================================
pub struct ImportApi {
    school_repo: SchoolRepository,
    transfer_repo: TransferRepository,
    settings: SettingsManager,
    importer: CandidateImporter,
}

impl ImportApi {
    /// 기존 연결로 API 인스턴스 생성
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            school_repo: SchoolRepository::from_connection(conn.clone()),
            transfer_repo: TransferRepository::from_connection(conn.clone()),
            settings: SettingsManager::from_connection(conn),
            importer: CandidateImporter::new(),
        }
    }

    /// 관내전출입 명부 가져오기 (기존 명부 전체 교체)
    ///
    /// # 파라미터
    /// - path: CSV 파일 경로
    ///
    /// # 반환
    /// ImportReport (성공/실패 건수 + 행 단위 오류)
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn import_candidates(&self, path: &Path) -> ApiResult<ImportReport> {
        let schools = self.school_repo.list_all()?;
        let settings = self.settings.load()?;

        let (candidates, report) = self
            .importer
            .import_candidates(path, &schools, &settings)?;

        self.transfer_repo.bulk_replace(&candidates)?;

        info!(
            "{}",
            t_with_args(
                "import.done",
                &[
                    ("success", &report.success.to_string()),
                    ("failed", &report.failed.to_string()),
                ],
            )
        );

        Ok(report)
    }
}
