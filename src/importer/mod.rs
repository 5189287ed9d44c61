// ==========================================
// 교원 전보 배치 시스템 - 가져오기 계층
// ==========================================
// 책임: 외부 CSV 명부를 내부 데이터로 변환
// 행 단위 오류는 집계 보고, 파일 단위 오류만 실패로 처리
// ==========================================

pub mod candidate_importer;
pub mod error;

pub use candidate_importer::{CandidateImporter, ImportReport, ImportRowError};
pub use error::{ImportError, ImportResult};
