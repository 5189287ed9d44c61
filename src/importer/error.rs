// ==========================================
// 교원 전보 배치 시스템 - 가져오기 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 가져오기 오류 타입
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 파일 오류 =====
    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("지원하지 않는 파일 형식: {0} (.csv 만 지원)")]
    UnsupportedFormat(String),

    #[error("파일 읽기 실패: {0}")]
    FileReadError(String),

    #[error("CSV 해석 실패: {0}")]
    CsvParseError(String),

    #[error("필수 열 누락: {0}")]
    MissingColumn(String),

    // ===== 데이터 매핑 오류 (행 단위, 보고서에 집계) =====
    #[error("필드 매핑 실패 (행 {row}): {message}")]
    FieldMappingError { row: usize, message: String },

    #[error("형 변환 실패 (행 {row}, 필드 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("학교명 해석 실패 (행 {row}): {name}")]
    UnknownSchool { row: usize, name: String },

    // ===== 데이터베이스 오류 =====
    #[error("데이터베이스 트랜잭션 실패: {0}")]
    DatabaseTransactionError(String),

    #[error("데이터베이스 질의 실패: {0}")]
    DatabaseQueryError(String),

    // ===== 공통 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// From<std::io::Error> 구현
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// From<rusqlite::Error> 구현
impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::DatabaseQueryError(err.to_string())
    }
}

// From<csv::Error> 구현
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 타입 별칭
pub type ImportResult<T> = Result<T, ImportError>;
