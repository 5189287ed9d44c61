// ==========================================
// 교원 전보 배치 시스템 - API 계층 오류 타입
// ==========================================
// 책임: Repository/Import 오류를 사용자에게 설명 가능한 오류로 변환
// ==========================================

use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 계층 오류 타입
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 비즈니스 규칙 오류 =====
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    #[error("대상을 찾을 수 없음: {0}")]
    NotFound(String),

    #[error("비즈니스 규칙 위반: {0}")]
    BusinessRuleViolation(String),

    #[error("허용되지 않는 상태 전이: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== 데이터 접근 오류 =====
    #[error("데이터베이스 오류: {0}")]
    DatabaseError(String),

    #[error("데이터베이스 연결 실패: {0}")]
    DatabaseConnectionError(String),

    #[error("데이터베이스 트랜잭션 실패: {0}")]
    DatabaseTransactionError(String),

    // ===== 가져오기 오류 =====
    #[error("파일 가져오기 실패: {0}")]
    ImportError(String),

    #[error("데이터 검증 실패: {0}")]
    ValidationError(String),

    // ===== 공통 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// RepositoryError → ApiError 변환
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={}) 없음", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("데이터베이스 잠금 획득 실패: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("고유 제약 위반: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("외래키 제약 위반: {}", msg))
            }
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::InvalidStateTransition { from, to } => {
                ApiError::InvalidStateTransition { from, to }
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("필드 {} 오류: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// ImportError → ApiError 변환
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::DatabaseTransactionError(msg) => ApiError::DatabaseTransactionError(msg),
            ImportError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;
