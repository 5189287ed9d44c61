// ==========================================
// 교원 전보 배치 시스템 - 저장소 계층 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 저장소 계층 오류 타입
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 데이터베이스 오류 =====
    #[error("레코드를 찾을 수 없음: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("데이터베이스 연결 실패: {0}")]
    DatabaseConnectionError(String),

    #[error("데이터베이스 잠금 획득 실패: {0}")]
    LockError(String),

    #[error("데이터베이스 트랜잭션 실패: {0}")]
    DatabaseTransactionError(String),

    #[error("데이터베이스 질의 실패: {0}")]
    DatabaseQueryError(String),

    #[error("고유 제약 위반: {0}")]
    UniqueConstraintViolation(String),

    #[error("외래키 제약 위반: {0}")]
    ForeignKeyViolation(String),

    // ===== 비즈니스 규칙 오류 =====
    #[error("비즈니스 규칙 위반: {0}")]
    BusinessRuleViolation(String),

    #[error("허용되지 않는 상태 전이: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== 데이터 품질 오류 =====
    #[error("데이터 검증 실패: {0}")]
    ValidationError(String),

    #[error("필드 값 오류 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 공통 오류 =====
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// From<rusqlite::Error> 구현
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 타입 별칭
pub type RepositoryResult<T> = Result<T, RepositoryError>;
