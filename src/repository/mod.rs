// ==========================================
// 교원 전보 배치 시스템 - 저장소 계층
// ==========================================
// 레드라인: Repository 에 비즈니스 로직을 두지 않는다
// 연결 공유: Arc<Mutex<Connection>> 을 from_connection 으로 전달
// ==========================================

pub mod error;
pub mod movement_repo;
pub mod schema;
pub mod school_repo;
pub mod settings_repo;
pub mod transfer_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use movement_repo::MovementRepository;
pub use schema::init_schema;
pub use school_repo::SchoolRepository;
pub use settings_repo::SettingsRepository;
pub use transfer_repo::TransferRepository;
