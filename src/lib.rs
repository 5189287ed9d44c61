// ==========================================
// 교원 전보 배치 시스템 - 핵심 라이브러리
// ==========================================
// 기술 스택: Rust + SQLite
// 시스템 성격: 의사결정 지원 시스템 (최종 판단은 운영자)
// ==========================================

// 국제화 시스템 초기화
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 모듈 선언
// ==========================================

// 영역 계층 - 엔터티와 타입
pub mod domain;

// 저장소 계층 - 데이터 접근
pub mod repository;

// 엔진 계층 - 업무 규칙
pub mod engine;

// 가져오기 계층 - 외부 데이터
pub mod importer;

// 설정 계층 - 운영 설정
pub mod config;

// 데이터베이스 기반 (연결 초기화/PRAGMA 통일)
pub mod db;

// 로그 시스템
pub mod logging;

// 국제화
pub mod i18n;

// API 계층 - 업무 인터페이스
pub mod api;

// ==========================================
// 핵심 타입 재수출
// ==========================================

// 영역 타입
pub use domain::types::{PreferenceRound, PriorityKind, RunState, SeparateQuota};

// 영역 엔터티
pub use domain::{
    AssignmentDecision, AssignmentStats, ExternalIn, ExternalOut, PriorityRecord, School,
    SchoolShortage, SurplusRecord, TransferCandidate, VacancyRecord,
};

// 엔진
pub use engine::{
    AssignmentEngine, ExclusionChecker, PriorityChecker, RankSorter, RoundOrchestrator,
    ShortageCalculator, SurplusResolver,
};

// API
pub use api::{AssignmentApi, ImportApi};

// ==========================================
// 상수 정의
// ==========================================

// 시스템 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 시스템 이름
pub const APP_NAME: &str = "교원 전보 배치 시스템";

// 데이터베이스 버전
pub const DB_VERSION: &str = "v0.1";
