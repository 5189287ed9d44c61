// ==========================================
// 교원 전보 배치 시스템 - 운영 설정
// ==========================================
// settings 테이블 위의 타입 있는 접근 계층
// 교육지원청/연도/학교급/발령일은 보고서 머리글과 가져오기 규칙에 쓰인다
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::settings_repo::SettingsRepository;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ===== 설정 키 =====
pub const KEY_OFFICE_NAME: &str = "office_name";
pub const KEY_TRANSFER_YEAR: &str = "transfer_year";
pub const KEY_SCHOOL_LEVEL: &str = "school_level";
pub const KEY_APPOINTMENT_DATE: &str = "appointment_date";
pub const KEY_SPECIAL_BONUS_DISTRICT: &str = "special_bonus_district";

// ===== 기본값 =====
const DEFAULT_OFFICE_NAME: &str = "양산교육지원청";
const DEFAULT_TRANSFER_YEAR: &str = "2025";
const DEFAULT_SCHOOL_LEVEL: &str = "초등학교";
const DEFAULT_APPOINTMENT_DATE: &str = "2025-03-01";

/// 운영 설정 스냅샷
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub office_name: String,
    pub transfer_year: i32,
    pub school_level: String,
    pub appointment_date: NaiveDate,
    pub special_bonus_district: Option<String>,
}

/// 설정 관리자
pub struct SettingsManager {
    repo: SettingsRepository,
}

impl SettingsManager {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            repo: SettingsRepository::from_connection(conn),
        }
    }

    /// 기본값 시드 (이미 있는 키는 건드리지 않는다)
    pub fn init_defaults(&self) -> RepositoryResult<()> {
        self.repo.set_if_absent(KEY_OFFICE_NAME, DEFAULT_OFFICE_NAME)?;
        self.repo.set_if_absent(KEY_TRANSFER_YEAR, DEFAULT_TRANSFER_YEAR)?;
        self.repo.set_if_absent(KEY_SCHOOL_LEVEL, DEFAULT_SCHOOL_LEVEL)?;
        self.repo
            .set_if_absent(KEY_APPOINTMENT_DATE, DEFAULT_APPOINTMENT_DATE)?;
        Ok(())
    }

    /// 전체 설정 읽기
    pub fn load(&self) -> RepositoryResult<AppSettings> {
        let office_name = self
            .repo
            .get(KEY_OFFICE_NAME)?
            .unwrap_or_else(|| DEFAULT_OFFICE_NAME.to_string());

        let year_raw = self
            .repo
            .get(KEY_TRANSFER_YEAR)?
            .unwrap_or_else(|| DEFAULT_TRANSFER_YEAR.to_string());
        let transfer_year = year_raw
            .parse::<i32>()
            .map_err(|_| RepositoryError::FieldValueError {
                field: KEY_TRANSFER_YEAR.to_string(),
                message: format!("연도 형식 오류: {}", year_raw),
            })?;

        let school_level = self
            .repo
            .get(KEY_SCHOOL_LEVEL)?
            .unwrap_or_else(|| DEFAULT_SCHOOL_LEVEL.to_string());

        let date_raw = self
            .repo
            .get(KEY_APPOINTMENT_DATE)?
            .unwrap_or_else(|| DEFAULT_APPOINTMENT_DATE.to_string());
        let appointment_date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").map_err(|_| {
            RepositoryError::FieldValueError {
                field: KEY_APPOINTMENT_DATE.to_string(),
                message: format!("날짜 형식 오류: {}", date_raw),
            }
        })?;

        let special_bonus_district = self
            .repo
            .get(KEY_SPECIAL_BONUS_DISTRICT)?
            .filter(|v| !v.trim().is_empty());

        Ok(AppSettings {
            office_name,
            transfer_year,
            school_level,
            appointment_date,
            special_bonus_district,
        })
    }

    /// 단건 설정 변경
    pub fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.repo.set(key, value)
    }
}
