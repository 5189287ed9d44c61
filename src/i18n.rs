// ==========================================
// 국제화 (i18n) 모듈
// ==========================================
// rust-i18n 라이브러리 사용
// 한국어(기본)와 영어 지원
// ==========================================
// 주의: rust_i18n::i18n! 매크로는 lib.rs 에서 초기화됨
// ==========================================

/// 현재 언어 조회
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 언어 설정
///
/// # 파라미터
/// - locale: 언어 코드 ("ko" 또는 "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 메시지 번역 (파라미터 없음)
///
/// # 예시
/// ```no_run
/// use teacher_transfer::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 메시지 번역 (파라미터 포함)
///
/// # 예시
/// ```no_run
/// use teacher_transfer::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/test.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 의 locale 은 전역 상태이고 Rust 테스트는 기본 병렬 실행;
    // 테스트 간 간섭을 막기 위해 i18n 테스트를 직렬화한다.
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        assert_eq!(current_locale(), "ko");
    }

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        assert_eq!(current_locale(), "ko");

        set_locale("en");
        assert_eq!(current_locale(), "en");

        // 기본 언어 복원
        set_locale("ko");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let msg = t("common.success");
        assert_eq!(msg, "처리 완료");

        set_locale("en");
        let msg = t("common.success");
        assert_eq!(msg, "Operation successful");

        // 기본 언어 복원
        set_locale("ko");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("ko");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/test.csv")]);
        assert!(msg.contains("/tmp/test.csv"));
        assert!(msg.contains("파일을 찾을 수 없습니다"));

        set_locale("en");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/test.csv")]);
        assert!(msg.contains("/tmp/test.csv"));
        assert!(msg.contains("File not found"));

        // 기본 언어 복원
        set_locale("ko");
    }
}
