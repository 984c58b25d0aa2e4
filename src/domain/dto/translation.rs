//! 번역 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_language_code;

fn default_source_lang() -> String {
    "auto".to_string()
}

/// 번역 요청
///
/// ```json
/// { "text": "こんにちは", "source_lang": "ja", "target_lang": "en" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TranslationRequest {
    /// 번역할 원문 (1-5000자)
    #[validate(length(min = 1, max = 5000, message = "원문은 1-5000자 사이여야 합니다"))]
    pub text: String,

    /// 원문 언어 코드, 생략 시 자동 감지(`auto`)
    #[serde(default = "default_source_lang")]
    #[validate(custom(function = "validate_language_code"))]
    pub source_lang: String,

    /// 대상 언어 코드
    #[validate(custom(function = "validate_language_code"))]
    pub target_lang: String,
}

/// 번역 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    /// 캐시에서 응답했는지 여부
    #[serde(default)]
    pub cached: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_lang_defaults_to_auto() {
        let request: TranslationRequest =
            serde_json::from_str(r#"{"text":"hola","target_lang":"en"}"#).unwrap();

        assert_eq!(request.source_lang, "auto");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let request = TranslationRequest {
            text: String::new(),
            source_lang: "ja".into(),
            target_lang: "en".into(),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("text"));
    }
}
