//! OCR 요청/응답 DTO

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_language_code;

/// OCR 요청
///
/// 이미지는 base64 문자열로 전달합니다. 디코딩과 크기 제한은 OCR 서비스가 검사합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OcrRequest {
    #[validate(length(min = 1, message = "이미지 데이터가 필요합니다"))]
    pub image_base64: String,

    /// 인식 언어 힌트 (선택)
    #[serde(default)]
    #[validate(custom(function = "validate_language_code"))]
    pub language: Option<String>,
}

/// 인식된 텍스트 영역
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrRegion {
    pub text: String,
    /// `[x, y, width, height]` (픽셀)
    pub bounding_box: [f32; 4],
    pub confidence: f32,
}

/// OCR 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResponse {
    /// 영역 텍스트를 줄 단위로 이어 붙인 전체 텍스트
    pub text: String,
    pub regions: Vec<OcrRegion>,
}

impl OcrResponse {
    pub fn from_regions(regions: Vec<OcrRegion>) -> Self {
        let text = regions
            .iter()
            .map(|region| region.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Self { text, regions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_regions_joins_lines() {
        let regions = vec![
            OcrRegion {
                text: "第一話".into(),
                bounding_box: [0.0, 0.0, 10.0, 10.0],
                confidence: 0.9,
            },
            OcrRegion {
                text: "始まり".into(),
                bounding_box: [0.0, 12.0, 10.0, 10.0],
                confidence: 0.8,
            },
        ];

        let response = OcrResponse::from_regions(regions);
        assert_eq!(response.text, "第一話\n始まり");
        assert_eq!(response.regions.len(), 2);
    }

    #[test]
    fn test_language_hint_is_optional() {
        let request: OcrRequest = serde_json::from_str(r#"{"image_base64":"aGk="}"#).unwrap();
        assert!(request.language.is_none());
        assert!(request.validate().is_ok());
    }
}
