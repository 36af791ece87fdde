use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Location 재작성 설정
///
/// # Docker 라벨 예시
///
/// ```yaml
/// labels:
///   - "rproxy.http.middlewares.my-rewrite.type=location-rewrite"
///   - "rproxy.http.middlewares.my-rewrite.locationRewrite.regex=http://internal:8080/(.*)"
///   - "rproxy.http.middlewares.my-rewrite.locationRewrite.replacement=https://example.com/$1"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocationRewriteConfig {
    /// Location 값에 적용할 정규식 패턴
    #[serde(default)]
    pub location_regex: String,

    /// 치환 템플릿 ($1 형태의 캡처 그룹 참조 허용)
    #[serde(default)]
    pub location_replacement: String,
}

impl LocationRewriteConfig {
    /// 패턴과 치환 템플릿이 모두 비어 있으면 기능이 정의되지 않은 것으로 본다.
    pub fn is_rewrite_defined(&self) -> bool {
        !self.location_regex.trim().is_empty()
            || !self.location_replacement.trim().is_empty()
    }

    /// Docker 라벨에서 설정을 파싱
    pub fn from_labels(labels: &HashMap<String, String>, name: &str) -> Self {
        let prefix = format!("rproxy.http.middlewares.{}.locationRewrite.", name);

        let mut config = Self::default();

        if let Some(regex) = labels.get(&format!("{}{}", prefix, "regex")) {
            config.location_regex = regex.clone();
        }

        if let Some(replacement) = labels.get(&format!("{}{}", prefix, "replacement")) {
            config.location_replacement = replacement.clone();
        }

        config
    }

    /// `MiddlewareConfig.settings`가 넘겨주는 평탄화된 맵에서 설정을 파싱
    pub fn from_flat_map(settings: &HashMap<String, String>) -> Self {
        let mut config = Self::default();

        for (key, value) in settings {
            match key.as_str() {
                "locationRewrite.regex" => config.location_regex = value.clone(),
                "locationRewrite.replacement" => config.location_replacement = value.clone(),
                _ => continue,
            }
        }

        config
    }

    /// TOML 설정에서 파싱
    pub fn from_toml(config: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(config)
    }
}
