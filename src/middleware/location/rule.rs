use super::config::LocationRewriteConfig;
use hyper::header::{HeaderName, HeaderValue, LOCATION};
use hyper::HeaderMap;
use regex_lite as regex;
use tracing::error;

/// 원본 Location 값을 보존하는 헤더 이름
pub const REPLACED_LOCATION_HEADER: &str = "x-replaced-location";

/// 한 라우트의 Location 재작성 규칙
///
/// 라우트 설정 시점에 한 번 만들어져 불변으로 공유됩니다. 컴파일된
/// `Regex`는 `&self` 매칭만 하므로 동시 호출에 별도 동기화가 필요 없습니다.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    regex: Option<regex::Regex>,
    replacement: String,
}

impl RewriteRule {
    /// 패턴을 컴파일해 규칙을 만듭니다.
    ///
    /// 패턴 컴파일에 실패하면 에러 로그만 남기고 패턴 없는 규칙을
    /// 돌려줍니다. 그런 규칙은 비활성 상태로 남아 아무것도 바꾸지 않습니다.
    pub fn new(pattern: &str, replacement: &str) -> Self {
        let pattern = pattern.trim();
        let regex = match regex::Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                error!(pattern = %pattern, error = %e, "Location 정규식 컴파일 실패");
                None
            }
        };

        Self {
            regex,
            replacement: replacement.trim().to_string(),
        }
    }

    /// 설정에서 규칙을 생성합니다.
    ///
    /// 패턴과 치환 템플릿이 모두 비어 있으면 `None`을 돌려주며, 호출자는
    /// 이 미들웨어 단계를 설치하지 않아야 합니다.
    pub fn from_config(config: &LocationRewriteConfig) -> Option<Self> {
        if !config.is_rewrite_defined() {
            return None;
        }
        Some(Self::new(&config.location_regex, &config.location_replacement))
    }

    /// 패턴이 있고 치환 템플릿이 비어 있지 않을 때만 활성
    pub fn is_active(&self) -> bool {
        self.regex.is_some() && !self.replacement.is_empty()
    }

    /// 응답 헤더 셋에 규칙을 적용합니다.
    ///
    /// 비활성 규칙이거나 Location 헤더가 없으면 헤더 셋을 건드리지
    /// 않습니다. 재작성이 일어나면 (치환 결과가 원본과 같더라도) 원본
    /// 값을 `X-Replaced-Location`에 보존합니다. 이 연산은 절대 실패하지
    /// 않습니다.
    pub fn apply(&self, headers: &mut HeaderMap) {
        let regex = match &self.regex {
            Some(regex) if !self.replacement.is_empty() => regex,
            _ => return,
        };

        let original = match headers.get(LOCATION) {
            Some(value) => value.clone(),
            None => return,
        };

        // 문자열로 다룰 수 없는 값은 재작성 대상이 아니다
        let location = match original.to_str() {
            Ok(value) if !value.is_empty() => value,
            _ => return,
        };

        let rewritten = regex.replace_all(location, self.replacement.as_str());

        // 치환 결과가 헤더 값으로 표현 불가능하면 원본을 그대로 둔다
        let rewritten = match HeaderValue::from_str(&rewritten) {
            Ok(value) => value,
            Err(_) => return,
        };

        headers.insert(LOCATION, rewritten);
        headers.insert(
            HeaderName::from_static(REPLACED_LOCATION_HEADER),
            original,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_location(location: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, HeaderValue::from_str(location).unwrap());
        headers
    }

    #[test]
    fn test_single_replacement() {
        let rule = RewriteRule::new("(.*)/foo", "$1/bar");
        let mut headers = headers_with_location("http://example.com/foo");

        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "http://example.com/bar");
        assert_eq!(
            headers.get(REPLACED_LOCATION_HEADER).unwrap(),
            "http://example.com/foo"
        );
    }

    #[test]
    fn test_scheme_replacement() {
        let rule = RewriteRule::new("http://(.*)", "https://$1");
        let mut headers = headers_with_location("http://example.com/foo");

        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "https://example.com/foo");
    }

    #[test]
    fn test_pattern_trimmed_before_compile() {
        let rule = RewriteRule::new("  http://(.*)  ", "https://$1");
        let mut headers = headers_with_location("http://example.com/foo");

        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "https://example.com/foo");
    }

    #[test]
    fn test_replace_all_semantics() {
        let rule = RewriteRule::new("8080", "80");
        let mut headers = headers_with_location("http://a:8080/b/8080");

        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "http://a:80/b/80");
    }

    #[test]
    fn test_no_match_keeps_value_but_records_original() {
        let rule = RewriteRule::new("https://(.*)", "http://$1");
        let mut headers = headers_with_location("http://example.com/foo");

        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "http://example.com/foo");
        assert_eq!(
            headers.get(REPLACED_LOCATION_HEADER).unwrap(),
            "http://example.com/foo"
        );
    }

    #[test]
    fn test_empty_replacement_is_inactive() {
        let rule = RewriteRule::new("(.*)/foo", "");
        assert!(!rule.is_active());

        let mut headers = headers_with_location("http://example.com/foo");
        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "http://example.com/foo");
        assert!(headers.get(REPLACED_LOCATION_HEADER).is_none());
    }

    #[test]
    fn test_invalid_pattern_is_inactive() {
        let rule = RewriteRule::new("(", "$1/bar");
        assert!(!rule.is_active());

        let mut headers = headers_with_location("http://example.com/foo");
        rule.apply(&mut headers);

        assert_eq!(headers.get(LOCATION).unwrap(), "http://example.com/foo");
        assert!(headers.get(REPLACED_LOCATION_HEADER).is_none());
    }

    #[test]
    fn test_missing_location_untouched() {
        let rule = RewriteRule::new("(.*)/foo", "$1/bar");
        let mut headers = HeaderMap::new();

        rule.apply(&mut headers);

        assert!(headers.is_empty());
    }

    #[test]
    fn test_from_config_empty_is_absent() {
        let config = LocationRewriteConfig::default();
        assert!(RewriteRule::from_config(&config).is_none());
    }

    #[test]
    fn test_from_config_defined() {
        let config = LocationRewriteConfig {
            location_regex: "(.*)/foo".to_string(),
            location_replacement: " $1/bar ".to_string(),
        };

        let rule = RewriteRule::from_config(&config).unwrap();
        assert!(rule.is_active());

        // 치환 템플릿 앞뒤 공백은 제거된다
        let mut headers = headers_with_location("http://example.com/foo");
        rule.apply(&mut headers);
        assert_eq!(headers.get(LOCATION).unwrap(), "http://example.com/bar");
    }
}
