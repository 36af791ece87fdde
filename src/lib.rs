//! rproxy_middleware는 리버스 프록시의 HTTP 미들웨어 파이프라인입니다.
//!
//! # 주요 기능
//!
//! - 라우트별 미들웨어 체인 구성
//! - Location 헤더 재작성 (정규식 치환)
//! - Docker 라벨 / TOML 기반 미들웨어 설정
//!
//! # 예제
//!
//! ```
//! use rproxy_middleware::middleware::location::{LocationRewriteConfig, RewriteRule};
//! use hyper::header::{HeaderValue, LOCATION};
//! use hyper::HeaderMap;
//!
//! let config = LocationRewriteConfig {
//!     location_regex: "(.*)/foo".to_string(),
//!     location_replacement: "$1/bar".to_string(),
//! };
//!
//! // 라우트 설정 시점에 한 번 생성
//! let rule = RewriteRule::from_config(&config).unwrap();
//!
//! // 응답마다 헤더 셋에 적용
//! let mut headers = HeaderMap::new();
//! headers.insert(LOCATION, HeaderValue::from_static("http://example.com/foo"));
//! rule.apply(&mut headers);
//!
//! assert_eq!(headers.get(LOCATION).unwrap(), "http://example.com/bar");
//! assert_eq!(
//!     headers.get("x-replaced-location").unwrap(),
//!     "http://example.com/foo"
//! );
//! ```

pub mod logging;
pub mod middleware;
