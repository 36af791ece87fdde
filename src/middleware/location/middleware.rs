use super::config::LocationRewriteConfig;
use super::rule::RewriteRule;
use crate::middleware::{Middleware, MiddlewareError, Response};
use async_trait::async_trait;

/// Location 헤더 재작성 미들웨어
///
/// 응답 경로에서만 동작하며 요청은 그대로 통과시킵니다.
pub struct LocationRewriteMiddleware {
    rule: RewriteRule,
}

impl LocationRewriteMiddleware {
    pub fn new(rule: RewriteRule) -> Self {
        Self { rule }
    }

    /// 설정에서 미들웨어를 생성합니다.
    ///
    /// 재작성 기능이 정의되지 않은 설정이면 `None`을 돌려주고, 호출자는
    /// 이 단계를 파이프라인에 설치하지 않습니다.
    pub fn from_config(config: &LocationRewriteConfig) -> Option<Self> {
        RewriteRule::from_config(config).map(Self::new)
    }
}

#[async_trait]
impl Middleware for LocationRewriteMiddleware {
    fn name(&self) -> &str {
        "location-rewrite"
    }

    async fn handle_response(&self, mut res: Response) -> Result<Response, MiddlewareError> {
        // 응답 전달을 중단시키지 않는다: apply는 실패하지 않는 연산이다
        self.rule.apply(res.headers_mut());
        Ok(res)
    }
}
