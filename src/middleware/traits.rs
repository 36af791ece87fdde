use super::{MiddlewareError, Request, Response};
use async_trait::async_trait;

/// 미들웨어 트레이트
///
/// HTTP 요청과 응답을 수정할 수 있는 인터페이스를 정의합니다.
/// 기본 구현은 통과이므로 한쪽 방향만 다루는 미들웨어는 그 방향만
/// 재정의하면 됩니다.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// 미들웨어의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// HTTP 요청을 처리합니다.
    async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        Ok(req)
    }

    /// HTTP 응답을 처리합니다.
    async fn handle_response(&self, res: Response) -> Result<Response, MiddlewareError> {
        Ok(res)
    }
}
