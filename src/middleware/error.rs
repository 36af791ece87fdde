
#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("잘못된 설정 형식: {0}")]
    InvalidFormat(String),

    #[error("미들웨어 {middleware} 실행 실패: {message}")]
    Execution {
        middleware: String,
        message: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
