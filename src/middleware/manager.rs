use super::config::MiddlewareType;
use super::{Middleware, MiddlewareChain, MiddlewareConfig, MiddlewareError, Request, Response};
use crate::middleware::location::{LocationRewriteConfig, LocationRewriteMiddleware};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use tracing::error;

/// 미들웨어 설정으로부터 미들웨어 인스턴스를 생성합니다.
///
/// `Ok(None)`은 해당 설정으로는 설치할 것이 없다는 의미입니다.
/// (예: location-rewrite 설정이 비어 있는 경우)
fn create_middleware(
    config: &MiddlewareConfig,
) -> Result<Option<Arc<dyn Middleware>>, MiddlewareError> {
    debug!("미들웨어 생성 시작: type={:?}, settings={:?}", config.middleware_type, config.settings);

    match config.middleware_type {
        MiddlewareType::LocationRewrite => {
            let string_settings: HashMap<String, String> = config.settings.iter()
                .map(|(k, v)| {
                    let string_value = v.as_str()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| v.to_string());
                    (k.clone(), string_value)
                })
                .collect();

            let rewrite_config = LocationRewriteConfig::from_flat_map(&string_settings);
            debug!("생성된 Location 재작성 설정: {:?}", rewrite_config);

            Ok(LocationRewriteMiddleware::from_config(&rewrite_config)
                .map(|middleware| Arc::new(middleware) as Arc<dyn Middleware>))
        }
    }
}

#[derive(Default, Clone)]
pub struct MiddlewareManager {
    chain: MiddlewareChain,
}

impl MiddlewareManager {
    pub fn new(middleware_configs: &HashMap<String, MiddlewareConfig>) -> Self {
        let mut manager = Self::default();
        let configs: Vec<_> = middleware_configs.iter()
            .map(|(name, config)| (name.clone(), config.clone()))
            .collect();
        manager.update_configs(&configs);
        manager
    }

    pub async fn handle_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        self.chain.handle_request(req).await
    }

    pub async fn handle_response(&self, res: Response) -> Result<Response, MiddlewareError> {
        self.chain.handle_response(res).await
    }

    pub fn update_configs(&mut self, configs: &[(String, MiddlewareConfig)]) {
        let mut chain = MiddlewareChain::new();

        // 정렬을 위해 Vec으로 변환
        let mut ordered_configs: Vec<_> = configs.iter()
            .filter(|(_, config)| config.enabled)
            .collect();
        ordered_configs.sort_by_key(|(_, config)| config.order);

        // 미들웨어 생성 및 체인에 추가
        for (name, config) in ordered_configs {
            match create_middleware(config) {
                Ok(Some(middleware)) => {
                    debug!("미들웨어 {} 추가: {}", name, middleware.name());
                    chain.add_shared(middleware);
                }
                Ok(None) => {
                    debug!("미들웨어 {} 설정이 비어 있어 설치를 건너뜁니다", name);
                }
                Err(e) => {
                    error!("미들웨어 {} 생성 실패: {}", name, e);
                    continue;
                }
            }
        }

        self.chain = chain;
    }
}
