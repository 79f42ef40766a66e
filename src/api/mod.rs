//! HTTP surface: handlers and DTOs.

pub mod dto;
pub mod handlers;

#[cfg(test)]
pub mod test_support {
    //! Shared fixtures for handler tests: mock-backed state and a layer
    //! injecting a fixed peer address (axum's ConnectInfo extractor
    //! otherwise requires a real connected socket).

    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::task::{Context, Poll};

    use axum::extract::ConnectInfo;
    use tokio::sync::mpsc;

    use crate::application::{RedirectService, ShortenerService, TrackingService};
    use crate::domain::click_message::ClickMessage;
    use crate::domain::repositories::{MockClickRepository, MockMappingRepository};
    use crate::state::AppState;

    pub fn test_state(
        mappings: MockMappingRepository,
        clicks: MockClickRepository,
    ) -> (AppState, mpsc::Receiver<ClickMessage>) {
        let mappings = Arc::new(mappings);
        let clicks = Arc::new(clicks);
        let (tx, rx) = mpsc::channel(16);

        let state = AppState::new(
            Arc::new(ShortenerService::new(mappings.clone())),
            Arc::new(RedirectService::new(mappings)),
            Arc::new(TrackingService::new(clicks)),
            tx,
            "http://short.test".to_string(),
        );

        (state, rx)
    }

    #[derive(Clone)]
    pub struct ConnectInfoLayer;

    impl<S> tower::Layer<S> for ConnectInfoLayer {
        type Service = ConnectInfoService<S>;

        fn layer(&self, inner: S) -> Self::Service {
            ConnectInfoService { inner }
        }
    }

    #[derive(Clone)]
    pub struct ConnectInfoService<S> {
        inner: S,
    }

    impl<S, B> tower::Service<axum::http::Request<B>> for ConnectInfoService<S>
    where
        S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
        S::Future: Send + 'static,
        B: Send + 'static,
    {
        type Response = S::Response;
        type Error = S::Error;
        type Future = S::Future;

        fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            self.inner.poll_ready(cx)
        }

        fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
            let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
            self.inner.call(req)
        }
    }
}
