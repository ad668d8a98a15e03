//! Request Deadline
//!
//! Wraps any transport so a call that has not answered within the configured
//! timeout fails with `ApiError::Transport`. Works the same under wasm32,
//! where the fetch backend has no timeout of its own.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{ApiRequest, ApiResponse, Transport};
use crate::error::{ApiError, ApiResult};

pub struct TimeoutTransport {
    inner: Arc<dyn Transport>,
    timeout: Duration,
}

impl TimeoutTransport {
    pub fn new(inner: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait(?Send)]
impl Transport for TimeoutTransport {
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> ApiResult<ApiResponse> {
        tokio::select! {
            result = self.inner.execute(request, bearer) => result,
            _ = sleep(self.timeout) => {
                log::error!("{} timed out after {:?}", request.describe(), self.timeout);
                Err(ApiError::Transport(format!("timeout after {} ms", self.timeout.as_millis())))
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(millis).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}
