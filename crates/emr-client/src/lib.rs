//! EMR Client Core
//!
//! Everything the front end does that is not rendering:
//! - config: API base URL and timeout
//! - http: transport seam, request/response types, refresh-and-retry client
//! - session: authenticated user and token pair, persisted and observable
//! - authz: role/permission predicates
//! - services: thin wrappers over the REST endpoints
//! - forms, labels, format, view_state, routes: helpers the pages share

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod session;
pub mod storage;
pub mod authz;
pub mod services;
pub mod labels;
pub mod format;
pub mod forms;
pub mod view_state;
pub mod routes;
pub mod notice;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::{ApiClient, ApiRequest, ApiResponse, Method, ReqwestTransport, TimeoutTransport, Transport};
pub use session::{LoginOutcome, Session, SessionStore};
pub use storage::{MemoryStorage, SessionStorage, STORAGE_KEY};
pub use authz::ResourceKind;
pub use notice::{Notice, NoticeKind};
pub use routes::{Route, RouteDecision};
pub use view_state::{Pager, Panel, Submission, ViewState};
