//! Notices
//!
//! Transient messages shown as toasts. The UI assigns ids and dismisses
//! them after [`Notice::ttl_ms`].

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast toast-success",
            NoticeKind::Error => "toast toast-error",
            NoticeKind::Info => "toast toast-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    /// Error notice for a failed call: server text, the 403 text, or `fallback`
    pub fn from_error(err: &ApiError, fallback: &str) -> Self {
        Self::error(err.user_message(fallback))
    }

    pub fn with_id(self, id: u64) -> Self {
        Self { id, ..self }
    }

    /// Errors stay up longer
    pub fn ttl_ms(&self) -> u32 {
        match self.kind {
            NoticeKind::Error => 5000,
            _ => 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_error_texts() {
        let forbidden = ApiError::from_status(403, &json!({}));
        let notice = Notice::from_error(&forbidden, "Gagal menghapus pasien");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, crate::error::FORBIDDEN_FALLBACK);

        let server = ApiError::from_status(422, &json!({"message": "MRN sudah terdaftar"}));
        assert_eq!(Notice::from_error(&server, "Gagal membuat pasien").message, "MRN sudah terdaftar");

        let offline = ApiError::Transport("connection refused".into());
        assert_eq!(Notice::from_error(&offline, "Gagal memuat pasien").message, "Gagal memuat pasien");
    }

    #[test]
    fn test_ttl_and_id() {
        let notice = Notice::success("Login berhasil!").with_id(7);
        assert_eq!(notice.id, 7);
        assert_eq!(notice.ttl_ms(), 3000);
        assert_eq!(Notice::error("x").ttl_ms(), 5000);
    }
}
