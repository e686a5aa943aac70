//! 服务错误类型定义
//!
//! 每个错误在检测到它的操作内直接映射为 HTTP 响应，响应体统一为 `{"erro": "..."}`。

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 服务错误类型
///
/// Display 输出即返回给调用方的 `erro` 文本
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 必填字段缺失或无法转换
    #[error("{0}")]
    Validation(String),

    /// 唯一键冲突
    #[error("{0}")]
    Conflict(String),

    /// 记录不存在
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// 返回错误码（仅用于日志）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(code = self.error_code(), error = %self, "请求失败");

        (status, axum::Json(json!({ "erro": self.to_string() }))).into_response()
    }
}

/// 请求体缺失或不是合法 JSON
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(format!(
            "Corpo da requisição inválido: {}",
            rejection.body_text()
        ))
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_error_variants() -> Vec<(ApiError, StatusCode, &'static str)> {
        vec![
            (ApiError::Validation("campo".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (ApiError::Conflict("cpf".into()), StatusCode::CONFLICT, "CONFLICT"),
            (ApiError::NotFound("cliente".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
        ]
    }

    #[test]
    fn test_all_variants_status_and_code() {
        for (error, expected_status, expected_code) in all_error_variants() {
            assert_eq!(error.status_code(), expected_status, "{expected_code}");
            assert_eq!(error.error_code(), expected_code);
        }
    }

    #[tokio::test]
    async fn test_into_response_body_structure() {
        let response = ApiError::NotFound("Cliente não encontrado.".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(body, json!({ "erro": "Cliente não encontrado." }));
    }

    #[test]
    fn test_display_is_client_message() {
        assert_eq!(
            ApiError::Conflict("CPF já cadastrado no sistema.".into()).to_string(),
            "CPF já cadastrado no sistema."
        );
    }
}
