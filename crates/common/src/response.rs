//! 统一的 JSON 响应信封：`{success, message?, data?, error?, count?}`
//!
//! 所有 HTTP 端点（包括错误路径）都返回这一形状，HTTP 状态码单独表达结果类别。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 列表类响应附带的条目数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, message: None, data: Some(data), error: None, count: None }
    }

    pub fn ok_with_message(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: Some(message.into()), data: Some(data), error: None, count: None }
    }
}

impl<T> ApiEnvelope<Vec<T>> {
    /// 列表响应，`count` 取自数据长度
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self { success: true, message: None, data: Some(items), error: None, count: Some(count) }
    }
}

impl ApiEnvelope<()> {
    /// Success without payload, e.g. logout.
    pub fn message(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()), data: None, error: None, count: None }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self { success: false, message: Some(message.into()), data: None, error, count: None }
    }
}
