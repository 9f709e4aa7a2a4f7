use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use serde::Serialize;
use serde_json::{Map, Value};

pub fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Flattens tool parameters back into the JSON argument object the
/// dispatcher validates.
pub fn to_arguments(params: &impl Serialize) -> Result<Map<String, Value>, ErrorData> {
    match serde_json::to_value(params) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => Err(mcp_err(
            ErrorCode::INTERNAL_ERROR,
            format!("tool parameters must encode as an object, got {other}"),
        )),
        Err(err) => Err(mcp_err(ErrorCode::INTERNAL_ERROR, err.to_string())),
    }
}

pub fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}
