use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schemas::{ExecutionLogEntry, TokenUsage};

/// Final outcome of a buffered run. Always carries a response, even when the
/// run degraded on a provider failure or the iteration ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub response: String,
    pub execution_log: Vec<ExecutionLogEntry>,
    /// State accumulated from tool `state_updates`, shallow-merged in call
    /// order.
    pub state: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}
