// Output formatting: terminal messages, exit codes, JSON envelopes

use std::io::IsTerminal;

use crate::error::{ErrorKind, GraphError};

// Colors for terminal output (when supported)
pub const RED: &str = "\x1b[0;31m";
pub const GREEN: &str = "\x1b[0;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const BOLD: &str = "\x1b[1m";
pub const NC: &str = "\x1b[0m"; // No Color

/// Check if stdout is a terminal (for color output)
#[inline]
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Check if stderr is a terminal
#[inline]
fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Print info message
pub fn info(msg: &str) {
    let color = if is_terminal() { GREEN } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}[INFO]{} {}", color, reset, msg);
}

/// Print warning message
pub fn warn(msg: &str) {
    let color = if stderr_is_terminal() { YELLOW } else { "" };
    let reset = if stderr_is_terminal() { NC } else { "" };
    eprintln!("{}[WARN]{} {}", color, reset, msg);
}

/// Print error message
pub fn error(msg: &str) {
    let color = if stderr_is_terminal() { RED } else { "" };
    let reset = if stderr_is_terminal() { NC } else { "" };
    eprintln!("{}[ERROR]{} {}", color, reset, msg);
}

/// Print section header
pub fn header(msg: &str) {
    let bold = if is_terminal() { BOLD } else { "" };
    let reset = if is_terminal() { NC } else { "" };
    println!("{}===>{} {}", bold, reset, msg);
    println!();
}

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_FILE_NOT_FOUND: i32 = 4;
pub const EXIT_VALIDATION: i32 = 5;
pub const EXIT_TOO_LARGE: i32 = 7;

/// Exit code for a failed command
///
/// Graph errors anywhere in the chain decide the code; a missing input file
/// maps to [`EXIT_FILE_NOT_FOUND`]; anything else is [`EXIT_ERROR`].
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(graph_err) = err.downcast_ref::<GraphError>() {
        return match graph_err.kind() {
            ErrorKind::InvalidGraph | ErrorKind::ProbabilityOutOfRange => EXIT_VALIDATION,
            ErrorKind::ComputationTooLarge => EXIT_TOO_LARGE,
        };
    }
    let not_found = err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .map(|io| io.kind() == std::io::ErrorKind::NotFound)
            .unwrap_or(false)
    });
    if not_found {
        EXIT_FILE_NOT_FOUND
    } else {
        EXIT_ERROR
    }
}

// ============================================================================
// Error Codes and Remediation
// ============================================================================

/// Error codes for non-graph failures in JSON error responses
pub const E_INPUT_NOT_FOUND: &str = "INPUT_NOT_FOUND";
pub const E_INVALID_INPUT: &str = "INVALID_INPUT";

/// Common remediation messages
pub const R_HINT_MAX_EDGES: &str = "Use --max-edges N (or NETSTAB_MAX_EDGES) to raise the enumeration bound, or narrow the graph with --node/--edge";
pub const R_HINT_GRAPH_FILE: &str = "Pass --graph FILE, set NETSTAB_GRAPH, or use --graph - to read stdin";
pub const R_HINT_FIX_GRAPH: &str = "Every edge must join listed nodes with a successChance in [0, 1]";

/// JSON output wrapper
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonResponse<T> {
    pub schema_version: String,
    pub execution_id: String,
    pub tool: String,
    pub timestamp: String,
    pub data: T,
}

impl<T: serde::Serialize> JsonResponse<T> {
    pub fn new(data: T) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = chrono::Utc::now().to_rfc3339();
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let exec_id = format!("{:x}-{}", secs, std::process::id());

        JsonResponse {
            schema_version: "1.0.0".to_string(),
            execution_id: exec_id,
            tool: "netstab".to_string(),
            timestamp,
            data,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Error response format for JSON mode
#[derive(Debug, Clone, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl JsonError {
    pub fn new(category: &str, message: &str, code: &str) -> Self {
        JsonError {
            error: category.to_string(),
            message: message.to_string(),
            code: code.to_string(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, remediation: &str) -> Self {
        self.remediation = Some(remediation.to_string());
        self
    }

    /// Error response for a validation or size failure
    pub fn graph(err: &GraphError) -> Self {
        let json = Self::new(err.kind().as_str(), &err.to_string(), err.code());
        match err.kind() {
            ErrorKind::ComputationTooLarge => json.with_remediation(R_HINT_MAX_EDGES),
            ErrorKind::InvalidGraph | ErrorKind::ProbabilityOutOfRange => {
                json.with_remediation(R_HINT_FIX_GRAPH)
            }
        }
    }

    /// Error response for any command failure
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        if let Some(graph_err) = err.downcast_ref::<GraphError>() {
            return Self::graph(graph_err);
        }
        let message = format!("{:#}", err);
        if exit_code_for(err) == EXIT_FILE_NOT_FOUND {
            Self::new("InputNotFound", &message, E_INPUT_NOT_FOUND).with_remediation(R_HINT_GRAPH_FILE)
        } else {
            Self::new("InvalidInput", &message, E_INVALID_INPUT)
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
