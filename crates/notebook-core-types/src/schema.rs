//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Interpreter identifiers
pub const FIELD_INTERPRETER_KEY: &str = "interpreter_key";
pub const FIELD_FAMILY: &str = "family";
pub const FIELD_CONFIG_PATH: &str = "config_path";

// Collection sizes
pub const FIELD_RESOLVED_LEN: &str = "resolved_len";
pub const FIELD_EXPLICIT_LEN: &str = "explicit_len";
pub const FIELD_ENABLED_MODULES_LEN: &str = "enabled_modules_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Operation names
pub const OP_RESOLVE_INTERPRETERS: &str = "resolve_interpreters";
pub const OP_INVALIDATE_INTERPRETERS: &str = "invalidate_interpreters";
pub const OP_LOAD_CONFIG: &str = "load_config";
pub const OP_STORE_CONFIG: &str = "store_config";
