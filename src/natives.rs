use std::time::{SystemTime, UNIX_EPOCH};

use crate::value::Value;

/// Milliseconds since the Unix epoch. Installed as the `clock` global.
pub fn clock(_args: &[Value]) -> Value {
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    Value::Number(duration.as_millis() as f64)
}
