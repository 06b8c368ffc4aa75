//! JSON request payloads.

use serde_json::{json, Value};

/// Valid user creation payload.
pub fn user() -> Value {
    json!({
        "email": "pilot@example.com",
        "name": "Pilot",
    })
}

/// User payload with one additional, undeclared property.
pub fn user_with_extra(key: &str, value: Value) -> Value {
    let mut payload = user();
    if let Value::Object(object) = &mut payload {
        object.insert(key.to_string(), value);
    }
    payload
}
