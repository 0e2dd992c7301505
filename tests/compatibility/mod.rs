//! Stored-value compatibility vectors
//!
//! Texts below are what the mobile client persisted for each key. Values
//! written by this crate must read back the same way, and values already on
//! disk must stay readable.

use serde::{Deserialize, Serialize};

/// A stored text and the JSON value it must decode to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVector {
    pub name: String,
    pub key: String,
    pub stored_text: String,
    pub expected: serde_json::Value,
}

pub fn stored_vectors() -> Vec<StoredVector> {
    vec![
        StoredVector {
            name: "plain_token".to_string(),
            key: "auth_token".to_string(),
            stored_text: r#""abc123""#.to_string(),
            expected: serde_json::json!("abc123"),
        },
        StoredVector {
            name: "jwt_token".to_string(),
            key: "auth_token".to_string(),
            stored_text: r#""eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIn0.c2ln""#.to_string(),
            expected: serde_json::json!("eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxIn0.c2ln"),
        },
        StoredVector {
            name: "user_profile".to_string(),
            key: "user_data".to_string(),
            stored_text: r#"{"id":1,"name":"x"}"#.to_string(),
            expected: serde_json::json!({"id": 1, "name": "x"}),
        },
        StoredVector {
            name: "escaped_unicode".to_string(),
            key: "user_data".to_string(),
            stored_text: r#"{"id":2,"name":"Renée 😀"}"#.to_string(),
            expected: serde_json::json!({"id": 2, "name": "Renée 😀"}),
        },
        StoredVector {
            name: "nested_settings".to_string(),
            key: "app_settings".to_string(),
            stored_text: r#"{"theme":"dark","notifications":{"push":true,"email":false},"fontScale":1.5,"recent":[]}"#
                .to_string(),
            expected: serde_json::json!({
                "theme": "dark",
                "notifications": {"push": true, "email": false},
                "fontScale": 1.5,
                "recent": []
            }),
        },
        StoredVector {
            name: "null_settings".to_string(),
            key: "app_settings".to_string(),
            stored_text: "null".to_string(),
            expected: serde_json::Value::Null,
        },
    ]
}
