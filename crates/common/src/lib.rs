//! Shared building blocks for the aviso services: logging setup, startup
//! environment checks and small response types reused across crates.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn status_message_serializes_flat() {
        let v = serde_json::to_value(types::StatusMessage::new("Token válido.")).unwrap();
        assert_eq!(v, serde_json::json!({"success": true, "message": "Token válido."}));
    }
}
