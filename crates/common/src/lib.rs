pub mod types;
pub mod utils;

/// Body returned by `GET /`.
pub const GREETING: &str = "yay !!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn greeting_serializes_as_json_string() {
        let s = serde_json::to_string(GREETING).unwrap();
        assert_eq!(s, "\"yay !!\"");
    }
}
