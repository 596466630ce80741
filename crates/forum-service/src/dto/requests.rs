//! Request DTOs for API endpoints

use serde::Deserialize;

/// Vote submission body
///
/// `sign` stays a raw integer so out-of-range values reach the engine and are
/// rejected as `INVALID_SIGN` rather than as a JSON shape error.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SubmitReactionRequest {
    pub sign: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_any_integer_sign() {
        let req: SubmitReactionRequest = serde_json::from_str(r#"{"sign": 7}"#).unwrap();
        assert_eq!(req.sign, 7);
    }

    #[test]
    fn test_accepts_sign_beyond_32_bits() {
        let req: SubmitReactionRequest = serde_json::from_str(r#"{"sign": 4294967297}"#).unwrap();
        assert_eq!(req.sign, 4_294_967_297);
    }

    #[test]
    fn test_rejects_missing_sign() {
        assert!(serde_json::from_str::<SubmitReactionRequest>("{}").is_err());
    }
}
