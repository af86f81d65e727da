//! Bearer credential decoding and session state.
//!
//! The credential is an opaque three-segment token; the middle segment
//! carries the claims. We decode it without verifying the signature --
//! the backend is the real authority and rejects bad tokens on its own.

use base64::Engine;

/// Extract the acting user's id from a bearer credential.
///
/// Returns `None` for an absent or malformed credential. This is
/// deliberately lenient: callers treat `None` as anonymous rather than
/// as an error.
pub fn resolve_user_id(credential: &str) -> Option<String> {
    let claims = credential.split('.').nth(1)?;
    let decoded = decode_segment(claims)?;
    let claims: serde_json::Value = serde_json::from_slice(&decoded).ok()?;

    // The backend issues the id under "id"; newer tokens use "userId".
    let id = claims.get("userId").or_else(|| claims.get("id"))?;
    match id {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(trimmed))
        .ok()
}

/// Process-wide session value, injected into components instead of read
/// from ambient storage so tests stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    user_id: Option<String>,
}

impl Session {
    /// A session with no credential.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Load a session from a bearer credential. A credential whose user
    /// id cannot be resolved still carries the token (the server decides
    /// whether to honor it) but counts as anonymous locally.
    pub fn load(token: impl Into<String>) -> Self {
        let token = token.into();
        let user_id = resolve_user_id(&token);
        Self {
            token: Some(token),
            user_id,
        }
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user_id = None;
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn token_with_claims(claims: &serde_json::Value) -> String {
        let header = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(claims).unwrap());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn resolves_user_id_claim() {
        let token = token_with_claims(&serde_json::json!({"userId": "u42"}));
        assert_eq!(resolve_user_id(&token), Some("u42".to_string()));
    }

    #[test]
    fn falls_back_to_id_claim() {
        let token = token_with_claims(&serde_json::json!({"id": "u7", "iat": 1}));
        assert_eq!(resolve_user_id(&token), Some("u7".to_string()));
    }

    #[test]
    fn numeric_id_is_stringified() {
        let token = token_with_claims(&serde_json::json!({"id": 1234}));
        assert_eq!(resolve_user_id(&token), Some("1234".to_string()));
    }

    #[test]
    fn malformed_credential_is_anonymous() {
        assert_eq!(resolve_user_id(""), None);
        assert_eq!(resolve_user_id("not-a-token"), None);
        assert_eq!(resolve_user_id("a.!!!not-base64!!!.c"), None);
        assert_eq!(resolve_user_id("a.aGVsbG8.c"), None); // decodes but not JSON
    }

    #[test]
    fn padded_segment_is_tolerated() {
        let payload =
            base64::engine::general_purpose::STANDARD.encode(br#"{"userId":"u999"}"#);
        assert!(payload.ends_with('='));
        let token = format!("h.{}.s", payload);
        assert_eq!(resolve_user_id(&token), Some("u999".to_string()));
    }

    #[test]
    fn session_lifecycle() {
        let token = token_with_claims(&serde_json::json!({"userId": "u1"}));
        let mut session = Session::load(token);
        assert!(session.is_authenticated());
        assert_eq!(session.user_id(), Some("u1"));
        assert!(session.bearer_token().is_some());

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn unresolvable_token_keeps_bearer_but_is_anonymous() {
        let session = Session::load("garbage");
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer_token(), Some("garbage"));
    }
}
