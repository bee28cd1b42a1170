//! Request authentication.
//!
//! Clients send `authorization: <base64(email)>`. A header that decodes to a
//! well-formed email resolves to that user, creating the user row on first
//! sight. Anything else resolves to an anonymous context; a bad header is
//! never an error.

pub mod middleware;
pub mod types;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::db::queries::users;
use crate::db::DbPool;
use crate::error::GatewayResult;

pub use types::RequestContext;

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);

/// Standard alphabet, padding optional, stray trailing bits tolerated.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// Same leniency over the URL-safe alphabet (`-` and `_`).
const LENIENT_BASE64_URL: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^
        [A-Za-z0-9!\#$%&'*+/=?^_`{|}~-]+
        (?:\.[A-Za-z0-9!\#$%&'*+/=?^_`{|}~-]+)*
        @
        (?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+
        [A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?
        $
        ",
    )
    .expect("email pattern is valid")
});

/// Decode an `authorization` header value into a candidate email.
pub fn decode_auth_header(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let bytes = LENIENT_BASE64
        .decode(trimmed)
        .or_else(|_| LENIENT_BASE64_URL.decode(trimmed))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Syntactic email check: dot-atom local part, two or more domain labels.
pub fn is_email(candidate: &str) -> bool {
    if candidate.len() > MAX_EMAIL_LEN {
        return false;
    }
    match candidate.rsplit_once('@') {
        Some((local, _)) if local.len() <= MAX_LOCAL_PART_LEN => EMAIL_RE.is_match(candidate),
        _ => false,
    }
}

/// The token a client sends back in `authorization` to act as this email.
pub fn encode_token(email: &str) -> String {
    STANDARD.encode(email)
}

/// Build the request context for an `authorization` header value.
pub async fn resolve_context(pool: &DbPool, header: Option<&str>) -> GatewayResult<RequestContext> {
    let Some(email) = header.and_then(decode_auth_header) else {
        return Ok(RequestContext::anonymous());
    };

    if !is_email(&email) {
        tracing::debug!("authorization header is not an email, continuing anonymously");
        return Ok(RequestContext::anonymous());
    }

    let user = users::find_or_create_user(pool, &email).await?;
    Ok(RequestContext::authenticated(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::test_pool;

    #[test]
    fn test_decode_padded_and_unpadded() {
        assert_eq!(decode_auth_header("YUBhLmE=").as_deref(), Some("a@a.a"));
        assert_eq!(decode_auth_header("YUBhLmE").as_deref(), Some("a@a.a"));
        assert_eq!(decode_auth_header("  YUBhLmE=\n").as_deref(), Some("a@a.a"));
    }

    #[test]
    fn test_decode_url_safe_alphabet() {
        use base64::engine::general_purpose::URL_SAFE_NO_PAD;
        use base64::Engine as _;

        let email = "~~~@apollo.dev";
        let token = URL_SAFE_NO_PAD.encode(email);
        assert!(token.contains('-'));
        assert_eq!(decode_auth_header(&token).as_deref(), Some(email));
        assert!(is_email(email));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_auth_header(""), None);
        assert_eq!(decode_auth_header("   "), None);
        assert_eq!(decode_auth_header("not base64!"), None);
        // 0xff 0xfe is not UTF-8
        assert_eq!(decode_auth_header("//4="), None);
    }

    #[test]
    fn test_token_round_trip() {
        let token = encode_token("daisy@apollographql.com");
        assert_eq!(token, "ZGFpc3lAYXBvbGxvZ3JhcGhxbC5jb20=");
        assert_eq!(decode_auth_header(&token).as_deref(), Some("daisy@apollographql.com"));
    }

    #[test]
    fn test_valid_emails() {
        for email in [
            "a@a.a",
            "daisy@apollographql.com",
            "first.last+tag@sub.example.org",
            "o'brien@example.ie",
            "x@123.example",
        ] {
            assert!(is_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@-example.com",
            "user@example-.com",
            "user@exa mple.com",
            "user name@example.com",
        ] {
            assert!(!is_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_length_limits() {
        let long_local = format!("{}@example.com", "a".repeat(65));
        assert!(!is_email(&long_local));
        let ok_local = format!("{}@example.com", "a".repeat(64));
        assert!(is_email(&ok_local));

        let long_total = format!("a@{}.com", "b".repeat(60).repeat(5));
        assert!(!is_email(&long_total));
    }

    #[tokio::test]
    async fn test_valid_header_yields_user_with_that_email() {
        let pool = test_pool().await;
        let header = encode_token("a@a.a");

        let ctx = resolve_context(&pool, Some(&header)).await.unwrap();
        assert_eq!(ctx.email(), Some("a@a.a"));

        // Same email, same row
        let again = resolve_context(&pool, Some(&header)).await.unwrap();
        assert_eq!(ctx.user_id(), again.user_id());
    }

    #[tokio::test]
    async fn test_other_headers_are_anonymous() {
        let pool = test_pool().await;
        let not_email = encode_token("not-an-email");

        for header in [None, Some(""), Some("%%%"), Some(not_email.as_str())] {
            let ctx = resolve_context(&pool, header).await.unwrap();
            assert_eq!(ctx, RequestContext::anonymous(), "header {header:?}");
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
