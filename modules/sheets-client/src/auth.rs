use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::error::{Result, SheetsError};
use crate::types::{Claims, ServiceAccountKey, TokenResponse};

const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Sign the RS256 assertion for the JWT-bearer grant.
pub(crate) fn sign_assertion(key: &ServiceAccountKey, now: i64) -> Result<String> {
    let claims = Claims {
        iss: &key.client_email,
        scope: SHEETS_SCOPE,
        aud: &key.token_uri,
        iat: now,
        exp: now + ASSERTION_LIFETIME_SECS,
    };
    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)?)
}

/// Exchange a signed assertion for a short-lived access token.
pub(crate) async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
) -> Result<String> {
    let assertion = sign_assertion(key, chrono::Utc::now().timestamp())?;

    let resp = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SheetsError::Auth(format!(
            "token exchange failed (status {}): {body}",
            status.as_u16()
        )));
    }

    let token: TokenResponse = resp.json().await?;
    tracing::debug!(client_email = %key.client_email, "Obtained Sheets access token");
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_private_key_is_an_auth_error() {
        let key = ServiceAccountKey {
            client_email: "bot@proj.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };
        let err = sign_assertion(&key, 1_700_000_000).unwrap_err();
        assert!(matches!(err, SheetsError::Auth(_)));
    }
}
