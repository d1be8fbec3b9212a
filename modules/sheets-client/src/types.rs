use serde::{Deserialize, Serialize};

/// The fields of a Google service-account key file that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// JWT claims for the OAuth2 JWT-bearer grant.
#[derive(Debug, Serialize)]
pub(crate) struct Claims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// A block of cell values. Reads return formatted strings; numbers are
/// stringified so callers always see text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            range: None,
            values: rows
                .into_iter()
                .map(|row| row.into_iter().map(serde_json::Value::String).collect())
                .collect(),
        }
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_defaults_token_uri() {
        let key = ServiceAccountKey::from_json(
            r#"{"type":"service_account","client_email":"bot@proj.iam.gserviceaccount.com","private_key":"pem"}"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, "https://oauth2.googleapis.com/token");
        assert_eq!(key.client_email, "bot@proj.iam.gserviceaccount.com");
    }

    #[test]
    fn key_without_private_key_is_rejected() {
        assert!(ServiceAccountKey::from_json(r#"{"client_email":"x"}"#).is_err());
    }

    #[test]
    fn read_values_become_strings() {
        let range: ValueRange = serde_json::from_str(
            r#"{"range":"Sheet1!A1:J3","majorDimension":"ROWS","values":[["id","n"],["SIG-1",3],["SIG-2"]]}"#,
        )
        .unwrap();
        let rows = range.into_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["SIG-1".to_string(), "3".to_string()]);
        assert_eq!(rows[2].len(), 1);
    }

    #[test]
    fn empty_sheet_has_no_values_key() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A1:J1000"}"#).unwrap();
        assert!(range.into_rows().is_empty());
    }
}
