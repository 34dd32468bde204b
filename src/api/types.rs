// src/api/types.rs
use serde::{Deserialize, Deserializer, Serialize};

/// One certificate row returned by crt.sh
///
/// Every field is optional on the wire; absent or `null` keys decode to zero
/// or an empty string and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub issuer_ca_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub issuer_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub common_name: String,
    /// All SAN names, newline separated
    #[serde(deserialize_with = "null_as_default")]
    pub name_value: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub entry_timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub not_before: String,
    #[serde(deserialize_with = "null_as_default")]
    pub not_after: String,
    #[serde(deserialize_with = "null_as_default")]
    pub serial_number: String,
    /// Service-side meta count, meaning depends on the query shape
    #[serde(deserialize_with = "null_as_default")]
    pub result_count: i64,
}

/// crt.sh sometimes sends `null` for fields it has no value for
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl CertificateRecord {
    /// Iterate the individual names packed into `name_value`
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.name_value
            .lines()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Per-call search options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Include certificates whose validity has already ended
    pub include_expired: bool,
    /// Match the domain and any subdomain (`%.` prefix)
    pub wildcard: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "issuer_ca_id": 185756,
            "issuer_name": "C=US, O=DigiCert Inc, CN=DigiCert Global G2 TLS RSA SHA256 2020 CA1",
            "common_name": "www.example.org",
            "name_value": "example.com\nwww.example.com",
            "id": 11920381366,
            "entry_timestamp": "2024-01-30T19:22:50.288",
            "not_before": "2024-01-30T00:00:00",
            "not_after": "2025-03-01T23:59:59",
            "serial_number": "075bcef30689c8addf13e51af4afe187",
            "result_count": 3
        }"#;

        let record: CertificateRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.issuer_ca_id, 185756);
        assert_eq!(record.common_name, "www.example.org");
        assert_eq!(record.id, 11920381366);
        assert_eq!(record.entry_timestamp, "2024-01-30T19:22:50.288");
        assert_eq!(record.not_after, "2025-03-01T23:59:59");
        assert_eq!(record.serial_number, "075bcef30689c8addf13e51af4afe187");
        assert_eq!(record.result_count, 3);
    }

    #[test]
    fn test_deserialize_missing_fields_default() {
        let json = r#"{"id": 7, "common_name": "example.com", "issuer_name": "X"}"#;

        let record: CertificateRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.common_name, "example.com");
        assert_eq!(record.issuer_name, "X");
        assert_eq!(record.issuer_ca_id, 0);
        assert_eq!(record.result_count, 0);
        assert!(record.name_value.is_empty());
        assert!(record.serial_number.is_empty());
    }

    #[test]
    fn test_deserialize_null_fields_default() {
        let json = r#"{
            "id": 7,
            "common_name": null,
            "issuer_name": "X",
            "issuer_ca_id": null,
            "result_count": null
        }"#;

        let record: CertificateRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.issuer_name, "X");
        assert!(record.common_name.is_empty());
        assert_eq!(record.issuer_ca_id, 0);
        assert_eq!(record.result_count, 0);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"id": 1, "min_cert_id": 99, "extra": {"nested": true}}"#;

        let record: CertificateRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 1);
    }

    #[test]
    fn test_deserialize_wrong_type_fails() {
        let json = r#"{"id": "not-a-number"}"#;
        let result: Result<CertificateRecord, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_names_splits_name_value() {
        let record = CertificateRecord {
            name_value: "example.com\n www.example.com \n\n*.example.com".to_string(),
            ..Default::default()
        };

        let names: Vec<&str> = record.names().collect();
        assert_eq!(names, vec!["example.com", "www.example.com", "*.example.com"]);
    }

    #[test]
    fn test_search_options_default() {
        let opts = SearchOptions::default();
        assert!(!opts.include_expired);
        assert!(!opts.wildcard);
    }
}
