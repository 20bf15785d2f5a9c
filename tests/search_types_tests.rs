//! # Search Types Tests
//!
//! Decoding of LeakOSINT response bodies into typed results.

use leakosint_bot::config::SearchConfig;
use leakosint_bot::dialogue::Language;
use leakosint_bot::errors::SearchError;
use leakosint_bot::search_client::LeakOsintClient;
use leakosint_bot::search_types::{FieldValue, SearchRequest, SearchResponse};
use serde_json::json;
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_is_failure() {
        let response = SearchResponse::from_json(json!({"Error code": "no data"})).unwrap();
        assert_eq!(
            response.into_result(),
            Err(SearchError::Api("no data".to_string()))
        );
    }

    #[test]
    fn test_error_code_wins_over_list() {
        let body = json!({"Error code": "bad token", "List": {"db": {"Data": []}}});
        let response = SearchResponse::from_json(body).unwrap();
        assert!(matches!(response, SearchResponse::Failure { .. }));
    }

    #[test]
    fn test_falsy_error_code_is_ignored() {
        for code in [json!(null), json!(""), json!(0), json!(false)] {
            let body = json!({"Error code": code, "List": {"db": {}}});
            let result = SearchResponse::from_json(body).unwrap().into_result().unwrap();
            assert_eq!(result.entries.len(), 1);
        }
    }

    #[test]
    fn test_numeric_error_code_is_stringified() {
        let response = SearchResponse::from_json(json!({"Error code": 401})).unwrap();
        assert_eq!(
            response,
            SearchResponse::Failure {
                error_code: "401".to_string()
            }
        );
    }

    #[test]
    fn test_non_object_body_is_decode_error() {
        assert!(matches!(
            SearchResponse::from_json(json!(["not", "an", "object"])),
            Err(SearchError::Decode(_))
        ));
    }

    #[test]
    fn test_entry_fields_are_decoded_leniently() {
        let body = json!({
            "List": {
                "Full": {
                    "InfoLeak": "Leaked in 2021",
                    "Data": [
                        {"Phone": "+100", "Score": 1.5, "Tags": ["a", "b"]},
                        "not a record",
                        {"Phone": "+200"}
                    ]
                },
                "NoData": {"InfoLeak": "", "Data": "oops"},
                "NotAnObject": 42
            }
        });

        let result = SearchResponse::from_json(body).unwrap().into_result().unwrap();
        let names: Vec<&str> = result.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Full", "NoData", "NotAnObject"]);

        let full = &result.entries[0];
        assert_eq!(full.summary.as_deref(), Some("Leaked in 2021"));
        assert_eq!(full.records.len(), 2);
        let columns: Vec<&str> = full.records[0]
            .columns
            .iter()
            .map(|(column, _)| column.as_str())
            .collect();
        assert_eq!(columns, vec!["Phone", "Score", "Tags"]);
        assert_eq!(full.records[0].columns[2].1.to_string(), r#"["a","b"]"#);

        let no_data = &result.entries[1];
        assert_eq!(no_data.summary, None);
        assert!(no_data.records.is_empty());

        assert!(result.entries[2].records.is_empty());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::from(&json!(null)).to_string(), "");
        assert_eq!(FieldValue::from(&json!(true)).to_string(), "true");
        assert_eq!(FieldValue::from(&json!(12)).to_string(), "12");
        assert_eq!(FieldValue::from(&json!(1.0)).to_string(), "1");
        assert_eq!(FieldValue::from(&json!(-3.0)).to_string(), "-3");
        assert_eq!(FieldValue::from(&json!(1.5)).to_string(), "1.5");
        assert_eq!(FieldValue::from(&json!("text")).to_string(), "text");
        assert_eq!(FieldValue::from(&json!({"k": 1})).to_string(), r#"{"k":1}"#);
    }

    #[test]
    fn test_search_payload_shape() {
        let client = LeakOsintClient::new(SearchConfig {
            api_url: "https://example.test/".to_string(),
            api_token: "api-secret".to_string(),
            result_limit: 100,
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        let request = SearchRequest {
            query: "john@example.com".to_string(),
            language: Language::En,
            limit: 100,
        };

        let payload = serde_json::to_value(client.payload(&request)).unwrap();
        assert_eq!(
            payload,
            json!({"token": "api-secret", "request": "john@example.com", "limit": 100, "lang": "en"})
        );
    }
}
