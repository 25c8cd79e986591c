use serde::Deserialize;
use serde_json::{Map, Value};

/// One job offer (or any API row): a sparse map from field name to value.
/// Not every field is present on every record.
pub type Record = Map<String, Value>;

/// A single page of the offer listing as returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferPage {
    Offers {
        offers: Vec<Record>,
        total_results: Option<u64>,
    },
    /// Body was not JSON or had no `offers` array.
    Malformed,
}

/// Envelope of the offer listing endpoint; only the fields pagination needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OfferListResponse {
    #[serde(default)]
    offers: Option<Vec<Record>>,
    #[serde(default)]
    total_results: Option<Value>,
}

impl OfferPage {
    /// Interpret a raw response body. Anything that is not an object with an
    /// `offers` array of objects is malformed.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice::<OfferListResponse>(body)
            .map(Self::from_response)
            .unwrap_or(OfferPage::Malformed)
    }

    pub fn from_value(data: Value) -> Self {
        serde_json::from_value::<OfferListResponse>(data)
            .map(Self::from_response)
            .unwrap_or(OfferPage::Malformed)
    }

    fn from_response(resp: OfferListResponse) -> Self {
        match resp.offers {
            Some(offers) => OfferPage::Offers {
                offers,
                total_results: resp.total_results.as_ref().and_then(Value::as_u64),
            },
            None => OfferPage::Malformed,
        }
    }
}

/// Parse the country dictionary: a flat array of `{code, name}`-like objects.
/// Non-object entries are skipped.
pub fn records_from_array(data: Value) -> Vec<Record> {
    match data {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_offers_and_total() {
        let page = OfferPage::from_value(json!({
            "totalResults": 120,
            "offers": [{"id": "a"}, {"id": "b", "city": "Madrid"}]
        }));
        match page {
            OfferPage::Offers {
                offers,
                total_results,
            } => {
                assert_eq!(total_results, Some(120));
                assert_eq!(offers.len(), 2);
                assert_eq!(offers[1]["city"], "Madrid");
            }
            OfferPage::Malformed => panic!("expected offers"),
        }
    }

    #[test]
    fn missing_offers_is_malformed() {
        assert_eq!(
            OfferPage::from_value(json!({"totalResults": 3})),
            OfferPage::Malformed
        );
        assert_eq!(OfferPage::from_body(b"<html>busy</html>"), OfferPage::Malformed);
        assert_eq!(OfferPage::from_body(b""), OfferPage::Malformed);
    }

    #[test]
    fn non_object_offer_makes_page_malformed() {
        assert_eq!(
            OfferPage::from_value(json!({"totalResults": 2, "offers": [{"id": "a"}, 7]})),
            OfferPage::Malformed
        );
        assert_eq!(
            OfferPage::from_value(json!({"offers": null})),
            OfferPage::Malformed
        );
        assert_eq!(OfferPage::from_value(json!([1, 2])), OfferPage::Malformed);
    }

    #[test]
    fn unexpected_total_type_is_ignored() {
        assert_eq!(
            OfferPage::from_value(json!({"totalResults": "many", "offers": []})),
            OfferPage::Offers {
                offers: vec![],
                total_results: None
            }
        );
    }

    #[test]
    fn empty_offers_page_is_not_malformed() {
        let page = OfferPage::from_body(br#"{"offers": []}"#);
        assert_eq!(
            page,
            OfferPage::Offers {
                offers: vec![],
                total_results: None
            }
        );
    }

    #[test]
    fn country_dictionary_skips_non_objects() {
        let rows = records_from_array(json!([
            {"id": 17, "value": "espana", "order": 1},
            "junk",
            {"id": 1, "value": "alemania"}
        ]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["value"], "alemania");
    }
}
