//! Types shared across resources.

use serde::{Deserialize, Serialize};

/// A billing, shipping, or store address.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub company: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
}

/// A key/value metadata entry attached to a resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Aggregate rating of a store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// The average rating, as reported by the API (e.g. `"4.50"`).
    #[serde(default)]
    pub rating: String,
    /// Number of ratings received.
    #[serde(default)]
    pub count: u64,
}

/// Common parameters accepted by every collection endpoint.
///
/// Embed via `#[serde(flatten)]` in resource-specific parameter structs.
/// Fields left as `None` produce no query parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    /// Page of the collection to return (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Limit results to those matching a search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Attribute to sort the collection by.
    #[serde(rename = "orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Sort direction, `asc` or `desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::query::to_query_pairs;

    #[test]
    fn test_default_list_params_produce_no_query() {
        let pairs = to_query_pairs(&ListParams::default()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_list_params_rename_orderby() {
        let params = ListParams {
            page: Some(2),
            per_page: Some(25),
            order_by: Some("title".to_string()),
            order: Some("asc".to_string()),
            search: None,
        };
        let pairs = to_query_pairs(&params).unwrap();
        assert!(pairs.contains(&("orderby".to_string(), "title".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("per_page".to_string(), "25".to_string())));
    }

    #[test]
    fn test_address_omits_empty_optional_fields() {
        let address = Address {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            address_1: "1 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LND".to_string(),
            postcode: "E1".to_string(),
            country: "GB".to_string(),
            ..Address::default()
        };

        let json = serde_json::to_value(&address).unwrap();
        assert!(json.get("company").is_none());
        assert!(json.get("phone").is_none());
        assert_eq!(json["first_name"], "Ada");
    }

    #[test]
    fn test_metadata_round_trips_arbitrary_values() {
        let json = r##"{"id":7,"key":"color","value":{"hex":"#fff"}}"##;
        let meta: MetaData = serde_json::from_str(json).unwrap();
        assert_eq!(meta.id, Some(7));
        assert_eq!(meta.key, "color");
        assert_eq!(meta.value, serde_json::json!({"hex": "#fff"}));
    }
}
