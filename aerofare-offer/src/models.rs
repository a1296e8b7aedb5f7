use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One synthesized flight offer as served to the storefront. Ephemeral:
/// regenerated on every quote, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFlight {
    pub id: Uuid,
    pub airline: String,
    pub logo: String,
    pub duration: String,
    pub stops: u8,
    pub from_code: String,
    pub to_code: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape_is_camel_cased_and_drops_empty_totals() {
        let flight = GeneratedFlight {
            id: Uuid::new_v4(),
            airline: "Delta Air Lines".to_string(),
            logo: "/logos/delta-air-lines.svg".to_string(),
            duration: "5h 25m".to_string(),
            stops: 0,
            from_code: "JFK".to_string(),
            to_code: "LAX".to_string(),
            price: 3780,
            total_price: None,
        };

        let value = serde_json::to_value(&flight).unwrap();
        assert!(value.get("fromCode").is_some());
        assert!(value.get("toCode").is_some());
        assert!(value.get("totalPrice").is_none());

        let with_total = GeneratedFlight {
            total_price: Some(7560),
            ..flight
        };
        let value = serde_json::to_value(&with_total).unwrap();
        assert_eq!(value["totalPrice"], 7560);
    }
}
