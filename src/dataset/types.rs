//! Record types shared by the loader, driver and writer

use serde::{Deserialize, Serialize, Serializer};

/// A single trait of an NFT and how rare it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    #[serde(rename = "type")]
    pub attr_type: String,
    pub value: String,
    #[serde(serialize_with = "serialize_number")]
    pub rarity: f64,
}

/// One dataset entry. `id` is the stable identity; `image_id` is the content
/// identifier being rewritten by a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftData {
    pub id: i64,
    pub image_id: String,
    #[serde(serialize_with = "serialize_number")]
    pub rarity: f64,
    pub attributes: Vec<NftAttribute>,
    #[serde(serialize_with = "serialize_number")]
    pub percentage: f64,
}

impl NftData {
    /// Copy of this record pointing at a different image.
    pub fn with_image_id(&self, image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            ..self.clone()
        }
    }
}

/// Largest integer a dataset module can spell exactly (`Number.MAX_SAFE_INTEGER`)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Write whole numbers as `5` rather than `5.0`, matching hand-written and
/// previously generated dataset modules.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NftData {
        NftData {
            id: 7,
            image_id: "hashA".to_string(),
            rarity: 5.0,
            attributes: vec![NftAttribute {
                attr_type: "Eyes".to_string(),
                value: "Laser".to_string(),
                rarity: 1.5,
            }],
            percentage: 1.0,
        }
    }

    #[test]
    fn test_wire_names_match_dataset_module() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["imageId"], "hashA");
        assert_eq!(json["attributes"][0]["type"], "Eyes");
        assert!(json.get("image_id").is_none());
        assert!(json["attributes"][0].get("attr_type").is_none());
    }

    #[test]
    fn test_whole_numbers_serialize_without_fraction() {
        let record = NftData {
            id: -3,
            image_id: "hashA".to_string(),
            rarity: 5.0,
            attributes: vec![NftAttribute {
                attr_type: "Eyes".to_string(),
                value: "Laser".to_string(),
                rarity: 2.0,
            }],
            percentage: 16.67,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":-3,"imageId":"hashA","rarity":5,"attributes":[{"type":"Eyes","value":"Laser","rarity":2}],"percentage":16.67}"#
        );

        let reloaded: NftData = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, record);
    }

    #[test]
    fn test_integer_numbers_deserialize() {
        let record: NftData = serde_json::from_str(
            r#"{"id":1,"imageId":"hashA","rarity":5,"attributes":[],"percentage":1}"#,
        )
        .unwrap();
        assert_eq!(record.rarity, 5.0);
        assert_eq!(record.percentage, 1.0);
    }

    #[test]
    fn test_with_image_id_leaves_source_untouched() {
        let original = sample();
        let updated = original.with_image_id("realHashA");

        assert_eq!(original.image_id, "hashA");
        assert_eq!(updated.image_id, "realHashA");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.attributes, original.attributes);
        assert_eq!(updated.rarity, original.rarity);
        assert_eq!(updated.percentage, original.percentage);
    }
}
