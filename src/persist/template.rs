//! Template for the generated dataset module

/// Template name registered with Tera. The `.ts` suffix keeps autoescaping off.
pub const MODULE_TEMPLATE_NAME: &str = "nftDatas.ts";

/// Self-contained TypeScript module declaring the record shape and exporting
/// the records, so it can replace the source dataset module as-is.
pub const DATASET_MODULE_TEMPLATE: &str = r#"interface NftAttribute {
  type: string;
  value: string;
  rarity: number;
}

export interface NftData {
  id: number;
  imageId: string;
  rarity: number;
  attributes: NftAttribute[];
  percentage: number;
}

export const {{ collection }}: NftData[] = {{ records_json | safe }};
"#;
