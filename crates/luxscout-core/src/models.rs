use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product model - the star of the show
///
/// Loaded once from the catalog file at startup and never mutated.
/// `wattage_options` is non-empty and sorted ascending; the display layer
/// relies on first/last to render the wattage range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub short_description: String,
    pub images: Vec<String>,
    pub wattage_options: Vec<u32>,
    pub color_temperatures: Vec<String>,
    pub application_types: Vec<String>,
    pub bis_certified: bool,
    /// Display-only spec sheet fields (voltage, warranty, IP rating, ...)
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
}

impl Product {
    /// Human-readable wattage range, e.g. "7W - 22W" or "12W"
    pub fn wattage_range(&self) -> String {
        match (self.wattage_options.first(), self.wattage_options.last()) {
            (Some(lo), Some(hi)) if lo != hi => format!("{}W - {}W", lo, hi),
            (Some(w), _) => format!("{}W", w),
            _ => String::new(),
        }
    }

    /// Category id with hyphens replaced by spaces, the form users type
    pub fn category_name(&self) -> String {
        self.category.replace('-', " ")
    }
}

/// A fixed catalog category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// One configured line item in the enquiry cart
///
/// A product can appear multiple times with different wattage/finish
/// combinations, so each entry gets its own selection id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedProduct {
    pub selection_id: String,
    pub product_id: String,
    pub product_name: String,
    pub wattage: u32,
    pub color_temperature: String,
    pub application_type: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update applied to an existing selection
#[derive(Debug, Clone, Default)]
pub struct SelectionPatch {
    pub wattage: Option<u32>,
    pub color_temperature: Option<String>,
    pub application_type: Option<String>,
    pub quantity: Option<u32>,
    pub notes: Option<Option<String>>,
}
