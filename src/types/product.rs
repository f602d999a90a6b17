//! Product, shop event, and cart item records

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{number_field, str_field, Identified};

/// Product listed by a shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    /// Backend fields, preserved as-is
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Product {
    /// Create a product with only identity and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self { id: id.into(), fields }
    }

    pub fn name(&self) -> &str {
        str_field(&self.fields, "name").unwrap_or_default()
    }

    pub fn shop_id(&self) -> Option<&str> {
        str_field(&self.fields, "shopId")
    }

    pub fn discount_price(&self) -> Option<f64> {
        number_field(&self.fields, "discountPrice")
    }

    /// Units in stock; numeric strings count, negative values do not
    pub fn stock(&self) -> Option<u32> {
        number_field(&self.fields, "stock")
            .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64)
            .map(|n| n as u32)
    }
}

impl Identified for Product {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Time-limited shop event (flash sale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopEvent {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ShopEvent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self { id: id.into(), fields }
    }

    pub fn name(&self) -> &str {
        str_field(&self.fields, "name").unwrap_or_default()
    }

    pub fn shop_id(&self) -> Option<&str> {
        str_field(&self.fields, "shopId")
    }

    pub fn start_date(&self) -> Option<&str> {
        str_field(&self.fields, "start_Date")
    }

    pub fn finish_date(&self) -> Option<&str> {
        str_field(&self.fields, "Finish_Date")
    }
}

impl Identified for ShopEvent {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Product in the cart with the chosen quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default = "default_qty", deserialize_with = "lenient_qty")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

/// Quantity as a number or numeric string; anything else counts as one
fn lenient_qty<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let qty = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(qty
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or_else(default_qty))
}

impl CartItem {
    pub fn new(product: Product, qty: u32) -> Self {
        Self { product, qty }
    }
}

impl Identified for CartItem {
    fn id(&self) -> &str {
        &self.product.id
    }
}
