//! Account records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{str_field, Identified};

/// Shopper account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self { id: id.into(), fields }
    }

    pub fn name(&self) -> &str {
        str_field(&self.fields, "name").unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        str_field(&self.fields, "email").unwrap_or_default()
    }

    /// Account role, `"user"` when the backend sends none
    pub fn role(&self) -> &str {
        str_field(&self.fields, "role").unwrap_or("user")
    }

    pub fn addresses(&self) -> &[Value] {
        match self.fields.get("addresses") {
            Some(Value::Array(list)) => list,
            _ => &[],
        }
    }
}

impl Identified for User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Shop owner account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Seller {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self { id: id.into(), fields }
    }

    pub fn name(&self) -> &str {
        str_field(&self.fields, "name").unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        str_field(&self.fields, "email").unwrap_or_default()
    }
}

impl Identified for Seller {
    fn id(&self) -> &str {
        &self.id
    }
}
