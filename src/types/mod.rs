//! Storefront records carried by the client store
//!
//! Records come from the REST backend. Only the identity field (`_id`) is
//! typed and required; every other field is kept verbatim in `fields` and
//! read through lenient accessors, so an odd backend shape never rejects a
//! record.

mod product;
mod user;

use serde_json::{Map, Value};

pub use product::{CartItem, Product, ShopEvent};
pub use user::{Seller, User};

/// Records with a stable identity field
pub trait Identified {
    fn id(&self) -> &str;
}

/// String field, if present and a string
pub(crate) fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Numeric field; numeric strings are accepted too
pub(crate) fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Insert at the front of a list
pub fn prepend<T>(list: &mut Vec<T>, item: T) {
    list.insert(0, item);
}

/// Replace every entry sharing the item's identity; returns whether any matched
pub fn replace_by_id<T: Identified + Clone>(list: &mut [T], item: &T) -> bool {
    let mut replaced = false;
    for entry in list.iter_mut().filter(|e| e.id() == item.id()) {
        *entry = item.clone();
        replaced = true;
    }
    replaced
}

/// Remove every entry with the given identity
pub fn remove_by_id<T: Identified>(list: &mut Vec<T>, id: &str) {
    list.retain(|entry| entry.id() != id);
}

/// Whether any entry has the given identity
pub fn contains_id<T: Identified>(list: &[T], id: &str) -> bool {
    list.iter().any(|entry| entry.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_helpers() {
        let mut list = vec![Product::new("p1", "Lamp"), Product::new("p2", "Desk")];

        prepend(&mut list, Product::new("p0", "Chair"));
        assert_eq!(list[0].id(), "p0");

        assert!(replace_by_id(&mut list, &Product::new("p2", "Standing desk")));
        assert_eq!(list[2].name(), "Standing desk");
        assert!(!replace_by_id(&mut list, &Product::new("p9", "Ghost")));

        remove_by_id(&mut list, "p1");
        assert!(!contains_id(&list, "p1"));
        assert_eq!(list.len(), 2);
    }
}
