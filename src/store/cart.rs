//! Cart slice, persisted like favorites

use serde::{Deserialize, Serialize};

use crate::types::{remove_by_id, CartItem, Identified};

pub const STORAGE_KEY: &str = "cart";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Sum of quantities across all lines
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.qty).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum CartAction {
    /// Adds a line, or sets the quantity of the existing line for that product
    AddToCart(CartItem),
    RemoveFromCart(String),
    ClearCart,
}

pub fn reduce(mut state: CartState, action: CartAction) -> CartState {
    match action {
        CartAction::AddToCart(item) => {
            match state.items.iter_mut().find(|line| line.id() == item.id()) {
                Some(line) => *line = item,
                None => state.items.push(item),
            }
        }
        CartAction::RemoveFromCart(id) => remove_by_id(&mut state.items, &id),
        CartAction::ClearCart => state.items.clear(),
    }
    state
}
