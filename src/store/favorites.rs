//! Favorites (wishlist) slice
//!
//! The reducer is pure; the store persists the list after every action.

use serde::{Deserialize, Serialize};

use crate::types::{contains_id, remove_by_id, Product};

/// Storage key the favorites list is persisted under
pub const STORAGE_KEY: &str = "favorites";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesState {
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum FavoritesAction {
    AddFavorite(Product),
    RemoveFavorite(String),
    ClearFavorites,
}

pub fn reduce(mut state: FavoritesState, action: FavoritesAction) -> FavoritesState {
    match action {
        FavoritesAction::AddFavorite(product) => {
            if !contains_id(&state.items, &product.id) {
                state.items.push(product);
            }
        }
        FavoritesAction::RemoveFavorite(id) => remove_by_id(&mut state.items, &id),
        FavoritesAction::ClearFavorites => state.items.clear(),
    }
    state
}
