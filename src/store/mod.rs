//! Client state store
//!
//! Application state is a plain struct of independent slices. Each slice is
//! changed only by its own pure reducer; [`reduce`] is the dispatch table
//! routing an [`Action`] to exactly one of them. [`Store`] owns the state and
//! the durable storage, and writes the favorites and cart lists back after
//! every action that touches them.
//!
//! Actions arrive in the wire shape `{"type": "<Name>", "payload": ...}`:
//!
//! ```
//! use storefront_relay::store::{Action, Store};
//! use storefront_relay::storage::MemoryStorage;
//!
//! let mut store = Store::new(MemoryStorage::new());
//! let action = Action::from_json(r#"{"type":"AddFavorite","payload":{"_id":"p1"}}"#).unwrap();
//! store.dispatch(action);
//! assert_eq!(store.state().favorites.items.len(), 1);
//! ```

pub mod cart;
pub mod events;
pub mod favorites;
pub mod lifecycle;
pub mod products;
pub mod seller;
pub mod user;

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::storage::DurableStorage;

pub use cart::{CartAction, CartState};
pub use events::{EventAction, EventsState};
pub use favorites::{FavoritesAction, FavoritesState};
pub use lifecycle::{Deleted, Lifecycle};
pub use products::{ProductAction, ProductsState};
pub use seller::{SellerAction, SellerState};
pub use user::{UserAction, UserState};

/// Whole client state, keyed by slice name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub user: UserState,
    pub seller: SellerState,
    pub products: ProductsState,
    pub events: EventsState,
    pub favorites: FavoritesState,
    pub cart: CartState,
}

/// Actions that touch every slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum GlobalAction {
    ClearErrors,
}

/// Any action the store accepts. Variant names are unique across slices,
/// so the `type` field alone selects the slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Action {
    User(UserAction),
    Seller(SellerAction),
    Product(ProductAction),
    Event(EventAction),
    Favorites(FavoritesAction),
    Cart(CartAction),
    Global(GlobalAction),
}

/// Wire envelope; a missing payload reads as `null`
#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(default)]
    payload: Value,
}

type SliceParser = fn(&Value) -> Result<Action, serde_json::Error>;

/// One parser per slice, tried in order until one knows the `type`
const SLICE_PARSERS: [SliceParser; 7] = [
    |v| UserAction::deserialize(v).map(Action::User),
    |v| SellerAction::deserialize(v).map(Action::Seller),
    |v| ProductAction::deserialize(v).map(Action::Product),
    |v| EventAction::deserialize(v).map(Action::Event),
    |v| FavoritesAction::deserialize(v).map(Action::Favorites),
    |v| CartAction::deserialize(v).map(Action::Cart),
    |v| GlobalAction::deserialize(v).map(Action::Global),
];

impl Action {
    /// Parse an action from its JSON wire form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Route by `type` to the owning slice. Errors from that slice
    /// (bad payload fields) are returned as-is.
    fn from_raw(raw: RawAction) -> Result<Self, serde_json::Error> {
        let envelope = json!({ "type": &raw.action_type, "payload": raw.payload });

        for parse in SLICE_PARSERS {
            match parse(&envelope) {
                Ok(action) => return Ok(action),
                Err(e) if e.to_string().starts_with("unknown variant") => continue,
                Err(e) => return Err(e),
            }
        }

        Err(de::Error::custom(format!(
            "unknown action type `{}`",
            raw.action_type
        )))
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawAction::deserialize(deserializer)?;
        Action::from_raw(raw).map_err(de::Error::custom)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

impl From<SellerAction> for Action {
    fn from(action: SellerAction) -> Self {
        Action::Seller(action)
    }
}

impl From<ProductAction> for Action {
    fn from(action: ProductAction) -> Self {
        Action::Product(action)
    }
}

impl From<EventAction> for Action {
    fn from(action: EventAction) -> Self {
        Action::Event(action)
    }
}

impl From<FavoritesAction> for Action {
    fn from(action: FavoritesAction) -> Self {
        Action::Favorites(action)
    }
}

impl From<CartAction> for Action {
    fn from(action: CartAction) -> Self {
        Action::Cart(action)
    }
}

impl From<GlobalAction> for Action {
    fn from(action: GlobalAction) -> Self {
        Action::Global(action)
    }
}

/// Root reducer
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::User(a) => state.user = user::reduce(state.user, a),
        Action::Seller(a) => state.seller = seller::reduce(state.seller, a),
        Action::Product(a) => state.products = products::reduce(state.products, a),
        Action::Event(a) => state.events = events::reduce(state.events, a),
        Action::Favorites(a) => state.favorites = favorites::reduce(state.favorites, a),
        Action::Cart(a) => state.cart = cart::reduce(state.cart, a),
        Action::Global(GlobalAction::ClearErrors) => {
            state.user.status.clear_error();
            state.seller.status.clear_error();
            state.products.status.clear_error();
            state.events.status.clear_error();
        }
    }
    state
}

/// Owner of the application state and its durable storage
pub struct Store<S: DurableStorage> {
    state: AppState,
    storage: S,
}

impl<S: DurableStorage> Store<S> {
    /// Create a store, restoring persisted lists from `storage`
    pub fn new(storage: S) -> Self {
        let state = AppState {
            favorites: FavoritesState {
                items: restore(&storage, favorites::STORAGE_KEY),
            },
            cart: CartState {
                items: restore(&storage, cart::STORAGE_KEY),
            },
            ..AppState::default()
        };
        Self { state, storage }
    }

    /// Apply an action and persist whatever durable slice it touched
    pub fn dispatch(&mut self, action: impl Into<Action>) -> &AppState {
        let action = action.into();
        let touches_favorites = matches!(action, Action::Favorites(_));
        let touches_cart = matches!(action, Action::Cart(_));

        self.state = reduce(std::mem::take(&mut self.state), action);

        if touches_favorites {
            persist(&self.storage, favorites::STORAGE_KEY, &self.state.favorites.items);
        }
        if touches_cart {
            persist(&self.storage, cart::STORAGE_KEY, &self.state.cart.items);
        }

        &self.state
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// State tree as a JSON object keyed by slice name
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(&self.state).unwrap_or_default()
    }
}

/// Load a persisted list; missing or unreadable data yields an empty list
fn restore<S: DurableStorage, T: DeserializeOwned>(storage: &S, key: &str) -> Vec<T> {
    match storage.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "discarding corrupt persisted list");
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted list");
            Vec::new()
        }
    }
}

/// Best-effort write of a list; failures are logged and swallowed
fn persist<S: DurableStorage, T: Serialize>(storage: &S, key: &str, items: &[T]) {
    let result = serde_json::to_string(items)
        .map_err(StorageError::from)
        .and_then(|raw| storage.save(key, &raw));

    match result {
        Ok(()) => debug!(key, len = items.len(), "persisted list"),
        Err(e) => warn!(key, error = %e, "failed to persist list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageResult;
    use crate::storage::MemoryStorage;
    use crate::types::Product;
    use serde_json::json;

    struct BrokenStorage;

    impl DurableStorage for BrokenStorage {
        fn load(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }

        fn save(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn test_action_wire_names() {
        let action = Action::from_json(r#"{"type":"LoadUserRequest"}"#).unwrap();
        assert_eq!(action, Action::User(UserAction::LoadUserRequest));

        let action = Action::from_json(r#"{"type":"RemoveFavorite","payload":"p1"}"#).unwrap();
        assert_eq!(
            action,
            Action::Favorites(FavoritesAction::RemoveFavorite("p1".to_string()))
        );

        let action = Action::from_json(r#"{"type":"GetAllEventsFail","payload":"oops"}"#).unwrap();
        assert_eq!(
            action,
            Action::Event(EventAction::GetAllEventsFail("oops".to_string()))
        );

        let err = Action::from_json(r#"{"type":"NoSuchAction"}"#).unwrap_err();
        assert!(err.to_string().contains("NoSuchAction"));
    }

    #[test]
    fn test_fail_without_message_uses_slice_default() {
        let mut store = Store::new(MemoryStorage::new());

        store.dispatch(Action::from_json(r#"{"type":"LoadUserRequest"}"#).unwrap());
        store.dispatch(Action::from_json(r#"{"type":"LoadUserFail"}"#).unwrap());
        assert!(!store.state().user.status.loading);
        assert_eq!(store.state().user.status.error.as_deref(), Some(user::DEFAULT_ERROR));

        store.dispatch(Action::from_json(r#"{"type":"GetAllProductsRequest"}"#).unwrap());
        store.dispatch(Action::from_json(r#"{"type":"GetAllProductsFail","payload":null}"#).unwrap());
        assert!(!store.state().products.status.loading);
        assert_eq!(
            store.state().products.status.error.as_deref(),
            Some(products::DEFAULT_ERROR)
        );
    }

    #[test]
    fn test_bad_payload_error_names_the_field() {
        let err = Action::from_json(r#"{"type":"AddFavorite","payload":{"name":"Lamp"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("_id"), "unexpected error: {}", err);
    }

    #[test]
    fn test_backend_shaped_favorites_are_kept() {
        let mut store = Store::new(MemoryStorage::new());
        for payload in [
            r#"{"_id":"p1","stock":"5"}"#,
            r#"{"_id":"p2","stock":-1}"#,
            r#"{"_id":"p3","name":null}"#,
        ] {
            let raw = format!(r#"{{"type":"AddFavorite","payload":{}}}"#, payload);
            store.dispatch(Action::from_json(&raw).unwrap());
        }

        assert_eq!(store.state().favorites.items.len(), 3);
        assert_eq!(store.state().favorites.items[0].stock(), Some(5));
    }

    #[test]
    fn test_dispatch_routes_to_one_slice() {
        let mut store = Store::new(MemoryStorage::new());
        store.dispatch(SellerAction::LoadSellerRequest);

        assert!(store.state().seller.status.loading);
        assert!(!store.state().user.status.loading);
        assert!(!store.state().products.status.loading);
    }

    #[test]
    fn test_clear_errors_touches_every_slice() {
        let mut store = Store::new(MemoryStorage::new());
        store.dispatch(UserAction::LoadUserFail("a".to_string()));
        store.dispatch(ProductAction::GetAllProductsFail("b".to_string()));

        store.dispatch(GlobalAction::ClearErrors);

        assert_eq!(store.state().user.status.error, None);
        assert_eq!(store.state().products.status.error, None);
    }

    #[test]
    fn test_favorites_are_persisted_and_restored() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let mut store = Store::new(storage.clone());
        store.dispatch(FavoritesAction::AddFavorite(Product::new("p1", "Lamp")));

        let raw = storage.get(favorites::STORAGE_KEY).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(saved, json!([{"_id": "p1", "name": "Lamp"}]));

        let restored = Store::new(storage);
        assert_eq!(restored.state().favorites.items.len(), 1);
    }

    #[test]
    fn test_corrupt_persisted_list_is_discarded() {
        let store = Store::new(MemoryStorage::with_value(favorites::STORAGE_KEY, "{not json"));
        assert!(store.state().favorites.items.is_empty());
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut store = Store::new(BrokenStorage);
        store.dispatch(FavoritesAction::AddFavorite(Product::new("p1", "Lamp")));
        store.dispatch(CartAction::ClearCart);

        assert_eq!(store.state().favorites.items.len(), 1);
    }

    #[test]
    fn test_snapshot_is_keyed_by_slice() {
        let store = Store::new(MemoryStorage::new());
        let snapshot = store.snapshot();

        for key in ["user", "seller", "products", "events", "favorites", "cart"] {
            assert!(snapshot.get(key).is_some(), "missing slice {}", key);
        }
        assert_eq!(snapshot["user"]["loading"], json!(false));
        assert_eq!(snapshot["user"]["error"], json!(null));
    }
}
