//! Products slice: the shop's own catalogue and the public listing

use serde::{Deserialize, Serialize};

use super::lifecycle::{message_or_empty, Deleted, Lifecycle};
use crate::types::{prepend, remove_by_id, replace_by_id, Product};

pub const DEFAULT_ERROR: &str = "Product request failed";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductsState {
    #[serde(flatten)]
    pub status: Lifecycle,
    pub success: bool,
    /// Last product created or updated
    pub product: Option<Product>,
    /// Products of the signed-in shop
    pub shop_products: Vec<Product>,
    /// Every product on the storefront
    pub all_products: Vec<Product>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ProductAction {
    ProductCreateRequest,
    ProductCreateSuccess(Product),
    ProductCreateFail(#[serde(deserialize_with = "message_or_empty")] String),

    ProductUpdateRequest,
    ProductUpdateSuccess(Product),
    ProductUpdateFail(#[serde(deserialize_with = "message_or_empty")] String),

    GetAllProductsShopRequest,
    GetAllProductsShopSuccess(Vec<Product>),
    GetAllProductsShopFail(#[serde(deserialize_with = "message_or_empty")] String),

    DeleteProductRequest,
    DeleteProductSuccess(Deleted),
    DeleteProductFail(#[serde(deserialize_with = "message_or_empty")] String),

    GetAllProductsRequest,
    GetAllProductsSuccess(Vec<Product>),
    GetAllProductsFail(#[serde(deserialize_with = "message_or_empty")] String),

    ResetProducts,
}

pub fn reduce(mut state: ProductsState, action: ProductAction) -> ProductsState {
    use ProductAction::*;

    match action {
        ProductCreateRequest
        | ProductUpdateRequest
        | GetAllProductsShopRequest
        | DeleteProductRequest
        | GetAllProductsRequest => {
            state.status.request();
            state.success = false;
        }

        ProductCreateSuccess(product) => {
            state.status.succeed();
            state.success = true;
            prepend(&mut state.shop_products, product.clone());
            state.product = Some(product);
        }
        ProductUpdateSuccess(product) => {
            state.status.succeed();
            state.success = true;
            replace_by_id(&mut state.shop_products, &product);
            replace_by_id(&mut state.all_products, &product);
            state.product = Some(product);
        }
        GetAllProductsShopSuccess(products) => {
            state.status.succeed();
            state.shop_products = products;
        }
        DeleteProductSuccess(deleted) => {
            state.status.succeed();
            remove_by_id(&mut state.shop_products, &deleted.id);
            remove_by_id(&mut state.all_products, &deleted.id);
            state.message = Some(deleted.message).filter(|m| !m.is_empty());
        }
        GetAllProductsSuccess(products) => {
            state.status.succeed();
            state.all_products = products;
        }

        ProductCreateFail(message)
        | ProductUpdateFail(message)
        | GetAllProductsShopFail(message)
        | DeleteProductFail(message)
        | GetAllProductsFail(message) => {
            state.status.fail(message, DEFAULT_ERROR);
            state.success = false;
        }

        ResetProducts => state = ProductsState::default(),
    }

    state
}
