//! Seller slice: the signed-in shop and the admin seller list

use serde::{Deserialize, Serialize};

use super::lifecycle::{message_or_empty, Lifecycle};
use crate::types::Seller;

pub const DEFAULT_ERROR: &str = "Failed to load seller";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerState {
    #[serde(flatten)]
    pub status: Lifecycle,
    pub is_seller: bool,
    pub seller: Option<Seller>,
    pub sellers: Vec<Seller>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum SellerAction {
    LoadSellerRequest,
    LoadSellerSuccess(Seller),
    LoadSellerFail(#[serde(deserialize_with = "message_or_empty")] String),

    GetAllSellersRequest,
    GetAllSellersSuccess(Vec<Seller>),
    GetAllSellersFail(#[serde(deserialize_with = "message_or_empty")] String),

    ResetSeller,
}

pub fn reduce(mut state: SellerState, action: SellerAction) -> SellerState {
    use SellerAction::*;

    match action {
        LoadSellerRequest | GetAllSellersRequest => state.status.request(),
        LoadSellerSuccess(seller) => {
            state.status.succeed();
            state.is_seller = true;
            state.seller = Some(seller);
        }
        LoadSellerFail(message) => {
            state.status.fail(message, DEFAULT_ERROR);
            state.is_seller = false;
        }
        GetAllSellersSuccess(sellers) => {
            state.status.succeed();
            state.sellers = sellers;
        }
        GetAllSellersFail(message) => state.status.fail(message, DEFAULT_ERROR),
        ResetSeller => state = SellerState::default(),
    }

    state
}
