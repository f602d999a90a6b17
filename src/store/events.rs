//! Events slice: flash-sale events of the shop and of the storefront

use serde::{Deserialize, Serialize};

use super::lifecycle::{message_or_empty, Deleted, Lifecycle};
use crate::types::{prepend, remove_by_id, replace_by_id, ShopEvent};

pub const DEFAULT_ERROR: &str = "Event request failed";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsState {
    #[serde(flatten)]
    pub status: Lifecycle,
    pub success: bool,
    pub event: Option<ShopEvent>,
    pub shop_events: Vec<ShopEvent>,
    pub all_events: Vec<ShopEvent>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum EventAction {
    EventCreateRequest,
    EventCreateSuccess(ShopEvent),
    EventCreateFail(#[serde(deserialize_with = "message_or_empty")] String),

    EventUpdateRequest,
    EventUpdateSuccess(ShopEvent),
    EventUpdateFail(#[serde(deserialize_with = "message_or_empty")] String),

    GetAllEventsShopRequest,
    GetAllEventsShopSuccess(Vec<ShopEvent>),
    GetAllEventsShopFail(#[serde(deserialize_with = "message_or_empty")] String),

    DeleteEventRequest,
    DeleteEventSuccess(Deleted),
    DeleteEventFail(#[serde(deserialize_with = "message_or_empty")] String),

    GetAllEventsRequest,
    GetAllEventsSuccess(Vec<ShopEvent>),
    GetAllEventsFail(#[serde(deserialize_with = "message_or_empty")] String),

    ResetEvents,
}

pub fn reduce(mut state: EventsState, action: EventAction) -> EventsState {
    use EventAction::*;

    match action {
        EventCreateRequest
        | EventUpdateRequest
        | GetAllEventsShopRequest
        | DeleteEventRequest
        | GetAllEventsRequest => {
            state.status.request();
            state.success = false;
        }

        EventCreateSuccess(event) => {
            state.status.succeed();
            state.success = true;
            prepend(&mut state.shop_events, event.clone());
            state.event = Some(event);
        }
        EventUpdateSuccess(event) => {
            state.status.succeed();
            state.success = true;
            replace_by_id(&mut state.shop_events, &event);
            replace_by_id(&mut state.all_events, &event);
            state.event = Some(event);
        }
        GetAllEventsShopSuccess(events) => {
            state.status.succeed();
            state.shop_events = events;
        }
        DeleteEventSuccess(deleted) => {
            state.status.succeed();
            remove_by_id(&mut state.shop_events, &deleted.id);
            remove_by_id(&mut state.all_events, &deleted.id);
            state.message = Some(deleted.message).filter(|m| !m.is_empty());
        }
        GetAllEventsSuccess(events) => {
            state.status.succeed();
            state.all_events = events;
        }

        EventCreateFail(message)
        | EventUpdateFail(message)
        | GetAllEventsShopFail(message)
        | DeleteEventFail(message)
        | GetAllEventsFail(message) => {
            state.status.fail(message, DEFAULT_ERROR);
            state.success = false;
        }

        ResetEvents => state = EventsState::default(),
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_delete() {
        let state = reduce(EventsState::default(), EventAction::EventCreateRequest);
        let state = reduce(state, EventAction::EventCreateSuccess(ShopEvent::new("e1", "Summer sale")));
        assert!(state.success);
        assert_eq!(state.shop_events.len(), 1);

        let state = reduce(state, EventAction::DeleteEventRequest);
        let state = reduce(
            state,
            EventAction::DeleteEventSuccess(Deleted {
                id: "e1".to_string(),
                message: String::new(),
            }),
        );
        assert!(state.shop_events.is_empty());
        assert_eq!(state.message, None);
    }

    #[test]
    fn test_delete_unknown_id_keeps_list() {
        let state = reduce(
            EventsState::default(),
            EventAction::GetAllEventsSuccess(vec![ShopEvent::new("e1", "Sale")]),
        );
        let state = reduce(
            state,
            EventAction::DeleteEventSuccess(Deleted {
                id: "missing".to_string(),
                message: String::new(),
            }),
        );
        assert_eq!(state.all_events.len(), 1);
    }

    #[test]
    fn test_fail_uses_default_message() {
        let state = reduce(EventsState::default(), EventAction::GetAllEventsRequest);
        let state = reduce(state, EventAction::GetAllEventsFail(String::new()));
        assert_eq!(state.status.error.as_deref(), Some(DEFAULT_ERROR));
    }
}
