//! Switch state, the switch source feed, and the `GetSwitchChanges` stream.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::{Stream, StreamExt};

use pinhub_app::ports::{Actuator, Clock};
use pinhub_domain::event::StreamItem;
use pinhub_domain::rpc::{SwitchTransitionRequest, TransitionResponse};
use pinhub_domain::switch::Switch;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/switches`
pub async fn list<A, C>(State(state): State<AppState<A, C>>) -> Json<Vec<Switch>>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(state.platform.switches().await)
}

/// `GET /api/switches/{number}`
pub async fn get<A, C>(
    State(state): State<AppState<A, C>>,
    Path(number): Path<String>,
) -> Result<Json<Switch>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.switch_state(&number).await?))
}

/// `POST /api/switches/transitions`
pub async fn report<A, C>(
    State(state): State<AppState<A, C>>,
    Json(request): Json<SwitchTransitionRequest>,
) -> Result<Json<TransitionResponse>, ApiError>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    Ok(Json(state.platform.report_transition(request).await?))
}

/// `GET /api/switches/changes` — SSE stream of switch changes.
///
/// Each change is sent as a `change` event whose id is its sequence number.
/// A subscriber that fell behind receives a `gap` event carrying the number
/// of dropped changes. The stream ends when the platform shuts down or the
/// client disconnects.
pub async fn changes<A, C>(
    State(state): State<AppState<A, C>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>>
where
    A: Actuator + Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    let subscription = state.platform.get_switch_changes();
    tracing::debug!(subscription = %subscription.id(), "SSE client subscribed to switch changes");

    let items = futures::stream::unfold(subscription, |mut subscription| async move {
        let item = subscription.recv().await?;
        Some((item, subscription))
    });

    Sse::new(items.map(|item| to_sse_event(&item))).keep_alive(KeepAlive::default())
}

fn to_sse_event(item: &StreamItem) -> Result<Event, axum::Error> {
    match item {
        StreamItem::Change(event) => Event::default()
            .event("change")
            .id(event.sequence.to_string())
            .json_data(event),
        StreamItem::Gap { missed } => Event::default()
            .event("gap")
            .json_data(serde_json::json!({ "missed": missed })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::harness;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;

    fn transition(is_active: bool, timestamp: i64) -> SwitchTransitionRequest {
        SwitchTransitionRequest {
            switch_number: "S1".to_string(),
            is_active,
            timestamp,
        }
    }

    #[tokio::test]
    async fn should_report_transition_and_expose_state() {
        let h = harness();

        let Json(response) = report(State(h.state.clone()), Json(transition(true, 5)))
            .await
            .unwrap();
        assert!(response.changed);

        let Json(switch) = get(State(h.state.clone()), Path("S1".to_string()))
            .await
            .unwrap();
        assert!(switch.is_active);
        assert_eq!(switch.last_changed_at, Some(5));

        let Json(all) = list(State(h.state)).await;
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn should_map_stale_transition_to_conflict() {
        let h = harness();
        report(State(h.state.clone()), Json(transition(true, 50)))
            .await
            .unwrap();

        let err = report(State(h.state), Json(transition(false, 10)))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_stream_change_events_until_shutdown() {
        let h = harness();
        let mut body = changes(State(h.state.clone()))
            .await
            .into_response()
            .into_body();

        h.state
            .platform
            .report_transition(transition(true, 0))
            .await
            .unwrap();

        let frame = body.frame().await.unwrap().unwrap().into_data().unwrap();
        let text = String::from_utf8(frame.to_vec()).unwrap();
        assert!(text.contains("event: change"), "{text}");
        assert!(text.contains("id: 1"), "{text}");
        assert!(text.contains("\"switch_number\":\"S1\""), "{text}");

        h.state.platform.shutdown();
        assert!(body.frame().await.is_none());
    }

    #[test]
    fn should_encode_gap_as_named_event() {
        let event = to_sse_event(&StreamItem::Gap { missed: 4 });
        assert!(event.is_ok());
    }
}
