use anyhow::{Context, Result};
use axum::extract::ws::{self, WebSocket};
use axum::extract::{Json, State, WebSocketUpgrade};
use axum::response::{ErrorResponse, Response};
use axum::routing::{any, post};
use axum::Router;
use futures_util::stream::StreamExt as _;
use http::StatusCode;
use log::{debug, info};
use responder::ResponseSelector;
use serde::{Deserialize, Serialize};
use soulguide::message_bus::{Message, MessageBus, UiCommand};
use soulguide::{store, SoulGuide};
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::signal;
use tower_http::services::ServeDir;
use utils::{print_err, unwrap_or_def_verbose, ResultExt as _};

mod logging;
mod soulguide;
mod utils;

struct AppState {
    message_bus: MessageBus,
}

type AppStateArg = State<Arc<AppState>>;

async fn initialize_ui(State(state): AppStateArg) {
    debug!("initialize_ui");
    state.message_bus.send(UiCommand::InitializeUi.into());
}

#[derive(Debug, Deserialize)]
struct UpdateDraft {
    text: String,
}
async fn update_draft(State(state): AppStateArg, Json(body): Json<UpdateDraft>) {
    state
        .message_bus
        .send(UiCommand::UpdateDraft(body.text).into());
}

#[derive(Debug, Deserialize)]
struct QuickQuestion {
    question: String,
}
async fn quick_question(State(state): AppStateArg, Json(body): Json<QuickQuestion>) {
    debug!("quick_question({body:?})");
    state
        .message_bus
        .send(UiCommand::QuickQuestion(body.question).into());
}

fn bad_request(msg: impl Display) -> ErrorResponse {
    (StatusCode::BAD_REQUEST, msg.to_string()).into()
}

#[derive(Debug, Deserialize)]
struct SendMessage {
    text: String,
}
async fn send_message(
    State(state): AppStateArg,
    Json(body): Json<SendMessage>,
) -> axum::response::Result<()> {
    debug!("send_message({body:?})");
    if body.text.trim().is_empty() {
        return Err(bad_request("Message must not be empty"));
    }
    state
        .message_bus
        .send(UiCommand::SendMessage(body.text).into());
    Ok(())
}

async fn create_ui_event_stream(ws: WebSocketUpgrade, State(state): AppStateArg) -> Response {
    ws.on_upgrade(move |socket| ui_event_stream(socket, state.message_bus.clone()))
}

fn wrap_result<T: Serialize, E: Display>(
    r: std::result::Result<T, E>,
) -> std::result::Result<ws::Message, axum::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    enum WrappedResult<T> {
        Success(T),
        Error(String),
    }
    let wrapped_result = match r {
        Ok(data) => WrappedResult::Success(data),
        Err(e) => WrappedResult::Error(e.to_string()),
    };
    let json_text = serde_json::to_string_pretty(&wrapped_result)
        .unwrap_or_else(|e| format!("{{ \"error\": \"JSON serialization failed: {e}\" }}"));
    Ok(ws::Message::text(json_text))
}

async fn ui_event_stream(socket: WebSocket, message_bus: MessageBus) {
    debug!("ui_event_stream");
    let stream = message_bus.subscribe().ui_update_stream().map(wrap_result);
    let _ = stream.forward(socket).await.inspect_err(print_err);
}

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _>>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    futures_util::future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() -> Result<()> {
    let _logger = logging::init();
    let config = unwrap_or_def_verbose(store::load_config());
    let selector = unwrap_or_def_verbose(store::load_responses().map(ResponseSelector::new));
    let message_bus = MessageBus::new();
    let soulguide = SoulGuide::new(&config, selector, message_bus.clone());
    let soulguide_task = tokio::spawn(soulguide.dispatch_messages(message_bus.subscribe()));

    let shared_state = Arc::new(AppState {
        message_bus: message_bus.clone(),
    });
    let app = Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .route("/ui_stream", any(create_ui_event_stream))
                .route("/initialize_ui", post(initialize_ui))
                .route("/update_draft", post(update_draft))
                .route("/quick_question", post(quick_question))
                .route("/send_message", post(send_message))
                .with_state(shared_state),
        )
        .fallback_service(ServeDir::new(&config.static_serving_dir));
    let listener = tokio::net::TcpListener::bind(&config.serving_addr)
        .await
        .with_context(|| format!("Cannot listen on {}", config.serving_addr))?;
    tokio::spawn(async { axum::serve(listener, app).await });

    info!("Running on {}", config.serving_addr);
    terminate_on_signal().await.print_err();
    info!("Terminating.");
    message_bus.send(Message::UiCommand(UiCommand::CloseApplication));

    debug!("Waiting for workers to stop...");
    let _ = soulguide_task.await.inspect_err(print_err);
    debug!("All workers stopped.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse as _;
    use soulguide::message_bus::MessageBusSubscription;
    use std::time::Duration;
    use tokio::time::timeout;

    async fn nothing_sent(subscription: &mut MessageBusSubscription) -> bool {
        timeout(Duration::from_millis(10), subscription.recv())
            .await
            .is_err()
    }

    #[tokio::test]
    async fn send_message_rejects_blank_text() {
        let message_bus = MessageBus::new();
        let mut subscription = message_bus.subscribe();
        let state = State(Arc::new(AppState {
            message_bus: message_bus.clone(),
        }));

        let body = Json(SendMessage { text: " \n ".into() });
        let Err(err) = send_message(state, body).await else {
            panic!("blank message accepted");
        };
        assert_eq!(Err::<(), _>(err).into_response().status(), StatusCode::BAD_REQUEST);
        assert!(nothing_sent(&mut subscription).await);
    }

    #[tokio::test]
    async fn send_message_forwards_text_to_bus() {
        let message_bus = MessageBus::new();
        let mut subscription = message_bus.subscribe();
        let state = State(Arc::new(AppState {
            message_bus: message_bus.clone(),
        }));

        let body = Json(SendMessage {
            text: "Tell me about chakras".into(),
        });
        assert!(send_message(state, body).await.is_ok());

        let message = subscription.recv().await;
        assert!(
            matches!(
                &message,
                Some(Message::UiCommand(UiCommand::SendMessage(text))) if text == "Tell me about chakras"
            ),
            "{message:?}"
        );
        assert!(nothing_sent(&mut subscription).await);
    }
}
