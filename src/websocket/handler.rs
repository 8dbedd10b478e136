//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and runs the select → chart loop for
//! one connection. Each connection only reads the shared table, so there is
//! no hub or per-connection state beyond the socket itself.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::ops::ControlFlow;
use std::sync::Arc;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dashboard::build_chart;
use crate::data::PriceTable;

/// WebSocket upgrade handler
///
/// Entry point for the dashboard's reactive channel.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let table = Arc::clone(&state.table);
    ws.on_upgrade(move |socket| handle_socket(socket, table))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, table: Arc<PriceTable>) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    tracing::debug!(connection_id = %connection_id, "WebSocket connected");

    for message in initial_messages(&table, &connection_id) {
        if !send_message(&mut sender, &message).await {
            tracing::error!(connection_id = %connection_id, "Failed to send opening messages");
            return;
        }
    }

    while let Some(result) = receiver.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "WebSocket receive error"
                );
                break;
            }
        };

        match handle_ws_message(&table, &connection_id, message) {
            ControlFlow::Continue(Some(reply)) => {
                if !send_message(&mut sender, &reply).await {
                    tracing::debug!(
                        connection_id = %connection_id,
                        "WebSocket send failed, closing connection"
                    );
                    break;
                }
            }
            ControlFlow::Continue(None) => {}
            ControlFlow::Break(()) => break,
        }
    }

    tracing::debug!(connection_id = %connection_id, "WebSocket disconnected");
}

/// Serialize and send one message
///
/// Returns false if the socket is gone.
async fn send_message(sender: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    match serde_json::to_string(message) {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            true
        }
    }
}

/// Messages pushed right after the upgrade: the selector options, then the
/// chart for the default selection
fn initial_messages(table: &PriceTable, connection_id: &str) -> [ServerMessage; 2] {
    [
        ServerMessage::Connected {
            connection_id: connection_id.to_string(),
            symbols: table.symbols().to_vec(),
            default_symbol: table.default_symbol().to_string(),
        },
        chart_message(table, table.default_symbol()),
    ]
}

/// Build the chart reply for a selection
fn chart_message(table: &PriceTable, symbol: &str) -> ServerMessage {
    ServerMessage::Chart {
        symbol: symbol.to_string(),
        figure: build_chart(table, symbol),
    }
}

/// Handle a received WebSocket message
///
/// Breaks if the connection should be closed; otherwise yields the reply to
/// send, if any.
fn handle_ws_message(
    table: &PriceTable,
    connection_id: &str,
    message: Message,
) -> ControlFlow<(), Option<ServerMessage>> {
    match message {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => ControlFlow::Continue(Some(handle_client_message(
                table,
                connection_id,
                client_msg,
            ))),
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    text = %text,
                    "Invalid client message"
                );
                // Keep the connection open
                ControlFlow::Continue(Some(ServerMessage::Error {
                    message: format!("Invalid message format: {}", e),
                }))
            }
        },
        Message::Binary(_) => ControlFlow::Continue(Some(ServerMessage::Error {
            message: "Binary messages not supported".to_string(),
        })),
        // Axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => ControlFlow::Continue(None),
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            ControlFlow::Break(())
        }
    }
}

/// Handle a parsed client message
fn handle_client_message(
    table: &PriceTable,
    connection_id: &str,
    message: ClientMessage,
) -> ServerMessage {
    match message {
        ClientMessage::SelectSymbol { symbol } => {
            tracing::debug!(
                connection_id = %connection_id,
                symbol = %symbol,
                known = table.contains_symbol(&symbol),
                "Symbol selected"
            );
            chart_message(table, &symbol)
        }
        ClientMessage::Ping => ServerMessage::Pong,
    }
}
