use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::accept_async;

use crate::{
    models::{
        session_models::SessionError,
        websocket_message_model::{EditorAck, EditorMessage},
    },
    services::session_services::{
        session_cache_service::SessionCache, session_timer_service::SessionTimers,
    },
    utils::helper_utils::sanitize_code_content,
};

/// Accept loop for the editor channel. Each connection carries the edits of one
/// workspace; closing it is "navigating away" and tears the session down.
pub async fn run_websocket_server(
    addr: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = TcpListener::bind(addr).await?;
    println!("Editor channel listening on {}", addr);

    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(async move {
            match accept_async(stream).await {
                Ok(mut websocket) => {
                    println!("New editor connection");
                    let mut session_id: Option<String> = None;
                    while let Some(msg) = websocket.next().await {
                        match msg {
                            Ok(tungstenite::Message::Text(input_text)) => {
                                let text = sanitize_code_content(&input_text);
                                let reply = match serde_json::from_str::<EditorMessage>(&text) {
                                    Ok(message) => {
                                        session_id = Some(message.session_id.clone());
                                        handle_editor_message(&message)
                                    }
                                    Err(e) => {
                                        eprintln!("Failed to parse editor message: {}", e);
                                        format!("Error parsing message: {}", e)
                                    }
                                };
                                if let Err(e) =
                                    websocket.send(tungstenite::Message::Text(reply)).await
                                {
                                    eprintln!("WebSocket send error: {}", e);
                                    break;
                                }
                            }
                            Ok(tungstenite::Message::Close(_)) => {
                                println!("Editor connection closed");
                                close_connection(&mut websocket, session_id.as_deref()).await;
                                break;
                            }
                            Err(e) => {
                                eprintln!("WebSocket error: {}", e);
                                break;
                            }
                            _ => {}
                        }
                    }
                }
                Err(e) => {
                    eprintln!("Error during WebSocket handshake: {}", e);
                }
            }
        });
    }

    Ok(())
}

fn handle_editor_message(message: &EditorMessage) -> String {
    let cache = SessionCache::new();
    match cache.get_session_mut(&message.session_id) {
        Some(mut session) => match message.apply_to(&mut session) {
            Ok(()) => {
                let ack = EditorAck::for_session(&session);
                serde_json::to_string(&ack)
                    .unwrap_or_else(|e| format!("Error building ack: {}", e))
            }
            Err(e) => format!("Error: {}", e.message()),
        },
        None => format!(
            "Error: {}",
            SessionError::NotFound(message.session_id.clone()).message()
        ),
    }
}

/// The session dies with its connection: clock cancelled first, then the cache
/// entry dropped.
async fn close_connection(
    websocket: &mut tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>,
    session_id: Option<&str>,
) {
    if let Err(e) = websocket.send(tungstenite::Message::Close(None)).await {
        eprintln!("Error sending WebSocket close frame: {}", e);
    }

    if let Some(session_id) = session_id {
        SessionTimers::global().cancel(session_id);
        SessionCache::new().remove_session(session_id);
        println!("Session {} removed from cache", session_id);
    }
}
