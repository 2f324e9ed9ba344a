pub mod websocket_message_service;
pub mod websocket_server;
