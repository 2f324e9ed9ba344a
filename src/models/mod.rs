pub mod auth_models;
pub mod code_editor_models;
pub mod language_models;
pub mod session_models;
pub mod submission_models;
pub mod validation_models;
pub mod websocket_message_model;
