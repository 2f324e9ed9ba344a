pub mod code_editor_service;
pub mod session_cache_service;
pub mod session_service;
pub mod session_timer_service;
