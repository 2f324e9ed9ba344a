pub mod auth_services;

pub mod cleanup_service;

pub mod execution_services;

pub mod session_services;


pub mod websocket;
pub mod validation_services;
