pub mod gateway_service;
pub mod judge_client_service;
