pub mod attempt_service;
pub mod chat_service;
pub mod extraction;
pub mod generation_client;
pub mod normalizer;
pub mod prompt;
pub mod quiz_service;
pub mod upload;
