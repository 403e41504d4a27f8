//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store access and routing into the sync use-case.
//! - Keep CLI and chat-layer callers decoupled from storage details.

pub mod sync_service;
