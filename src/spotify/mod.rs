//! # Spotify Integration Module
//!
//! The provider-facing layer: token acquisition and the authenticated
//! request gateway.
//!
//! ## Authentication Strategy
//!
//! The daemon uses OAuth 2.0 with PKCE, so no client secret is stored. The
//! one-time interactive consent produces a refresh token; afterwards
//! [`token::TokenExchanger`] mints fresh sessions silently with the
//! `refresh_token` grant, and the session manager decides which path to take.
//!
//! ## Request Path
//!
//! [`gateway::ApiGateway`] is the only way resource API calls leave the
//! process. It front-loads session validity, attaches the bearer credential,
//! and hands back a uniform status/message/data envelope; task bodies treat
//! non-2xx statuses as logical failures without any exception control flow.

pub mod gateway;
pub mod token;
