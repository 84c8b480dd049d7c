// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Akhmads admin: API client for the ad-marketplace admin console
//!
//! This crate talks to the Akhmads backend on behalf of a moderator or
//! administrator. Every call carries the session's bearer token; an expired
//! access token is refreshed once (shared by all concurrent callers) and the
//! request is replayed, and a failed refresh ends the session.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

use client::ApiClient;
use config::Config;
use error::ApiError;
use services::Services;
use session::Session;

/// Everything a console front end needs: config, session, client, services.
#[derive(Clone)]
pub struct Console {
    pub config: Config,
    pub session: Session,
    pub api: ApiClient,
    pub services: Services,
}

impl Console {
    pub fn new(config: Config, session: Session) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config, session.clone())?;
        let services = Services::new(&api);
        Ok(Self {
            config,
            session,
            api,
            services,
        })
    }
}
