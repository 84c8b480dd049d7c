// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - one service per backend resource.
//!
//! Every service is a thin, cloneable wrapper around [`ApiClient`]; auth,
//! refresh and error classification all happen underneath.

use crate::client::ApiClient;

pub mod admins;
pub mod ads;
pub mod analytics;
pub mod auth;
pub mod contact;
pub mod moderation;
pub mod pricing;
pub mod upload;
pub mod users;
pub mod wallet;
pub mod withdrawals;

pub use admins::AdminRosterService;
pub use ads::AdsService;
pub use analytics::AnalyticsService;
pub use auth::AuthService;
pub use contact::ContactService;
pub use moderation::ModerationService;
pub use pricing::PricingService;
pub use upload::{UploadService, UploadedFile};
pub use users::UserAdminService;
pub use wallet::WalletService;
pub use withdrawals::WithdrawalService;

/// Percent-encode an identifier for use as one path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// All services over one shared client.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub moderation: ModerationService,
    pub withdrawals: WithdrawalService,
    pub users: UserAdminService,
    pub admins: AdminRosterService,
    pub pricing: PricingService,
    pub analytics: AnalyticsService,
    pub wallet: WalletService,
    pub contact: ContactService,
    pub upload: UploadService,
    pub ads: AdsService,
}

impl Services {
    pub fn new(api: &ApiClient) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            moderation: ModerationService::new(api.clone()),
            withdrawals: WithdrawalService::new(api.clone()),
            users: UserAdminService::new(api.clone()),
            admins: AdminRosterService::new(api.clone()),
            pricing: PricingService::new(api.clone()),
            analytics: AnalyticsService::new(api.clone()),
            wallet: WalletService::new(api.clone()),
            contact: ContactService::new(api.clone()),
            upload: UploadService::new(api.clone()),
            ads: AdsService::new(api.clone()),
        }
    }
}
