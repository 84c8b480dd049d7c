// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Typed payloads of the admin backend.

pub mod ad;
pub mod analytics;
pub mod auth;
pub mod bot;
pub mod common;
pub mod contact;
pub mod pricing;
pub mod user;
pub mod wallet;

pub use ad::{Ad, AdStatsRow, AdStatus};
pub use analytics::{AdminAnalytics, AdminStats, ChartPoint};
pub use auth::{LoginInit, LoginStatus};
pub use bot::{Bot, BotStatus};
pub use common::{Envelope, MaybeEnveloped, PageParams, Paginated};
pub use contact::{ContactMessage, ContactMessages, ContactStatus};
pub use pricing::{PlatformFee, PricingTier, PricingTierDraft};
pub use user::{Role, UserProfile};
pub use wallet::{BalanceCheck, LedgerEntry, WalletBalance, WalletTransaction};
