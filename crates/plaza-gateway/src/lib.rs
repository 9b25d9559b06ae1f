// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for plaza.
//!
//! Routes:
//! - `POST /api/hue-chat` - one exchange with the personality agent
//! - `POST /api/chat` - marketplace assistant
//! - `GET /api/catalog` - filtered listings
//! - `GET /api/catalog/facets` - seller and country filter options
//! - `GET /api/events` - calendar events by day or month
//! - `GET /health` - liveness and collaborator health

pub mod handlers;
pub mod server;

pub use server::{GatewayState, HealthState, router, start_server};
