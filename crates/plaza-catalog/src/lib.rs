// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketplace catalog: item filtering, filter facets, and calendar events.
//!
//! Everything here is pure and synchronous; callers own the data source.

pub mod demo;
pub mod events;
pub mod filter;
pub mod item;

pub use demo::{demo_catalog, demo_events};
pub use events::{CalendarEvent, events_in_month, events_on};
pub use filter::{CatalogFilter, Facets, ListingState, Selection, facets};
pub use item::{CatalogItem, Category};
