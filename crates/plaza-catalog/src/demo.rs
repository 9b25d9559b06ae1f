// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in sample data served when no catalog source is configured.

use chrono::{DateTime, Duration, Utc};

use crate::events::CalendarEvent;
use crate::item::{CatalogItem, Category};

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    title: &str,
    price: f64,
    category: Category,
    seller: &str,
    country: &str,
    views: u64,
    likes: u64,
) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        price,
        category,
        seller: Some(seller.to_string()),
        country: Some(country.to_string()),
        brand: None,
        views,
        likes,
    }
}

/// Sample marketplace listings.
pub fn demo_catalog() -> Vec<CatalogItem> {
    use Category::*;
    vec![
        item("1", "Minimalist Tee", 45.0, Clothing, "STUDIO_MINIMAL", "Japan", 1247, 89),
        item("2", "Abstract Print", 85.0, Art, "BERLIN_COLLECTIVE", "Germany", 892, 156),
        item("3", "Design Notebook", 25.0, Accessories, "CRAFT_STUDIO", "Italy", 2341, 287),
        item("4", "Classic Tote", 120.0, Accessories, "LUXURY_CURATOR", "France", 634, 45),
        item("5", "Wool Sweater", 95.0, Clothing, "NORDIC_THREADS", "Sweden", 1567, 234),
        item("6", "Ceramic Vase", 65.0, Art, "ATELIER_CLAY", "Portugal", 743, 67),
        item("7", "Vintage Denim", 75.0, Clothing, "STUDIO_MINIMAL", "Japan", 1124, 156),
        item("8", "Modern Sculpture", 320.0, Art, "BERLIN_COLLECTIVE", "Germany", 567, 78),
    ]
}

/// Sample events: a showcase now and an artist talk one day later.
pub fn demo_events(now: DateTime<Utc>) -> Vec<CalendarEvent> {
    let tomorrow = now + Duration::days(1);
    vec![
        CalendarEvent {
            id: "1".to_string(),
            title: "plaza showcase".to_string(),
            start_date: now,
            end_date: now,
            description: "monthly curated collection reveal".to_string(),
            color: Some("black".to_string()),
        },
        CalendarEvent {
            id: "2".to_string(),
            title: "artist talk".to_string(),
            start_date: tomorrow,
            end_date: tomorrow,
            description: "contemporary digital art discussion".to_string(),
            color: Some("gray".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_ids_are_unique() {
        let items = demo_catalog();
        let mut ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn demo_events_are_a_day_apart() {
        let now = Utc::now();
        let events = demo_events(now);
        assert_eq!(events[1].start_date - events[0].start_date, Duration::days(1));
    }
}
