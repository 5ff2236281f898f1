use nursery_core::types::{SearchFilters, SearchableItem};

/// Keep the items passing every present predicate, in corpus order.
///
/// An empty `types`, `status` or `sites` list is treated as absent and lets
/// every item through. Sites match by case-insensitive substring.
pub fn apply_filters(corpus: &[SearchableItem], filters: &SearchFilters) -> Vec<SearchableItem> {
    let sites: Vec<String> = filters.sites.iter().map(|s| s.to_lowercase()).collect();
    corpus
        .iter()
        .filter(|item| matches(item, filters, &sites))
        .cloned()
        .collect()
}

fn matches(item: &SearchableItem, filters: &SearchFilters, sites: &[String]) -> bool {
    let type_ok = filters.types.is_empty() || filters.types.contains(&item.entity_type());
    let status_ok = filters.status.is_empty()
        || item.status.as_ref().is_some_and(|s| filters.status.contains(s));
    let site_ok = sites.is_empty()
        || item.site.as_ref().is_some_and(|site| {
            let site = site.to_lowercase();
            sites.iter().any(|wanted| site.contains(wanted.as_str()))
        });
    type_ok && status_ok && site_ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use nursery_core::types::{EntityDetails, EntityType};

    fn batch(id: &str, status: &str, site: Option<&str>) -> SearchableItem {
        SearchableItem::new(
            id,
            id,
            EntityDetails::Batch { species: "Harakeke".into(), stage: "growing".into(), location: "A1".into(), quantity: 10 },
        )
        .with_status(Some(status))
        .with_site(site)
    }

    fn location(id: &str, site: &str) -> SearchableItem {
        SearchableItem::new(id, id, EntityDetails::Location { kind: "shadehouse".into(), capacity: None, active: false })
            .with_site(Some(site))
    }

    #[test]
    fn empty_filters_keep_everything_in_order() {
        let corpus = vec![batch("b1", "Good", None), location("l1", "North"), batch("b2", "Poor", None)];
        let ids: Vec<_> = apply_filters(&corpus, &SearchFilters::default()).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["b1", "l1", "b2"]);
    }

    #[test]
    fn predicates_are_and_combined() {
        let corpus = vec![
            batch("b1", "Good", Some("North Nursery")),
            batch("b2", "Poor", Some("North Nursery")),
            location("l1", "North Nursery"),
            batch("b3", "Good", Some("South Yard")),
        ];
        let filters = SearchFilters { types: vec![EntityType::Batch], status: vec!["Good".into()], sites: vec![] };
        let ids: Vec<_> = apply_filters(&corpus, &filters).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["b1", "b3"]);

        let filters = SearchFilters { sites: vec!["north".into()], ..filters };
        let ids: Vec<_> = apply_filters(&corpus, &filters).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["b1"]);
    }

    #[test]
    fn site_filter_excludes_items_without_site() {
        let corpus = vec![batch("b1", "Good", None), location("l1", "Southern Depot")];
        let filters = SearchFilters { sites: vec!["DEPOT".into(), "east".into()], ..Default::default() };
        let ids: Vec<_> = apply_filters(&corpus, &filters).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["l1"]);
    }
}
