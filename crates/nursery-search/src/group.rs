use nursery_core::types::{SearchableItem, SuggestionGroup};

/// Bucket ranked items by entity type, keeping at most `per_group_limit`
/// per bucket. Buckets appear in the order their type first occurs.
pub fn group_by_type<I>(ranked: I, per_group_limit: usize) -> Vec<SuggestionGroup>
where
    I: IntoIterator<Item = SearchableItem>,
{
    let mut groups: Vec<SuggestionGroup> = Vec::new();
    if per_group_limit == 0 {
        return groups;
    }
    for item in ranked {
        let entity_type = item.entity_type();
        match groups.iter_mut().find(|g| g.entity_type == entity_type) {
            Some(group) if group.items.len() < per_group_limit => group.items.push(item),
            Some(_) => {}
            None => groups.push(SuggestionGroup { entity_type, items: vec![item] }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use nursery_core::types::{EntityDetails, EntityType};

    fn client(id: &str) -> SearchableItem {
        SearchableItem::new(id, id, EntityDetails::Client { contact: None, email: None, segment: "retail".into() })
    }

    fn order(id: &str) -> SearchableItem {
        SearchableItem::new(id, id, EntityDetails::Order { client: "c".into(), total: 0.0, line_items: 1 })
    }

    #[test]
    fn buckets_follow_first_occurrence_and_cap() {
        let ranked = vec![order("o1"), client("c1"), order("o2"), order("o3"), client("c2"), order("o4")];
        let groups = group_by_type(ranked, 2);

        let types: Vec<_> = groups.iter().map(|g| g.entity_type).collect();
        assert_eq!(types, [EntityType::Order, EntityType::Client]);

        let orders: Vec<_> = groups[0].items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(orders, ["o1", "o2"]);
        assert_eq!(groups[1].items.len(), 2);
    }

    #[test]
    fn zero_limit_yields_no_groups() {
        assert!(group_by_type(vec![client("c1")], 0).is_empty());
    }
}
