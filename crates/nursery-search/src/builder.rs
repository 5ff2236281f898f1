//! Projection of raw source collections into the unified corpus.
//!
//! Species are derived from batches rather than stored: every distinct
//! species name becomes one item whose popularity is its batch count.
//! Locations are indexed whether or not they are active.
use chrono::{DateTime, NaiveDate, Utc};
use nursery_core::sources::{
    BatchRecord, ClientRecord, InvoiceRecord, LocationRecord, OrderRecord, PersonRecord, QuoteRecord,
    SourceCollections, TaskRecord,
};
use nursery_core::types::{EntityDetails, EntityType, SearchableItem, DEFAULT_POPULARITY};
use tracing::debug;

const BATCH_POPULARITY_DIVISOR: f64 = 1000.0;

pub struct IndexBuilder {
    types: Vec<EntityType>,
}

impl Default for IndexBuilder {
    fn default() -> Self { Self::new() }
}

impl IndexBuilder {
    pub fn new() -> Self { Self { types: EntityType::ALL.to_vec() } }

    /// Only project the given entity types.
    pub fn with_types(types: impl IntoIterator<Item = EntityType>) -> Self {
        Self { types: types.into_iter().collect() }
    }

    fn wants(&self, entity_type: EntityType) -> bool { self.types.contains(&entity_type) }

    pub fn build(&self, sources: &SourceCollections) -> Vec<SearchableItem> {
        let mut corpus = Vec::with_capacity(sources.total_records());
        if self.wants(EntityType::Species) { corpus.extend(species_items(&sources.batches)); }
        if self.wants(EntityType::Batch) { corpus.extend(sources.batches.iter().map(batch_item)); }
        if self.wants(EntityType::Task) { corpus.extend(sources.tasks.iter().map(task_item)); }
        if self.wants(EntityType::Location) { corpus.extend(sources.locations.iter().map(location_item)); }
        if self.wants(EntityType::Person) { corpus.extend(sources.people.iter().map(person_item)); }
        if self.wants(EntityType::Client) { corpus.extend(sources.clients.iter().map(client_item)); }
        if self.wants(EntityType::Order) { corpus.extend(sources.orders.iter().map(order_item)); }
        if self.wants(EntityType::Quote) { corpus.extend(sources.quotes.iter().map(quote_item)); }
        if self.wants(EntityType::Invoice) { corpus.extend(sources.invoices.iter().map(invoice_item)); }

        for entity_type in &self.types {
            let count = corpus.iter().filter(|i| i.entity_type() == *entity_type).count();
            debug!(entity_type = %entity_type, count, "indexed");
        }
        corpus
    }
}

/// Lowercase with each whitespace run replaced by `-`.
pub fn slugify(name: &str) -> String {
    name.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("-")
}

fn midnight(date: Option<NaiveDate>) -> Option<DateTime<Utc>> {
    date.and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

struct SpeciesAcc<'a> {
    name: &'a str,
    batch_count: usize,
    total_quantity: u64,
    sites: Vec<String>,
}

fn species_items(batches: &[BatchRecord]) -> Vec<SearchableItem> {
    let mut acc: Vec<SpeciesAcc<'_>> = Vec::new();
    for batch in batches {
        let name = batch.species.trim();
        if name.is_empty() { continue; }
        let idx = match acc.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                acc.push(SpeciesAcc { name, batch_count: 0, total_quantity: 0, sites: Vec::new() });
                acc.len() - 1
            }
        };
        let entry = &mut acc[idx];
        entry.batch_count += 1;
        entry.total_quantity += u64::from(batch.quantity);
        if let Some(site) = &batch.site {
            if !entry.sites.contains(site) { entry.sites.push(site.clone()); }
        }
    }

    acc.into_iter()
        .map(|s| {
            let description = format!("{} batches across {} sites", s.batch_count, s.sites.len());
            SearchableItem::new(
                slugify(s.name),
                s.name,
                EntityDetails::Species { batch_count: s.batch_count, total_quantity: s.total_quantity, sites: s.sites },
            )
            .with_aliases([s.name])
            .with_tags(["species"])
            .with_description(description)
            .with_popularity(s.batch_count as f64)
        })
        .collect()
}

fn batch_item(b: &BatchRecord) -> SearchableItem {
    SearchableItem::new(
        b.id.clone(),
        format!("{} - {}", b.species, b.id),
        EntityDetails::Batch { species: b.species.clone(), stage: b.stage.clone(), location: b.location.clone(), quantity: b.quantity },
    )
    .with_aliases([b.id.as_str(), b.species.as_str()])
    .with_tags([b.stage.as_str(), b.status.as_str()])
    .with_description(format!("{} plants at {}", b.quantity, b.location))
    .with_site(b.site.as_deref())
    .with_status(non_empty(&b.status))
    .with_created(midnight(b.planted))
    .with_popularity(f64::from(b.quantity) / BATCH_POPULARITY_DIVISOR)
}

fn task_item(t: &TaskRecord) -> SearchableItem {
    let mut aliases = vec![t.id.clone()];
    aliases.extend(t.batch_id.iter().cloned());
    SearchableItem::new(
        t.id.clone(),
        t.title.clone(),
        EntityDetails::Task { due: t.due, priority: t.priority.clone(), assignee: t.assignee.clone(), batch_id: t.batch_id.clone() },
    )
    .with_aliases(aliases)
    .with_tags([t.due.as_str(), t.priority.as_str()])
    .with_description(t.description.clone())
    .with_site(t.site.as_deref())
    .with_status(Some(t.due.as_str()))
    .with_created(midnight(t.created))
    .with_popularity(t.due.urgency())
}

fn location_item(l: &LocationRecord) -> SearchableItem {
    let activity = if l.active { "active" } else { "inactive" };
    let description = match l.capacity {
        Some(capacity) => format!("{} with capacity {}", l.kind, capacity),
        None => l.kind.clone(),
    };
    SearchableItem::new(
        l.id.clone(),
        l.name.clone(),
        EntityDetails::Location { kind: l.kind.clone(), capacity: l.capacity, active: l.active },
    )
    .with_aliases([l.id.as_str()])
    .with_tags([l.kind.as_str(), activity])
    .with_description(description)
    .with_site(l.site.as_deref())
    .with_status(Some(activity))
    .with_popularity(DEFAULT_POPULARITY)
}

fn person_item(p: &PersonRecord) -> SearchableItem {
    let mut aliases = vec![p.id.clone()];
    aliases.extend(p.email.iter().cloned());
    SearchableItem::new(p.id.clone(), p.name.clone(), EntityDetails::Person { role: p.role.clone(), email: p.email.clone() })
        .with_aliases(aliases)
        .with_tags([p.role.as_str()])
        .with_description(p.role.clone())
        .with_site(p.site.as_deref())
}

fn client_item(c: &ClientRecord) -> SearchableItem {
    let mut aliases = vec![c.id.clone()];
    aliases.extend(c.contact.iter().cloned());
    aliases.extend(c.email.iter().cloned());
    SearchableItem::new(
        c.id.clone(),
        c.name.clone(),
        EntityDetails::Client { contact: c.contact.clone(), email: c.email.clone(), segment: c.segment.clone() },
    )
    .with_aliases(aliases)
    .with_tags([c.segment.as_str()])
    .with_description(c.contact.clone().unwrap_or_default())
    .with_site(c.site.as_deref())
    .with_status(c.status.as_deref())
}

fn order_item(o: &OrderRecord) -> SearchableItem {
    SearchableItem::new(
        o.id.clone(),
        format!("{} - {}", o.id, o.client),
        EntityDetails::Order { client: o.client.clone(), total: o.total, line_items: o.line_items },
    )
    .with_aliases([o.id.as_str(), o.client.as_str()])
    .with_tags([o.status.as_str()])
    .with_description(format!("{} items, ${:.2}", o.line_items, o.total))
    .with_site(o.site.as_deref())
    .with_status(non_empty(&o.status))
    .with_created(midnight(o.created))
}

fn quote_item(q: &QuoteRecord) -> SearchableItem {
    SearchableItem::new(
        q.id.clone(),
        format!("{} - {}", q.id, q.client),
        EntityDetails::Quote { client: q.client.clone(), total: q.total, valid_until: q.valid_until },
    )
    .with_aliases([q.id.as_str(), q.client.as_str()])
    .with_tags([q.status.as_str()])
    .with_description(format!("${:.2}", q.total))
    .with_status(non_empty(&q.status))
    .with_created(midnight(q.created))
}

fn invoice_item(i: &InvoiceRecord) -> SearchableItem {
    let mut aliases = vec![i.id.clone(), i.client.clone()];
    aliases.extend(i.order_id.iter().cloned());
    SearchableItem::new(
        i.id.clone(),
        format!("{} - {}", i.id, i.client),
        EntityDetails::Invoice { client: i.client.clone(), order_id: i.order_id.clone(), total: i.total, due_date: i.due_date },
    )
    .with_aliases(aliases)
    .with_tags([i.status.as_str()])
    .with_description(format!("${:.2}", i.total))
    .with_status(non_empty(&i.status))
    .with_created(midnight(i.created))
}
