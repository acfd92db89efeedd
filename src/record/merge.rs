//! Folding partial extractions into one record per business.
//!
//! Every scalar follows last-non-empty-wins: a later non-empty value replaces
//! the current one, an empty value never erases it. Locations are matched on
//! exact `(street, city)` equality. `extra_info` accumulates line by line.

use super::model::{
    Address, CombinedRecord, CompanyInfo, Contact, ExtractedRecord, Location, Social,
};
use std::collections::BTreeMap;
use tracing::trace;

/// Combined records keyed by entity name.
pub type CombinedMap = BTreeMap<String, CombinedRecord>;

/// Accumulator for a single merge pass.
#[derive(Debug, Default)]
pub struct RecordMerger {
    combined: CombinedMap,
}

impl RecordMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an ordered sequence of `(entity_name, record)` pairs.
    ///
    /// Arrival order decides which non-empty value wins and the order of
    /// `extra_info` lines.
    pub fn merge<I>(records: I) -> CombinedMap
    where
        I: IntoIterator<Item = (String, ExtractedRecord)>,
    {
        let mut merger = Self::new();
        for (name, record) in records {
            merger.absorb(&name, &record);
        }
        merger.into_map()
    }

    /// Return the combined record for `name`, creating the blank shape on first sight.
    pub fn entry(&mut self, name: &str) -> &mut CombinedRecord {
        self.combined.entry(name.to_string()).or_insert_with(|| {
            trace!("First record for '{}'", name);
            CombinedRecord::default()
        })
    }

    /// Merge one record into the accumulator.
    pub fn absorb(&mut self, name: &str, record: &ExtractedRecord) {
        self.entry(name).merge_from(record);
    }

    /// Whether a record for `name` has been seen.
    pub fn contains(&self, name: &str) -> bool {
        self.combined.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.combined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    /// Finish the pass and hand out the mapping.
    pub fn into_map(self) -> CombinedMap {
        self.combined
    }
}

impl CombinedRecord {
    /// Apply one extraction to this record.
    pub fn merge_from(&mut self, record: &ExtractedRecord) {
        self.company_info.merge_from(&record.company_info);
        self.contact.merge_from(&record.contact);

        for incoming in &record.locations {
            match self.locations.iter_mut().find(|l| l.same_place(incoming)) {
                Some(existing) => existing.merge_from(incoming),
                None => self.locations.push(incoming.clone()),
            }
        }

        if !record.extra_info.is_empty() {
            if !self.extra_info.is_empty() {
                self.extra_info.push('\n');
            }
            self.extra_info.push_str(&record.extra_info);
        }
    }
}

impl CompanyInfo {
    fn merge_from(&mut self, other: &CompanyInfo) {
        overwrite(&mut self.name, &other.name);
        overwrite(&mut self.description, &other.description);
        overwrite(&mut self.sector, &other.sector);
        overwrite(&mut self.founding_year, &other.founding_year);
    }
}

impl Contact {
    fn merge_from(&mut self, other: &Contact) {
        overwrite(&mut self.email, &other.email);
        overwrite(&mut self.phone, &other.phone);
        self.social.merge_from(&other.social);
    }
}

impl Social {
    fn merge_from(&mut self, other: &Social) {
        overwrite(&mut self.linkedin, &other.linkedin);
        overwrite(&mut self.twitter, &other.twitter);
        overwrite(&mut self.instagram, &other.instagram);
    }
}

impl Address {
    fn merge_from(&mut self, other: &Address) {
        overwrite(&mut self.street, &other.street);
        overwrite(&mut self.city, &other.city);
        overwrite(&mut self.region, &other.region);
        overwrite(&mut self.postal_code, &other.postal_code);
    }
}

impl Location {
    /// Exact, case-sensitive match on street and city.
    pub fn same_place(&self, other: &Location) -> bool {
        self.address.street == other.address.street && self.address.city == other.address.city
    }

    /// Shallow merge: `hours` is replaced as a whole when the incoming list is non-empty.
    pub fn merge_from(&mut self, other: &Location) {
        overwrite(&mut self.kind, &other.kind);
        self.address.merge_from(&other.address);
        if !other.hours.is_empty() {
            self.hours = other.hours.clone();
        }
    }
}

fn overwrite(target: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        incoming.clone_into(target);
    }
}
