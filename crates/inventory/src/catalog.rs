//! In-memory catalog of item cards.
//!
//! The catalog owns the cards and the identifier counter. It keys cards
//! through [`Entity::id`] only; all field rules live on [`ItemCard`].

use serde::{Deserialize, Serialize};

use stockcard_core::{DomainError, DomainResult, Entity, ItemId, ValidationError};

use crate::item::{ItemCard, ItemStatus, NewItem};

/// Editable field of an item card, in the order updates are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Name,
    Quantity,
    Status,
    Supplier,
    Manufacturer,
    Price,
    Location,
    Category,
    MinStock,
}

/// Field changes for [`Catalog::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    pub status: Option<ItemStatus>,
    pub supplier: Option<String>,
    pub manufacturer: Option<String>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub min_stock: Option<i64>,
}

impl ItemChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of an update on an editable card.
///
/// Fields are applied one at a time; a failure does not undo fields that
/// were already applied, nor stop the ones after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub applied: Vec<ItemField>,
    pub failures: Vec<(ItemField, ValidationError)>,
}

impl UpdateReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, field: ItemField, result: Result<(), ValidationError>) {
        match result {
            Ok(()) => self.applied.push(field),
            Err(e) => self.failures.push((field, e)),
        }
    }
}

/// Ordered collection of item cards plus identifier assignment.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<ItemCard>,
    next_id: ItemId,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: ItemId::FIRST,
        }
    }

    /// Identifier the next successful [`Catalog::create`] will assign.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Create a card under the next identifier and append it.
    ///
    /// On validation failure neither the counter nor the collection changes.
    pub fn create(&mut self, item: NewItem) -> Result<&ItemCard, ValidationError> {
        let id = self.next_id;
        let card = ItemCard::create(id, item).inspect_err(|e| {
            tracing::warn!(item_id = %id, reason = %e, "item card rejected");
        })?;

        self.next_id = id.next();
        self.items.push(card);
        tracing::info!(item_id = %id, "item card created");

        let idx = self.items.len() - 1;
        Ok(&self.items[idx])
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<&ItemCard> {
        let found = self.items.iter().find(|card| card.id() == id);
        if found.is_none() {
            tracing::debug!(item_id = %id, "item card not found");
        }
        found
    }

    /// Mutable lookup for drivers that call setters directly.
    ///
    /// Unlike [`Catalog::update`], this does not refuse written-off cards.
    pub fn find_by_id_mut(&mut self, id: ItemId) -> Option<&mut ItemCard> {
        let found = self.items.iter_mut().find(|card| card.id() == id);
        if found.is_none() {
            tracing::debug!(item_id = %id, "item card not found");
        }
        found
    }

    /// All cards in insertion order. Each call starts a fresh pass.
    pub fn iter(&self) -> core::slice::Iter<'_, ItemCard> {
        self.items.iter()
    }

    /// Apply `changes` to the card with `id`, field by field.
    ///
    /// Fails with `NotFound` for an unknown id and `WrittenOff` for a card
    /// already written off (nothing is touched in either case). Otherwise
    /// returns a report listing applied and failed fields.
    pub fn update(&mut self, id: ItemId, changes: ItemChanges) -> DomainResult<UpdateReport> {
        let card = self
            .find_by_id_mut(id)
            .ok_or_else(|| DomainError::not_found(id))?;

        if card.is_written_off() {
            tracing::warn!(item_id = %id, "edit of written-off item card refused");
            return Err(DomainError::written_off(id));
        }

        let mut report = UpdateReport::default();
        if let Some(v) = changes.name {
            report.record(ItemField::Name, card.set_name(&v));
        }
        if let Some(v) = changes.quantity {
            report.record(ItemField::Quantity, card.set_quantity(v));
        }
        if let Some(v) = changes.status {
            report.record(ItemField::Status, card.set_status(v));
        }
        if let Some(v) = changes.supplier {
            report.record(ItemField::Supplier, card.set_supplier(&v));
        }
        if let Some(v) = changes.manufacturer {
            report.record(ItemField::Manufacturer, card.set_manufacturer(&v));
        }
        if let Some(v) = changes.price {
            report.record(ItemField::Price, card.set_price(v));
        }
        if let Some(v) = changes.location {
            report.record(ItemField::Location, card.set_location(&v));
        }
        if let Some(v) = changes.category {
            report.record(ItemField::Category, card.set_category(&v));
        }
        if let Some(v) = changes.min_stock {
            report.record(ItemField::MinStock, card.set_min_stock(v));
        }

        for (field, reason) in &report.failures {
            tracing::warn!(item_id = %id, ?field, %reason, "item card field rejected");
        }
        tracing::info!(
            item_id = %id,
            applied = report.applied.len(),
            failed = report.failures.len(),
            "item card updated"
        );
        Ok(report)
    }

    /// Write off the card with `id`.
    pub fn write_off(&mut self, id: ItemId) -> DomainResult<&ItemCard> {
        let card = self
            .find_by_id_mut(id)
            .ok_or_else(|| DomainError::not_found(id))?;

        if let Err(e) = card.write_off() {
            tracing::warn!(item_id = %id, reason = %e, "write-off refused");
            return Err(e.into());
        }
        tracing::info!(item_id = %id, "item card written off");
        Ok(&*card)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ItemCard;
    type IntoIter = core::slice::Iter<'a, ItemCard>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
