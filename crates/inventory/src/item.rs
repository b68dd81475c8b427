use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockcard_core::{Entity, ItemId, ValidationError};

/// Item card status lifecycle.
///
/// `Received -> WrittenOff` goes through [`ItemCard::write_off`]. `Reserved` is
/// only ever reached by an explicit [`ItemCard::set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Received,
    Reserved,
    WrittenOff,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [
        ItemStatus::Received,
        ItemStatus::Reserved,
        ItemStatus::WrittenOff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Received => "received",
            ItemStatus::Reserved => "reserved",
            ItemStatus::WrittenOff => "written_off",
        }
    }
}

impl core::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "received" => Ok(ItemStatus::Received),
            "reserved" => Ok(ItemStatus::Reserved),
            "written_off" | "written-off" | "writtenoff" => Ok(ItemStatus::WrittenOff),
            _ => Err(ValidationError::new(
                "status must be one of: received, reserved, written_off",
            )),
        }
    }
}

/// Payload for creating an item card (everything except id and status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub quantity: i64,
    pub supplier: String,
    pub manufacturer: String,
    pub price: f64,
    pub location: String,
    pub category: String,
    #[serde(default)]
    pub min_stock: i64,
}

impl NewItem {
    /// Payload with `min_stock` left at 0.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        supplier: impl Into<String>,
        manufacturer: impl Into<String>,
        price: f64,
        location: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            supplier: supplier.into(),
            manufacturer: manufacturer.into(),
            price,
            location: location.into(),
            category: category.into(),
            min_stock: 0,
        }
    }

    pub fn with_min_stock(mut self, min_stock: i64) -> Self {
        self.min_stock = min_stock;
        self
    }
}

/// Entity: ItemCard.
///
/// Fields are private; every mutation goes through a setter that validates
/// its own field only. String fields are stored trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemCard {
    id: ItemId,
    name: String,
    quantity: i64,
    status: ItemStatus,
    supplier: String,
    manufacturer: String,
    price: f64,
    location: String,
    category: String,
    min_stock: i64,
}

impl ItemCard {
    /// Build a card in `Received` status.
    ///
    /// Fails on the first field that breaks its constraint; nothing is built
    /// in that case.
    pub fn create(id: ItemId, item: NewItem) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: non_empty("name", &item.name)?,
            quantity: non_negative("quantity", item.quantity)?,
            status: ItemStatus::Received,
            supplier: non_empty("supplier", &item.supplier)?,
            manufacturer: non_empty("manufacturer", &item.manufacturer)?,
            price: valid_price(item.price)?,
            location: non_empty("location", &item.location)?,
            category: non_empty("category", &item.category)?,
            min_stock: non_negative("minimum stock", item.min_stock)?,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn min_stock(&self) -> i64 {
        self.min_stock
    }

    pub fn is_written_off(&self) -> bool {
        self.status == ItemStatus::WrittenOff
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ValidationError> {
        self.name = non_empty("name", name)?;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ValidationError> {
        self.quantity = non_negative("quantity", quantity)?;
        Ok(())
    }

    /// Set the status directly.
    ///
    /// This does not go through the write-off rules: moving to `WrittenOff`
    /// here keeps the current quantity. Text input is validated when it is
    /// parsed into an [`ItemStatus`].
    pub fn set_status(&mut self, status: ItemStatus) -> Result<(), ValidationError> {
        self.status = status;
        Ok(())
    }

    pub fn set_supplier(&mut self, supplier: &str) -> Result<(), ValidationError> {
        self.supplier = non_empty("supplier", supplier)?;
        Ok(())
    }

    pub fn set_manufacturer(&mut self, manufacturer: &str) -> Result<(), ValidationError> {
        self.manufacturer = non_empty("manufacturer", manufacturer)?;
        Ok(())
    }

    pub fn set_price(&mut self, price: f64) -> Result<(), ValidationError> {
        self.price = valid_price(price)?;
        Ok(())
    }

    pub fn set_location(&mut self, location: &str) -> Result<(), ValidationError> {
        self.location = non_empty("location", location)?;
        Ok(())
    }

    pub fn set_category(&mut self, category: &str) -> Result<(), ValidationError> {
        self.category = non_empty("category", category)?;
        Ok(())
    }

    pub fn set_min_stock(&mut self, min_stock: i64) -> Result<(), ValidationError> {
        self.min_stock = non_negative("minimum stock", min_stock)?;
        Ok(())
    }

    /// Write the item off: status becomes `WrittenOff` and quantity drops to 0.
    ///
    /// Only a `Received` card can be written off, so a second call fails.
    pub fn write_off(&mut self) -> Result<(), ValidationError> {
        if self.status != ItemStatus::Received {
            return Err(ValidationError::new(
                "only items with status received can be written off",
            ));
        }
        self.status = ItemStatus::WrittenOff;
        self.quantity = 0;
        Ok(())
    }
}

impl Entity for ItemCard {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }
}

fn non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn non_negative(field: &str, value: i64) -> Result<i64, ValidationError> {
    if value < 0 {
        return Err(ValidationError::new(format!("{field} cannot be negative")));
    }
    Ok(value)
}

fn valid_price(price: f64) -> Result<f64, ValidationError> {
    if !price.is_finite() {
        return Err(ValidationError::new("price must be a finite number"));
    }
    if price < 0.0 {
        return Err(ValidationError::new("price cannot be negative"));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bolt() -> NewItem {
        NewItem::new("Bolt", 100, "Acme", "Acme", 0.5, "A1", "Hardware").with_min_stock(10)
    }

    fn bolt_card() -> ItemCard {
        ItemCard::create(ItemId::FIRST, bolt()).unwrap()
    }

    #[test]
    fn create_forces_received_status() {
        let card = bolt_card();
        assert_eq!(card.id_typed(), ItemId::FIRST);
        assert_eq!(card.status(), ItemStatus::Received);
        assert_eq!(card.name(), "Bolt");
        assert_eq!(card.quantity(), 100);
        assert_eq!(card.supplier(), "Acme");
        assert_eq!(card.manufacturer(), "Acme");
        assert_eq!(card.price(), 0.5);
        assert_eq!(card.location(), "A1");
        assert_eq!(card.category(), "Hardware");
        assert_eq!(card.min_stock(), 10);
    }

    #[test]
    fn create_trims_string_fields() {
        let mut item = bolt();
        item.name = "  Bolt M6 ".to_string();
        item.location = "\tA1\n".to_string();
        let card = ItemCard::create(ItemId::FIRST, item).unwrap();
        assert_eq!(card.name(), "Bolt M6");
        assert_eq!(card.location(), "A1");
    }

    #[test]
    fn min_stock_defaults_to_zero() {
        let item = NewItem::new("Nut", 5, "Acme", "Acme", 0.1, "B2", "Hardware");
        let card = ItemCard::create(ItemId::FIRST, item).unwrap();
        assert_eq!(card.min_stock(), 0);
    }

    #[test]
    fn create_rejects_blank_strings() {
        let blanks: [fn(&mut NewItem); 5] = [
            |i| i.name = "   ".into(),
            |i| i.supplier = String::new(),
            |i| i.manufacturer = "\t".into(),
            |i| i.location = " ".into(),
            |i| i.category = "\n".into(),
        ];
        for blank in blanks {
            let mut item = bolt();
            blank(&mut item);
            let err = ItemCard::create(ItemId::FIRST, item).unwrap_err();
            assert!(err.message().ends_with("cannot be empty"), "{err}");
        }
    }

    #[test]
    fn create_rejects_negative_numbers() {
        let err = ItemCard::create(ItemId::FIRST, NewItem { quantity: -1, ..bolt() }).unwrap_err();
        assert_eq!(err.message(), "quantity cannot be negative");

        let err = ItemCard::create(ItemId::FIRST, NewItem { price: -0.01, ..bolt() }).unwrap_err();
        assert_eq!(err.message(), "price cannot be negative");

        let err = ItemCard::create(ItemId::FIRST, bolt().with_min_stock(-3)).unwrap_err();
        assert_eq!(err.message(), "minimum stock cannot be negative");
    }

    #[test]
    fn create_accepts_zero_values() {
        let card = ItemCard::create(
            ItemId::FIRST,
            NewItem { quantity: 0, price: 0.0, ..bolt() }.with_min_stock(0),
        )
        .unwrap();
        assert_eq!(card.quantity(), 0);
        assert_eq!(card.price(), 0.0);
    }

    #[test]
    fn price_rejects_nan_and_infinity() {
        let mut card = bolt_card();
        assert!(card.set_price(f64::NAN).is_err());
        assert!(card.set_price(f64::INFINITY).is_err());
        assert_eq!(card.price(), 0.5);
    }

    #[test]
    fn failed_setter_leaves_card_unchanged() {
        let mut card = bolt_card();
        let before = card.clone();

        assert!(card.set_quantity(-5).is_err());
        assert!(card.set_min_stock(-1).is_err());
        assert!(card.set_price(-2.0).is_err());
        assert!(card.set_name("  ").is_err());
        assert!(card.set_category("").is_err());

        assert_eq!(card, before);
    }

    #[test]
    fn string_setters_store_trimmed_values() {
        let mut card = bolt_card();
        card.set_name(" Washer ").unwrap();
        card.set_supplier(" Globex").unwrap();
        card.set_manufacturer("Initech ").unwrap();
        card.set_location(" C3 ").unwrap();
        card.set_category(" Fasteners ").unwrap();
        assert_eq!(card.name(), "Washer");
        assert_eq!(card.supplier(), "Globex");
        assert_eq!(card.manufacturer(), "Initech");
        assert_eq!(card.location(), "C3");
        assert_eq!(card.category(), "Fasteners");
    }

    #[test]
    fn write_off_zeroes_quantity_once() {
        let mut card = bolt_card();

        assert!(card.set_quantity(-5).is_err());
        assert_eq!(card.quantity(), 100);

        card.write_off().unwrap();
        assert_eq!(card.status(), ItemStatus::WrittenOff);
        assert_eq!(card.quantity(), 0);
        assert!(card.is_written_off());

        let err = card.write_off().unwrap_err();
        assert_eq!(err.message(), "only items with status received can be written off");
    }

    #[test]
    fn reserved_item_cannot_be_written_off() {
        let mut card = bolt_card();
        card.set_status(ItemStatus::Reserved).unwrap();
        assert!(card.write_off().is_err());
        assert_eq!(card.status(), ItemStatus::Reserved);
        assert_eq!(card.quantity(), 100);
    }

    #[test]
    fn set_status_to_written_off_keeps_quantity() {
        // Direct status change skips the write-off rules entirely.
        let mut card = bolt_card();
        card.set_status(ItemStatus::Reserved).unwrap();
        card.set_status(ItemStatus::WrittenOff).unwrap();
        assert_eq!(card.status(), ItemStatus::WrittenOff);
        assert_eq!(card.quantity(), 100);
    }

    #[test]
    fn setters_are_not_blocked_after_write_off() {
        let mut card = bolt_card();
        card.write_off().unwrap();
        card.set_quantity(7).unwrap();
        card.set_status(ItemStatus::Received).unwrap();
        assert_eq!(card.quantity(), 7);
        assert_eq!(card.status(), ItemStatus::Received);
    }

    #[test]
    fn status_parses_known_spellings() {
        assert_eq!("received".parse::<ItemStatus>().unwrap(), ItemStatus::Received);
        assert_eq!(" Reserved ".parse::<ItemStatus>().unwrap(), ItemStatus::Reserved);
        assert_eq!("written-off".parse::<ItemStatus>().unwrap(), ItemStatus::WrittenOff);
        for status in ItemStatus::ALL {
            assert_eq!(status.to_string().parse::<ItemStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_text() {
        let err = "lost".parse::<ItemStatus>().unwrap_err();
        assert_eq!(
            err.message(),
            "status must be one of: received, reserved, written_off"
        );
        assert!("".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn snapshot_serializes_status_in_snake_case() {
        let mut card = bolt_card();
        card.write_off().unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["status"], "written_off");
        assert_eq!(json["id"], 1);
        assert_eq!(json["quantity"], 0);
    }

    #[test]
    fn new_item_deserializes_without_min_stock() {
        let item: NewItem = serde_json::from_str(
            r#"{"name":"Nut","quantity":3,"supplier":"Acme","manufacturer":"Acme",
                "price":1.5,"location":"B1","category":"Hardware"}"#,
        )
        .unwrap();
        assert_eq!(item.min_stock, 0);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: negative numbers never reach the card.
            #[test]
            fn negative_numbers_are_rejected(value in i64::MIN..0, price in -1.0e9f64..-1.0e-9) {
                let mut card = bolt_card();
                let before = card.clone();
                prop_assert!(card.set_quantity(value).is_err());
                prop_assert!(card.set_min_stock(value).is_err());
                prop_assert!(card.set_price(price).is_err());
                prop_assert_eq!(&card, &before);
            }

            /// Property: whitespace-only strings are rejected by every string setter.
            #[test]
            fn blank_strings_are_rejected(blank in "[ \t\r\n]{0,8}") {
                let mut card = bolt_card();
                let before = card.clone();
                prop_assert!(card.set_name(&blank).is_err());
                prop_assert!(card.set_supplier(&blank).is_err());
                prop_assert!(card.set_manufacturer(&blank).is_err());
                prop_assert!(card.set_location(&blank).is_err());
                prop_assert!(card.set_category(&blank).is_err());
                prop_assert_eq!(&card, &before);
            }

            /// Property: non-negative values are stored as given.
            #[test]
            fn non_negative_numbers_are_stored(value in 0i64..i64::MAX, price in 0.0f64..1.0e9) {
                let mut card = bolt_card();
                card.set_quantity(value).unwrap();
                card.set_min_stock(value).unwrap();
                card.set_price(price).unwrap();
                prop_assert_eq!(card.quantity(), value);
                prop_assert_eq!(card.min_stock(), value);
                prop_assert_eq!(card.price(), price);
            }
        }
    }
}
