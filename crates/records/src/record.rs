//! Typed records produced by validation.

use chrono::NaiveDate;
use serde_json::Value;

use shopbook_core::{date::format_calendar_date, Money};

use crate::kind::RecordKind;
use crate::Fields;

/// Fragrance gender of an inventory item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Gender {
    Masculine,
    Feminine,
    Unisex,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Masculine => "Masculine",
            Gender::Feminine => "Feminine",
            Gender::Unisex => "Unisex",
        }
    }

    /// Case-insensitive match on the three labels.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        [Gender::Masculine, Gender::Feminine, Gender::Unisex]
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(value))
    }
}

/// Reference to an uploaded product image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Data URL or storage URL of the image.
    pub contents: String,
    pub filename: Option<String>,
}

/// Stock intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    pub stocked_date: NaiveDate,
    pub source: String,
    pub perfume_name: String,
    pub amount_paid: Money,
    pub quantity: u64,
    pub gender: Gender,
    pub description: String,
    pub comments: Option<String>,
    pub image: Option<ImageRef>,
}

/// A sale to a buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub sale_date: NaiveDate,
    pub buyer_name: String,
    pub perfume_name: String,
    pub sale_amount: Money,
    pub sale_quantity: u64,
    pub comments: Option<String>,
}

/// Money owed by a customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debt {
    pub debtor_name: String,
    pub debtor_phone: String,
    pub debtor_date: NaiveDate,
    pub debtor_amount: Money,
    pub comments: Option<String>,
}

/// A validated record of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Inventory(InventoryItem),
    Sale(Sale),
    Debt(Debt),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Inventory(_) => RecordKind::Inventory,
            Record::Sale(_) => RecordKind::Sale,
            Record::Debt(_) => RecordKind::Debt,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Record::Inventory(r) => r.stocked_date,
            Record::Sale(r) => r.sale_date,
            Record::Debt(r) => r.debtor_date,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            Record::Inventory(r) => r.amount_paid,
            Record::Sale(r) => r.sale_amount,
            Record::Debt(r) => r.debtor_amount,
        }
    }

    /// Render the record as the canonical document written to the store.
    ///
    /// Optional fields that are unset are omitted rather than written as null.
    pub fn to_fields(&self) -> Fields {
        let mut doc = DocumentBuilder::default();
        match self {
            Record::Inventory(r) => {
                doc.date("stocked_date", r.stocked_date)
                    .text("source", &r.source)
                    .text("perfume_name", &r.perfume_name)
                    .money("amount_paid", r.amount_paid)
                    .number("quantity", r.quantity)
                    .text("gender", r.gender.as_str())
                    .text("description", &r.description)
                    .opt_text("comments", r.comments.as_deref());
                if let Some(image) = &r.image {
                    doc.text("image_contents", &image.contents)
                        .opt_text("filename", image.filename.as_deref());
                }
            }
            Record::Sale(r) => {
                doc.date("sale_date", r.sale_date)
                    .text("buyer_name", &r.buyer_name)
                    .text("perfume_name", &r.perfume_name)
                    .money("sale_amount", r.sale_amount)
                    .number("sale_quantity", r.sale_quantity)
                    .opt_text("comments", r.comments.as_deref());
            }
            Record::Debt(r) => {
                doc.text("debtor_name", &r.debtor_name)
                    .text("debtor_phone", &r.debtor_phone)
                    .date("debtor_date", r.debtor_date)
                    .money("debtor_amount", r.debtor_amount)
                    .opt_text("comments", r.comments.as_deref());
            }
        }
        doc.fields
    }
}

#[derive(Default)]
struct DocumentBuilder {
    fields: Fields,
}

impl DocumentBuilder {
    fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.fields
            .insert(name.to_string(), Value::String(value.to_string()));
        self
    }

    fn opt_text(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.text(name, value);
        }
        self
    }

    fn date(&mut self, name: &str, value: NaiveDate) -> &mut Self {
        self.fields
            .insert(name.to_string(), Value::String(format_calendar_date(value)));
        self
    }

    fn money(&mut self, name: &str, value: Money) -> &mut Self {
        self.fields
            .insert(name.to_string(), Value::from(value.to_major()));
        self
    }

    fn number(&mut self, name: &str, value: u64) -> &mut Self {
        self.fields.insert(name.to_string(), Value::from(value));
        self
    }
}
