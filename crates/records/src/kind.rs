//! Record kinds and their schemas.
//!
//! The three collections share one shape (a flat mapping with one date
//! field and one amount field), so each kind is described by a static schema
//! instead of three ad hoc field lists.

use core::str::FromStr;

use thiserror::Error;

/// Kind of record, one per collection.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Inventory,
    Sale,
    Debt,
}

/// Primitive type of a field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Free text.
    Text,
    /// `YYYY-MM-DD` calendar date.
    Date,
    /// Non-negative currency amount.
    Money,
    /// Positive whole number.
    Quantity,
    /// One of `Masculine`, `Feminine`, `Unisex`.
    Gender,
}

/// One field of a record schema.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical name written to the store.
    pub name: &'static str,
    /// Names older dashboard variants wrote for the same field.
    pub aliases: &'static [&'static str],
    pub ty: FieldType,
    pub required: bool,
}

const fn field(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        aliases: &[],
        ty,
        required: true,
    }
}

const fn optional(name: &'static str, ty: FieldType) -> FieldSpec {
    FieldSpec {
        name,
        aliases: &[],
        ty,
        required: false,
    }
}

const fn aliased(spec: FieldSpec, aliases: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name: spec.name,
        aliases,
        ty: spec.ty,
        required: spec.required,
    }
}

const INVENTORY_SCHEMA: &[FieldSpec] = &[
    field("stocked_date", FieldType::Date),
    field("source", FieldType::Text),
    aliased(field("perfume_name", FieldType::Text), &["perfume_name_inventory"]),
    field("amount_paid", FieldType::Money),
    field("quantity", FieldType::Quantity),
    field("gender", FieldType::Gender),
    field("description", FieldType::Text),
    optional("comments", FieldType::Text),
    aliased(optional("image_contents", FieldType::Text), &["contents"]),
    optional("filename", FieldType::Text),
];

const SALE_SCHEMA: &[FieldSpec] = &[
    field("sale_date", FieldType::Date),
    field("buyer_name", FieldType::Text),
    aliased(field("perfume_name", FieldType::Text), &["perfume_name_sale"]),
    field("sale_amount", FieldType::Money),
    optional("sale_quantity", FieldType::Quantity),
    aliased(optional("comments", FieldType::Text), &["sale_comments"]),
];

const DEBT_SCHEMA: &[FieldSpec] = &[
    field("debtor_name", FieldType::Text),
    field("debtor_phone", FieldType::Text),
    field("debtor_date", FieldType::Date),
    field("debtor_amount", FieldType::Money),
    aliased(optional("comments", FieldType::Text), &["debtor_comments"]),
];

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Inventory, RecordKind::Sale, RecordKind::Debt];

    /// Name of the store collection holding this kind.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Inventory => "inventory",
            RecordKind::Sale => "sales",
            RecordKind::Debt => "debtors",
        }
    }

    /// Resolve a collection name (`debts` is accepted for `debtors`).
    pub fn from_collection(name: &str) -> Option<Self> {
        match name {
            "inventory" => Some(RecordKind::Inventory),
            "sales" => Some(RecordKind::Sale),
            "debtors" | "debts" => Some(RecordKind::Debt),
            _ => None,
        }
    }

    /// Field holding the record's calendar date.
    pub fn date_field(self) -> &'static str {
        match self {
            RecordKind::Inventory => "stocked_date",
            RecordKind::Sale => "sale_date",
            RecordKind::Debt => "debtor_date",
        }
    }

    /// Field holding the record's currency amount.
    pub fn amount_field(self) -> &'static str {
        match self {
            RecordKind::Inventory => "amount_paid",
            RecordKind::Sale => "sale_amount",
            RecordKind::Debt => "debtor_amount",
        }
    }

    pub fn schema(self) -> &'static [FieldSpec] {
        match self {
            RecordKind::Inventory => INVENTORY_SCHEMA,
            RecordKind::Sale => SALE_SCHEMA,
            RecordKind::Debt => DEBT_SCHEMA,
        }
    }
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.collection())
    }
}

/// A collection name that maps to no record kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown collection `{0}` (expected one of: inventory, sales, debtors)")]
pub struct UnknownCollection(pub String);

impl FromStr for RecordKind {
    type Err = UnknownCollection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::from_collection(s).ok_or_else(|| UnknownCollection(s.to_string()))
    }
}
