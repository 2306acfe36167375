//! Validation of submitted documents.
//!
//! Runs in two steps: a schema-driven pass shared by every kind (aliases,
//! presence, primitive types, signs), then a per-kind assembly of the typed
//! record from the checked values.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::Value;

use shopbook_core::{parse_calendar_date, Money, MoneyParseError};

use crate::error::ValidationError;
use crate::kind::{FieldSpec, FieldType, RecordKind};
use crate::record::{Debt, Gender, ImageRef, InventoryItem, Record, Sale};
use crate::Fields;

/// Validate a submitted document against the schema of `kind`.
///
/// Legacy field names are accepted and resolved to their canonical names.
/// Unknown fields are ignored. On success the typed record is returned;
/// `Record::to_fields` gives the canonical document to store.
pub fn validate(kind: RecordKind, fields: &Fields) -> Result<Record, ValidationError> {
    let mut checked = check_schema(kind.schema(), fields)?;

    let record = match kind {
        RecordKind::Inventory => Record::Inventory(InventoryItem {
            stocked_date: checked.date("stocked_date")?,
            source: checked.text("source")?,
            perfume_name: checked.text("perfume_name")?,
            amount_paid: checked.money("amount_paid")?,
            quantity: checked.quantity("quantity")?,
            gender: checked.gender("gender")?,
            description: checked.text("description")?,
            comments: checked.opt_text("comments"),
            image: checked.opt_text("image_contents").map(|contents| ImageRef {
                contents,
                filename: checked.opt_text("filename"),
            }),
        }),
        RecordKind::Sale => Record::Sale(Sale {
            sale_date: checked.date("sale_date")?,
            buyer_name: checked.text("buyer_name")?,
            perfume_name: checked.text("perfume_name")?,
            sale_amount: checked.money("sale_amount")?,
            sale_quantity: checked.opt_quantity("sale_quantity").unwrap_or(1),
            comments: checked.opt_text("comments"),
        }),
        RecordKind::Debt => Record::Debt(Debt {
            debtor_name: checked.text("debtor_name")?,
            debtor_phone: checked.text("debtor_phone")?,
            debtor_date: checked.date("debtor_date")?,
            debtor_amount: checked.money("debtor_amount")?,
            comments: checked.opt_text("comments"),
        }),
    };

    Ok(record)
}

#[derive(Debug, Clone, PartialEq)]
enum Checked {
    Text(String),
    Date(NaiveDate),
    Money(Money),
    Quantity(u64),
    Gender(Gender),
}

/// Values that passed the schema pass, keyed by canonical field name.
struct CheckedFields {
    values: HashMap<&'static str, Checked>,
}

impl CheckedFields {
    fn take(&mut self, name: &'static str) -> Option<Checked> {
        self.values.remove(name)
    }

    fn text(&mut self, name: &'static str) -> Result<String, ValidationError> {
        self.opt_text(name)
            .ok_or(ValidationError::MissingField { field: name })
    }

    fn opt_text(&mut self, name: &'static str) -> Option<String> {
        match self.take(name) {
            Some(Checked::Text(s)) => Some(s),
            _ => None,
        }
    }

    fn date(&mut self, name: &'static str) -> Result<NaiveDate, ValidationError> {
        match self.take(name) {
            Some(Checked::Date(d)) => Ok(d),
            _ => Err(ValidationError::MissingField { field: name }),
        }
    }

    fn money(&mut self, name: &'static str) -> Result<Money, ValidationError> {
        match self.take(name) {
            Some(Checked::Money(m)) => Ok(m),
            _ => Err(ValidationError::MissingField { field: name }),
        }
    }

    fn quantity(&mut self, name: &'static str) -> Result<u64, ValidationError> {
        self.opt_quantity(name)
            .ok_or(ValidationError::MissingField { field: name })
    }

    fn opt_quantity(&mut self, name: &'static str) -> Option<u64> {
        match self.take(name) {
            Some(Checked::Quantity(q)) => Some(q),
            _ => None,
        }
    }

    fn gender(&mut self, name: &'static str) -> Result<Gender, ValidationError> {
        match self.take(name) {
            Some(Checked::Gender(g)) => Ok(g),
            _ => Err(ValidationError::MissingField { field: name }),
        }
    }
}

fn check_schema(schema: &[FieldSpec], fields: &Fields) -> Result<CheckedFields, ValidationError> {
    let mut values = HashMap::with_capacity(schema.len());

    for spec in schema {
        match lookup(spec, fields) {
            Some(raw) => {
                if let Some(value) = check_value(spec, raw)? {
                    values.insert(spec.name, value);
                } else if spec.required {
                    return Err(ValidationError::MissingField { field: spec.name });
                }
            }
            None if spec.required => {
                return Err(ValidationError::MissingField { field: spec.name });
            }
            None => {}
        }
    }

    Ok(CheckedFields { values })
}

/// First non-null value under the canonical name or one of its aliases.
fn lookup<'a>(spec: &FieldSpec, fields: &'a Fields) -> Option<&'a Value> {
    std::iter::once(spec.name)
        .chain(spec.aliases.iter().copied())
        .filter_map(|name| fields.get(name))
        .find(|value| !value.is_null())
}

/// Check one raw value. `Ok(None)` means "present but blank".
fn check_value(spec: &FieldSpec, raw: &Value) -> Result<Option<Checked>, ValidationError> {
    let field = spec.name;
    match spec.ty {
        FieldType::Text => Ok(text_of(raw, field)?.map(Checked::Text)),
        FieldType::Date => match raw {
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => parse_calendar_date(s)
                .map(|d| Some(Checked::Date(d)))
                .map_err(|source| ValidationError::InvalidDate { field, source }),
            _ => Err(ValidationError::WrongType {
                field,
                expected: "a YYYY-MM-DD string",
            }),
        },
        FieldType::Money => {
            let Some(text) = numeric_text(raw, field)? else {
                return Ok(None);
            };
            Money::parse_major(&text)
                .map(|m| Some(Checked::Money(m)))
                .map_err(|e| match e {
                    MoneyParseError::Negative => ValidationError::Negative { field },
                    MoneyParseError::NotANumber(_) => ValidationError::WrongType {
                        field,
                        expected: "a number",
                    },
                    MoneyParseError::TooLarge => ValidationError::WrongType {
                        field,
                        expected: "a storable amount",
                    },
                })
        }
        FieldType::Quantity => {
            let Some(text) = numeric_text(raw, field)? else {
                return Ok(None);
            };
            quantity_of(&text, field).map(|q| Some(Checked::Quantity(q)))
        }
        FieldType::Gender => {
            let Some(s) = text_of(raw, field)? else {
                return Ok(None);
            };
            Gender::parse(&s)
                .map(|g| Some(Checked::Gender(g)))
                .ok_or(ValidationError::InvalidGender { field, value: s })
        }
    }
}

/// Trimmed text; numbers are accepted and rendered (phone numbers often are).
fn text_of(raw: &Value, field: &'static str) -> Result<Option<String>, ValidationError> {
    match raw {
        Value::String(s) => {
            let s = s.trim();
            Ok((!s.is_empty()).then(|| s.to_string()))
        }
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(ValidationError::WrongType {
            field,
            expected: "text",
        }),
    }
}

/// Decimal text of a JSON number or a numeric string. Numbers keep their
/// exact textual form; nothing passes through `f64`.
fn numeric_text(raw: &Value, field: &'static str) -> Result<Option<String>, ValidationError> {
    match raw {
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        _ => Err(ValidationError::WrongType {
            field,
            expected: "a number",
        }),
    }
}

/// Whole, positive count. Integers are read exactly; the float reading only
/// classifies what is not a plain integer (`-1`, `2.5`, `3.0`).
fn quantity_of(text: &str, field: &'static str) -> Result<u64, ValidationError> {
    // Largest integer an f64 holds exactly.
    const EXACT_F64_LIMIT: f64 = 9_007_199_254_740_992.0;

    if let Ok(n) = text.parse::<u64>() {
        return if n == 0 {
            Err(ValidationError::NotPositive { field })
        } else {
            Ok(n)
        };
    }

    let n = match text.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            return Err(ValidationError::WrongType {
                field,
                expected: "a number",
            })
        }
    };
    if n < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    if n.fract() != 0.0 || n > EXACT_F64_LIMIT {
        return Err(ValidationError::NotWholeNumber { field });
    }
    if n < 1.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(n as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn inventory_fields() -> Fields {
        fields(json!({
            "stocked_date": "2024-01-01",
            "source": "Dubai",
            "perfume_name": "Amber Oud",
            "amount_paid": 10,
            "quantity": 4,
            "gender": "Unisex",
            "description": "100ml EDP",
            "comments": "",
        }))
    }

    #[test]
    fn valid_inventory_item_is_accepted() {
        let record = validate(RecordKind::Inventory, &inventory_fields()).unwrap();
        match record {
            Record::Inventory(item) => {
                assert_eq!(item.perfume_name, "Amber Oud");
                assert_eq!(item.amount_paid, Money::from_minor(1000));
                assert_eq!(item.quantity, 4);
                assert_eq!(item.gender, Gender::Unisex);
                assert_eq!(item.comments, None);
                assert_eq!(item.image, None);
            }
            other => panic!("expected inventory record, got {other:?}"),
        }
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let mut f = inventory_fields();
        f.insert("quantity".into(), json!(-1));
        let err = validate(RecordKind::Inventory, &f).unwrap_err();
        assert_eq!(err, ValidationError::Negative { field: "quantity" });
    }

    #[test]
    fn negative_amount_paid_is_rejected() {
        let mut f = inventory_fields();
        f.insert("amount_paid".into(), json!(-0.5));
        let err = validate(RecordKind::Inventory, &f).unwrap_err();
        assert_eq!(err, ValidationError::Negative { field: "amount_paid" });
    }

    #[test]
    fn zero_and_fractional_quantities_are_rejected() {
        let mut f = inventory_fields();
        f.insert("quantity".into(), json!(0));
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::NotPositive { field: "quantity" }
        );

        f.insert("quantity".into(), json!(1.5));
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::NotWholeNumber { field: "quantity" }
        );
    }

    #[test]
    fn missing_and_blank_required_fields_are_rejected() {
        let mut f = inventory_fields();
        f.remove("source");
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::MissingField { field: "source" }
        );

        let mut f = inventory_fields();
        f.insert("description".into(), json!("   "));
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::MissingField { field: "description" }
        );

        let mut f = inventory_fields();
        f.insert("stocked_date".into(), Value::Null);
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::MissingField { field: "stocked_date" }
        );
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let mut f = inventory_fields();
        f.insert("stocked_date".into(), json!("01/02/2024"));
        let err = validate(RecordKind::Inventory, &f).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidDate { field: "stocked_date", .. }
        ));
        assert_eq!(err.field(), "stocked_date");
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let mut f = inventory_fields();
        f.insert("gender".into(), json!("Kids"));
        let err = validate(RecordKind::Inventory, &f).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidGender {
                field: "gender",
                value: "Kids".to_string()
            }
        );
    }

    #[test]
    fn numeric_strings_are_accepted_but_words_are_not() {
        let mut f = inventory_fields();
        f.insert("amount_paid".into(), json!("12.50"));
        f.insert("quantity".into(), json!("2"));
        let record = validate(RecordKind::Inventory, &f).unwrap();
        assert_eq!(record.amount(), Money::from_minor(1250));

        f.insert("amount_paid".into(), json!("twelve"));
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::WrongType {
                field: "amount_paid",
                expected: "a number"
            }
        );
    }

    #[test]
    fn legacy_field_names_are_normalised() {
        let sale = fields(json!({
            "sale_date": "2024-01-02",
            "buyer_name": "Ada",
            "perfume_name_sale": "Oud Wood",
            "sale_amount": 50,
            "sale_comments": "paid cash",
        }));

        let record = validate(RecordKind::Sale, &sale).unwrap();
        let stored = record.to_fields();
        assert_eq!(stored["perfume_name"], "Oud Wood");
        assert_eq!(stored["comments"], "paid cash");
        assert!(!stored.contains_key("perfume_name_sale"));
        assert!(!stored.contains_key("sale_comments"));
    }

    #[test]
    fn sale_quantity_defaults_to_one() {
        let sale = fields(json!({
            "sale_date": "2024-01-02",
            "buyer_name": "Ada",
            "perfume_name": "Oud Wood",
            "sale_amount": 50,
        }));
        match validate(RecordKind::Sale, &sale).unwrap() {
            Record::Sale(s) => assert_eq!(s.sale_quantity, 1),
            other => panic!("expected sale, got {other:?}"),
        }
    }

    #[test]
    fn debt_accepts_numeric_phone() {
        let debt = fields(json!({
            "debtor_name": "Kofi",
            "debtor_phone": 233201234567u64,
            "debtor_date": "2024-01-03",
            "debtor_amount": 25.75,
            "debtor_comments": "pays Friday",
        }));
        match validate(RecordKind::Debt, &debt).unwrap() {
            Record::Debt(d) => {
                assert_eq!(d.debtor_phone, "233201234567");
                assert_eq!(d.debtor_amount, Money::from_minor(2575));
                assert_eq!(d.comments.as_deref(), Some("pays Friday"));
            }
            other => panic!("expected debt, got {other:?}"),
        }
    }

    #[test]
    fn image_reference_is_optional() {
        let mut f = inventory_fields();
        f.insert("contents".into(), json!("data:image/png;base64,AAAA"));
        f.insert("filename".into(), json!("amber.png"));
        match validate(RecordKind::Inventory, &f).unwrap() {
            Record::Inventory(item) => {
                let image = item.image.unwrap();
                assert_eq!(image.contents, "data:image/png;base64,AAAA");
                assert_eq!(image.filename.as_deref(), Some("amber.png"));
            }
            other => panic!("expected inventory record, got {other:?}"),
        }
    }

    #[test]
    fn half_cent_amounts_round_away_from_zero() {
        for (amount, cents) in [(json!(1.005), 101), (json!("1.005"), 101), (json!(0.285), 29)] {
            let sale = fields(json!({
                "sale_date": "2024-01-02",
                "buyer_name": "Esi",
                "perfume_name": "Amber Oud",
                "sale_amount": amount,
            }));
            match validate(RecordKind::Sale, &sale).unwrap() {
                Record::Sale(s) => assert_eq!(s.sale_amount, Money::from_minor(cents), "{amount}"),
                other => panic!("expected sale, got {other:?}"),
            }
        }
    }

    #[test]
    fn quantities_beyond_f64_precision_survive_the_round_trip() {
        let big: u64 = 9_007_199_254_740_993;
        for quantity in [json!(big), json!(big.to_string())] {
            let sale = fields(json!({
                "sale_date": "2024-01-02",
                "buyer_name": "Esi",
                "perfume_name": "Amber Oud",
                "sale_amount": 10,
                "sale_quantity": quantity,
            }));
            let record = validate(RecordKind::Sale, &sale).unwrap();
            assert_eq!(record.to_fields()["sale_quantity"], json!(big));
        }
    }

    #[test]
    fn quantities_outside_u64_are_rejected() {
        let mut f = inventory_fields();
        f.insert("quantity".into(), json!("18446744073709551616"));
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::NotWholeNumber { field: "quantity" }
        );

        f.insert("quantity".into(), json!(2.5));
        assert_eq!(
            validate(RecordKind::Inventory, &f).unwrap_err(),
            ValidationError::NotWholeNumber { field: "quantity" }
        );

        f.insert("quantity".into(), json!(3.0));
        match validate(RecordKind::Inventory, &f).unwrap() {
            Record::Inventory(item) => assert_eq!(item.quantity, 3),
            other => panic!("expected inventory record, got {other:?}"),
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

            #[test]
            fn non_negative_amounts_keep_their_cents(cents in 0u64..1_000_000_000, quantity in 1u64..10_000) {
                let mut f = inventory_fields();
                f.insert("amount_paid".into(), json!(cents as f64 / 100.0));
                f.insert("quantity".into(), json!(quantity));
                match validate(RecordKind::Inventory, &f) {
                    Ok(Record::Inventory(item)) => {
                        prop_assert_eq!(item.amount_paid, Money::from_minor(cents));
                        prop_assert_eq!(item.quantity, quantity);
                    }
                    other => prop_assert!(false, "unexpected {:?}", other),
                }
            }

            #[test]
            fn negative_sale_amounts_never_validate(major in -1_000_000.0f64..-0.01) {
                let sale = fields(json!({
                    "sale_date": "2024-01-02",
                    "buyer_name": "Esi",
                    "perfume_name": "Amber Oud",
                    "sale_amount": major,
                }));
                prop_assert_eq!(
                    validate(RecordKind::Sale, &sale).unwrap_err(),
                    ValidationError::Negative { field: "sale_amount" }
                );
            }
        }
    }
}
