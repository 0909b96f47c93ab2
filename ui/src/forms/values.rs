use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

use super::FieldError;

/// Raw value of one form field as the user edits it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

/// Values of a whole form, keyed by field name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValues(BTreeMap<&'static str, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_text(self, name: &'static str, value: impl Into<String>) -> Self {
        self.with(name, FieldValue::Text(value.into()))
    }

    pub fn with_opt_text(self, name: &'static str, value: Option<&str>) -> Self {
        self.with_text(name, value.unwrap_or_default())
    }

    pub fn with_bool(self, name: &'static str, value: bool) -> Self {
        self.with(name, FieldValue::Bool(value))
    }

    pub fn with_list(self, name: &'static str, value: Vec<String>) -> Self {
        self.with(name, FieldValue::List(value))
    }

    pub fn set(&mut self, name: &'static str, value: FieldValue) {
        self.0.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(name)
    }

    /// Text of a field; empty when unset or not a text field.
    pub fn text(&self, name: &str) -> &str {
        match self.0.get(name) {
            Some(FieldValue::Text(text)) => text,
            _ => "",
        }
    }

    /// Trimmed text, or `None` when blank.
    pub fn opt_text(&self, name: &str) -> Option<String> {
        let text = self.text(name).trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    pub fn bool(&self, name: &str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Bool(true)))
    }

    pub fn list(&self, name: &str) -> &[String] {
        match self.0.get(name) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    /// Parse a numeric field. Blank or malformed input is reported against
    /// the field, as is a fraction or an out of range value for an integer
    /// target.
    pub fn number<T: FieldNumber>(
        &self,
        name: &'static str,
    ) -> Result<T, FieldError> {
        let value: Decimal = self
            .text(name)
            .trim()
            .parse()
            .map_err(|_| FieldError::field(name, "Must be a number"))?;
        T::from_decimal(value)
            .ok_or_else(|| FieldError::field(name, "Must be a whole number in range"))
    }

    /// Like [`number`](Self::number), but a blank field is `None`.
    pub fn opt_number<T: FieldNumber>(
        &self,
        name: &'static str,
    ) -> Result<Option<T>, FieldError> {
        if self.text(name).trim().is_empty() {
            return Ok(None);
        }
        self.number(name).map(Some)
    }

    pub fn decimal(&self, name: &'static str) -> Result<Decimal, FieldError> {
        self.number::<Decimal>(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

/// A type a numeric field converts into.
pub trait FieldNumber: Sized {
    fn from_decimal(value: Decimal) -> Option<Self>;
}

impl FieldNumber for Decimal {
    fn from_decimal(value: Decimal) -> Option<Self> {
        Some(value)
    }
}

macro_rules! whole_field_number {
    ($($ty:ty => $to:ident),*) => {
        $(impl FieldNumber for $ty {
            fn from_decimal(value: Decimal) -> Option<Self> {
                if !value.fract().is_zero() {
                    return None;
                }
                value.$to()
            }
        })*
    };
}

whole_field_number!(u8 => to_u8, u32 => to_u32, i32 => to_i32);

/// Text form of a decimal without trailing zeros, so `499.00` edits as
/// `499`.
pub fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_accept_a_zero_fraction() {
        let values = FormValues::new().with_text("total", " 1.0 ");
        assert_eq!(values.number::<u32>("total"), Ok(1));
        assert_eq!(values.number::<i32>("total"), Ok(1));
    }

    #[test]
    fn fractions_and_overflow_are_field_errors() {
        let values = FormValues::new()
            .with_text("half", "1.5")
            .with_text("huge", "5000000000")
            .with_text("negative", "-3");
        assert_eq!(
            values.number::<u32>("half"),
            Err(FieldError::field("half", "Must be a whole number in range"))
        );
        assert!(values.number::<u32>("huge").is_err());
        assert!(values.number::<u32>("negative").is_err());
        assert_eq!(values.number::<i32>("negative"), Ok(-3));
        assert_eq!(
            values.number::<Decimal>("half"),
            Ok(Decimal::new(15, 1))
        );
    }

    #[test]
    fn blank_optional_number_is_none() {
        let values = FormValues::new().with_text("discount", "  ");
        assert_eq!(values.opt_number::<Decimal>("discount"), Ok(None));
        assert_eq!(
            FormValues::new()
                .with_text("discount", "abc")
                .opt_number::<Decimal>("discount"),
            Err(FieldError::field("discount", "Must be a number"))
        );
    }
}
