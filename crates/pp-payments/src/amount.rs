//! Amounts and their breakdown.

use serde::{Deserialize, Serialize};

use crate::money::MinorUnits;

/// Total amount and currency of a transaction, sale or refund.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency: String,
    /// Decimal string, e.g. `"30.11"`.
    #[serde(default)]
    pub total: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
}

impl Amount {
    pub fn new(currency: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            total: total.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Details) -> Self {
        self.details = Some(details);
        self
    }

    /// Parsed total, if it is a valid decimal.
    pub fn total_units(&self) -> Option<MinorUnits> {
        MinorUnits::parse(&self.total)
    }

    pub fn take_details(&mut self) -> Option<Details> {
        self.details.take()
    }
}

/// Breakdown of an [`Amount`]. Every field is a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handling_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_discount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_wrap: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
}

impl Details {
    /// Sum of the parts, with `shipping_discount` subtracted. PayPal sends
    /// the discount negative; either sign is accepted. Every other part must
    /// be zero or positive.
    ///
    /// `Err` names the first field that is not a valid amount, or the field
    /// at which the sum overflows.
    pub fn computed_total(&self) -> Result<MinorUnits, &'static str> {
        let mut total = MinorUnits::ZERO;
        for (name, value) in self.parts() {
            if let Some(value) = value {
                let units = MinorUnits::parse(value)
                    .filter(|units| !units.is_negative())
                    .ok_or(name)?;
                total = total.checked_add(units).ok_or(name)?;
            }
        }

        if let Some(discount) = &self.shipping_discount {
            let units = MinorUnits::parse(discount).ok_or("shipping_discount")?;
            total = total.checked_sub(units.abs()).ok_or("shipping_discount")?;
        }

        Ok(total)
    }

    /// The charges that make up the total, in wire order, without the
    /// discount.
    fn parts(&self) -> [(&'static str, Option<&String>); 6] {
        [
            ("subtotal", self.subtotal.as_ref()),
            ("shipping", self.shipping.as_ref()),
            ("tax", self.tax.as_ref()),
            ("handling_fee", self.handling_fee.as_ref()),
            ("insurance", self.insurance.as_ref()),
            ("gift_wrap", self.gift_wrap.as_ref()),
        ]
    }
}

/// A bare value/currency pair, used for fees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub value: String,
}
