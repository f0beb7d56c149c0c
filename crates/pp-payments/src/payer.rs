//! Payer, payee and funding instruments.

use serde::{Deserialize, Serialize};

use crate::address::{Address, ShippingAddress};
use crate::links::Links;

/// How the payer funds the payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Paypal,
    CreditCard,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditCardType {
    Visa,
    Mastercard,
    Discover,
    Amex,
    #[serde(other)]
    Unknown,
}

/// The party paying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// `VERIFIED` or `UNVERIFIED` PayPal account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funding_instruments: Vec<FundingInstrument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_info: Option<PayerInfo>,
}

impl Payer {
    pub fn new(payment_method: PaymentMethod) -> Self {
        Self {
            payment_method: Some(payment_method),
            ..Default::default()
        }
    }

    pub fn paypal() -> Self {
        Self::new(PaymentMethod::Paypal)
    }

    pub fn with_funding_instrument(mut self, instrument: FundingInstrument) -> Self {
        self.funding_instruments.push(instrument);
        self
    }

    pub fn take_payer_info(&mut self) -> Option<PayerInfo> {
        self.payer_info.take()
    }

    pub fn take_funding_instruments(&mut self) -> Vec<FundingInstrument> {
        std::mem::take(&mut self.funding_instruments)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

impl PayerInfo {
    pub fn take_shipping_address(&mut self) -> Option<ShippingAddress> {
        self.shipping_address.take()
    }

    pub fn take_billing_address(&mut self) -> Option<Address> {
        self.billing_address.take()
    }
}

/// A payer's payment source. Exactly one field is normally set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingInstrument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_token: Option<CreditCardToken>,
}

impl FundingInstrument {
    pub fn credit_card(card: CreditCard) -> Self {
        Self {
            credit_card: Some(card),
            credit_card_token: None,
        }
    }

    pub fn credit_card_token(token: CreditCardToken) -> Self {
        Self {
            credit_card: None,
            credit_card_token: Some(token),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.credit_card.is_none() && self.credit_card_token.is_none()
    }

    pub fn take_credit_card(&mut self) -> Option<CreditCard> {
        self.credit_card.take()
    }

    pub fn take_credit_card_token(&mut self) -> Option<CreditCardToken> {
        self.credit_card_token.take()
    }
}

/// Raw card details.
///
/// `number` and `cvv2` are redacted in Debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub number: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CreditCardType>,
    #[serde(default)]
    pub expire_month: u8,
    #[serde(default)]
    pub expire_year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Links>,
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCard")
            .field("id", &self.id)
            .field("number", &"[REDACTED]")
            .field("card_type", &self.card_type)
            .field("expire_month", &self.expire_month)
            .field("expire_year", &self.expire_year)
            .field("cvv2", &self.cvv2.as_ref().map(|_| "[REDACTED]"))
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("billing_address", &self.billing_address)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl CreditCard {
    pub fn new(
        number: impl Into<String>,
        card_type: CreditCardType,
        expire_month: u8,
        expire_year: u16,
    ) -> Self {
        Self {
            number: number.into(),
            card_type: Some(card_type),
            expire_month,
            expire_year,
            ..Default::default()
        }
    }

    pub fn take_billing_address(&mut self) -> Option<Address> {
        self.billing_address.take()
    }
}

/// A card stored in the vault, referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardToken {
    #[serde(default)]
    pub credit_card_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CreditCardType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_month: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_year: Option<u16>,
}

impl CreditCardToken {
    pub fn new(credit_card_id: impl Into<String>) -> Self {
        Self {
            credit_card_id: credit_card_id.into(),
            ..Default::default()
        }
    }
}

/// The merchant receiving the funds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
