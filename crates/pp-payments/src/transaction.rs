//! Transactions and their related resources.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::item::ItemList;
use crate::payer::Payee;
use crate::resources::{Authorization, Capture, Refund, Sale};

/// What the payment is for and who receives it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<Payee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_to_payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_descriptor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_list: Option<ItemList>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_resources: Vec<RelatedResources>,
}

impl Transaction {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount: Some(amount),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_item_list(mut self, item_list: ItemList) -> Self {
        self.item_list = Some(item_list);
        self
    }

    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    pub fn take_amount(&mut self) -> Option<Amount> {
        self.amount.take()
    }

    pub fn take_item_list(&mut self) -> Option<ItemList> {
        self.item_list.take()
    }

    pub fn take_payee(&mut self) -> Option<Payee> {
        self.payee.take()
    }

    pub fn take_related_resources(&mut self) -> Vec<RelatedResources> {
        std::mem::take(&mut self.related_resources)
    }

    /// Sales among the related resources.
    pub fn sales(&self) -> impl Iterator<Item = &Sale> {
        self.related_resources.iter().filter_map(|r| r.sale.as_ref())
    }
}

/// One resource created for a transaction. Exactly one field is normally
/// set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale: Option<Sale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<Authorization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<Capture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund: Option<Refund>,
}

impl RelatedResources {
    pub fn take_sale(&mut self) -> Option<Sale> {
        self.sale.take()
    }

    pub fn take_authorization(&mut self) -> Option<Authorization> {
        self.authorization.take()
    }

    pub fn take_capture(&mut self) -> Option<Capture> {
        self.capture.take()
    }

    pub fn take_refund(&mut self) -> Option<Refund> {
        self.refund.take()
    }
}
