//! Payments, payment lists and executions.

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::links::{find_link, Links};
use crate::payer::{Payee, Payer};
use crate::transaction::Transaction;

/// What the payment does with the funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Immediate payment.
    Sale,
    /// Authorize now, capture later.
    Authorize,
    Order,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Created,
    Approved,
    Failed,
    Canceled,
    Expired,
    Pending,
    InProgress,
    #[serde(other)]
    Unknown,
}

/// Where PayPal sends the payer after approval or cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrls {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl RedirectUrls {
    pub fn new(return_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            return_url: Some(return_url.into()),
            cancel_url: Some(cancel_url.into()),
        }
    }
}

/// A payment resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<Payee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PaymentState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_to_payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_urls: Option<RedirectUrls>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Links>,
}

impl Payment {
    pub fn new(intent: Intent, payer: Payer) -> Self {
        Self {
            intent: Some(intent),
            payer: Some(payer),
            ..Default::default()
        }
    }

    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn with_redirect_urls(mut self, redirect_urls: RedirectUrls) -> Self {
        self.redirect_urls = Some(redirect_urls);
        self
    }

    pub fn with_note_to_payer(mut self, note: impl Into<String>) -> Self {
        self.note_to_payer = Some(note.into());
        self
    }

    pub fn is_created(&self) -> bool {
        self.state == Some(PaymentState::Created)
    }

    pub fn is_approved(&self) -> bool {
        self.state == Some(PaymentState::Approved)
    }

    pub fn link(&self, rel: &str) -> Option<&Links> {
        find_link(&self.links, rel)
    }

    /// Where to send the payer to approve a PayPal-funded payment.
    pub fn approval_url(&self) -> Option<&str> {
        self.link("approval_url").map(|link| link.href.as_str())
    }

    pub fn take_payer(&mut self) -> Option<Payer> {
        self.payer.take()
    }

    pub fn take_payee(&mut self) -> Option<Payee> {
        self.payee.take()
    }

    pub fn take_transactions(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.transactions)
    }

    pub fn take_redirect_urls(&mut self) -> Option<RedirectUrls> {
        self.redirect_urls.take()
    }

    pub fn take_links(&mut self) -> Vec<Links> {
        std::mem::take(&mut self.links)
    }
}

/// One page of payments from the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub count: u32,
    /// Pass as `start_id` to fetch the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
}

impl PaymentList {
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Payment> {
        self.payments.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Payment> {
        self.payments.get(index)
    }

    pub fn has_more(&self) -> bool {
        self.next_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn take_payments(&mut self) -> Vec<Payment> {
        std::mem::take(&mut self.payments)
    }
}

impl<'a> IntoIterator for &'a PaymentList {
    type Item = &'a Payment;
    type IntoIter = std::slice::Iter<'a, Payment>;

    fn into_iter(self) -> Self::IntoIter {
        self.payments.iter()
    }
}

impl IntoIterator for PaymentList {
    type Item = Payment;
    type IntoIter = std::vec::IntoIter<Payment>;

    fn into_iter(self) -> Self::IntoIter {
        self.payments.into_iter()
    }
}

/// Body of the execute call: the approving payer and optional amount
/// updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentExecution {
    #[serde(default)]
    pub payer_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

impl PaymentExecution {
    pub fn new(payer_id: impl Into<String>) -> Self {
        Self {
            payer_id: payer_id.into(),
            transactions: Vec::new(),
        }
    }

    /// Add a transaction carrying only an amount.
    pub fn with_amount(mut self, amount: Amount) -> Self {
        self.transactions.push(Transaction::new(amount));
        self
    }
}
