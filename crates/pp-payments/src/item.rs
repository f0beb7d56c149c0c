//! Purchased items.

use serde::{Deserialize, Serialize};

use crate::address::ShippingAddress;
use crate::money::MinorUnits;

/// One line of an [`ItemList`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Integer count, sent as a string.
    #[serde(default)]
    pub quantity: String,
    /// Unit price as a decimal string.
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        price: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.to_string(),
            price: price.into(),
            currency: currency.into(),
            ..Default::default()
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn quantity_value(&self) -> Option<i64> {
        self.quantity.trim().parse().ok()
    }

    /// `price * quantity`, if both are valid.
    pub fn line_total(&self) -> Option<MinorUnits> {
        let quantity = self.quantity_value()?;
        MinorUnits::parse(&self.price)?.checked_mul(quantity)
    }
}

/// Items of a transaction plus where they ship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_phone_number: Option<String>,
}

impl ItemList {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn take_items(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }

    pub fn take_shipping_address(&mut self) -> Option<ShippingAddress> {
        self.shipping_address.take()
    }

    /// Sum of all line totals; `None` if any line is invalid.
    pub fn items_total(&self) -> Option<MinorUnits> {
        self.items
            .iter()
            .try_fold(MinorUnits::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ItemList {
    type Item = Item;
    type IntoIter = std::vec::IntoIter<Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
