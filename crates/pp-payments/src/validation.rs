//! Preconditions checked before a payment request leaves the process.

use paypal_rest_client::{ErrorInfo, Result};

use crate::amount::Amount;
use crate::money::MinorUnits;
use crate::payer::PaymentMethod;
use crate::payment::Payment;
use crate::transaction::Transaction;

/// Validate a payment for creation.
///
/// Checks the intent, payer and funding, redirect URLs for PayPal-funded
/// payments, and every transaction's amounts.
pub fn validate_payment(payment: &Payment) -> Result<()> {
    if payment.intent.is_none() {
        return Err(ErrorInfo::input("Payment intent is required"));
    }

    let payer = payment
        .payer
        .as_ref()
        .ok_or_else(|| ErrorInfo::input("Payment payer is required"))?;

    match payer.payment_method {
        None => return Err(ErrorInfo::input("Payer payment_method is required")),
        Some(PaymentMethod::Unknown) => {
            return Err(ErrorInfo::input("Payer payment_method is not supported"))
        }
        Some(PaymentMethod::Paypal) => {
            let urls = payment.redirect_urls.as_ref();
            let has = |url: Option<&String>| url.is_some_and(|u| !u.is_empty());
            if !urls.is_some_and(|u| has(u.return_url.as_ref()) && has(u.cancel_url.as_ref())) {
                return Err(ErrorInfo::input(
                    "PayPal payments require return_url and cancel_url",
                ));
            }
        }
        Some(PaymentMethod::CreditCard) => {
            if payer.funding_instruments.iter().all(|f| f.is_empty()) {
                return Err(ErrorInfo::input(
                    "Credit card payments require a funding instrument",
                ));
            }
        }
    }

    if payment.transactions.is_empty() {
        return Err(ErrorInfo::input("Payment must have at least one transaction"));
    }

    for (index, transaction) in payment.transactions.iter().enumerate() {
        validate_transaction(transaction)
            .map_err(|err| ErrorInfo::input(format!("transactions[{}]: {}", index, err.message)))?;
    }

    Ok(())
}

/// Validate one transaction: a valid amount, a breakdown that sums to the
/// total, and items that add up to the subtotal.
pub fn validate_transaction(transaction: &Transaction) -> Result<()> {
    let amount = transaction
        .amount
        .as_ref()
        .ok_or_else(|| ErrorInfo::input("amount is required"))?;
    let total = validate_amount(amount)?;

    // Items add up to the subtotal when there is a breakdown. A breakdown
    // without a subtotal gives nothing to compare them against.
    let mut items_target = Some(total);
    if let Some(details) = &amount.details {
        let computed = details.computed_total().map_err(|field| {
            ErrorInfo::input(format!(
                "amount.details.{} is not a valid non-negative amount",
                field
            ))
        })?;
        if computed != total {
            return Err(ErrorInfo::input(format!(
                "amount.details add up to {} but total is {}",
                computed, total
            )));
        }
        items_target = details.subtotal.as_deref().and_then(MinorUnits::parse);
    }

    let Some(item_list) = transaction.item_list.as_ref().filter(|list| !list.is_empty()) else {
        return Ok(());
    };

    for (index, item) in item_list.iter().enumerate() {
        if item.name.is_empty() {
            return Err(ErrorInfo::input(format!("item_list.items[{}].name is required", index)));
        }
        if !item.quantity_value().is_some_and(|q| q > 0) {
            return Err(ErrorInfo::input(format!(
                "item_list.items[{}].quantity must be a positive integer",
                index
            )));
        }
        match MinorUnits::parse(&item.price) {
            None => {
                return Err(ErrorInfo::input(format!(
                    "item_list.items[{}].price is not a valid amount",
                    index
                )))
            }
            Some(price) if price.is_negative() => {
                return Err(ErrorInfo::input(format!(
                    "item_list.items[{}].price must not be negative",
                    index
                )))
            }
            Some(_) => {}
        }
        if item.currency != amount.currency {
            return Err(ErrorInfo::input(format!(
                "item_list.items[{}].currency {} does not match {}",
                index, item.currency, amount.currency
            )));
        }
    }

    let Some(items_target) = items_target else {
        return Ok(());
    };
    let items_total = item_list
        .items_total()
        .ok_or_else(|| ErrorInfo::input("item_list total overflows"))?;
    if items_total != items_target {
        return Err(ErrorInfo::input(format!(
            "item_list adds up to {} but expected {}",
            items_total, items_target
        )));
    }

    Ok(())
}

/// Validate a standalone amount and return its total.
pub fn validate_amount(amount: &Amount) -> Result<MinorUnits> {
    if amount.currency.trim().is_empty() {
        return Err(ErrorInfo::input("amount.currency is required"));
    }
    let total = amount
        .total_units()
        .ok_or_else(|| ErrorInfo::input(format!("amount.total '{}' is not a valid amount", amount.total)))?;
    if !total.is_positive() {
        return Err(ErrorInfo::input("amount.total must be greater than zero"));
    }
    Ok(total)
}
