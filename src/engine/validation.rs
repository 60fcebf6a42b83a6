use crate::domain::OrderDraft;
use crate::error::ValidationError;
use std::collections::HashSet;

/// Checks the shape of a submitted order.
///
/// Rules run in a fixed order and the first violation is returned.
pub fn validate_draft(draft: &OrderDraft) -> Result<(), ValidationError> {
    if let Some(id) = &draft.id {
        if id.is_empty() {
            return Err(ValidationError::EmptyOrderId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValidationError::OrderIdHasWhitespace(id.clone()));
        }
    }

    if draft.customer_name.trim().is_empty() {
        return Err(ValidationError::EmptyCustomerName);
    }

    if draft.items.is_empty() {
        return Err(ValidationError::NoLineItems);
    }

    let mut seen = HashSet::new();
    for item in &draft.items {
        if item.product_id.is_empty() || item.product_id.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidProductId(item.product_id.clone()));
        }
        if !seen.insert(item.product_id.as_str()) {
            return Err(ValidationError::DuplicateLineItem(item.product_id.clone()));
        }
        if item.quantity < 1 {
            return Err(ValidationError::InvalidQuantity {
                product_id: item.product_id.clone(),
                quantity: item.quantity,
            });
        }
    }

    if draft.status.is_some() {
        return Err(ValidationError::StatusNotAllowed);
    }
    if draft.created_at.is_some() {
        return Err(ValidationError::CreatedAtNotAllowed);
    }

    Ok(())
}
