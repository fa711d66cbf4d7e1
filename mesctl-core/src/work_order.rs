//! Work-order entity with guarded mutations
//!
//! All business rules that concern a single order live here: the
//! terminal-state freeze and the quantity guard. Cross-entity rules
//! (order-number uniqueness) belong to the application service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::status::OrderStatus;

/// A request to produce a quantity of a named product, tracked through a
/// status lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: Uuid,
    pub order_number: String,
    pub product_name: String,
    pub quantity: i32,
    pub status: OrderStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a new work order. Status defaults to PENDING.
#[derive(Debug, Clone, Default)]
pub struct NewWorkOrder {
    pub order_number: String,
    pub product_name: String,
    pub quantity: i32,
    pub status: Option<OrderStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Partial update applied by a repository. `None` means "leave unchanged";
/// an optional field cannot be cleared back to null through a patch.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderPatch {
    pub order_number: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<OrderStatus>,
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl WorkOrderPatch {
    /// True if the patch carries any detail field (everything except status
    /// and order_number).
    pub fn has_details(&self) -> bool {
        self.product_name.is_some()
            || self.quantity.is_some()
            || self.due_date.is_some()
            || self.notes.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_details() && self.order_number.is_none() && self.status.is_none()
    }
}

impl WorkOrder {
    /// Construct a new order with a fresh id and matching timestamps.
    ///
    /// Timestamps are provisional: repositories stamp their own
    /// `created_at`/`updated_at` at persistence time.
    pub fn new(req: NewWorkOrder) -> DomainResult<Self> {
        if req.quantity <= 0 {
            return Err(DomainError::NonPositiveQuantity);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            order_number: req.order_number,
            product_name: req.product_name,
            quantity: req.quantity,
            status: req.status.unwrap_or_default(),
            due_date: req.due_date,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// Change the lifecycle status.
    ///
    /// Terminal orders (COMPLETED, CANCELLED) reject every transition
    /// except re-asserting the same value, which succeeds as a no-op write
    /// and still refreshes `updated_at`.
    pub fn update_status(&mut self, new_status: OrderStatus) -> DomainResult<()> {
        if self.status.is_terminal() && new_status != self.status {
            return Err(DomainError::InvalidTransition {
                current: self.status,
                requested: new_status,
            });
        }
        self.status = new_status;
        self.touch();
        Ok(())
    }

    /// Apply the provided detail fields; absent fields are left unchanged.
    ///
    /// Details are frozen once the order reaches a terminal state. A
    /// non-positive quantity is rejected before anything is applied.
    pub fn update_details(
        &mut self,
        product_name: Option<String>,
        quantity: Option<i32>,
        due_date: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::DetailsFrozen {
                current: self.status,
            });
        }
        if let Some(q) = quantity {
            if q <= 0 {
                return Err(DomainError::NonPositiveQuantity);
            }
        }

        if let Some(name) = product_name {
            self.product_name = name;
        }
        if let Some(q) = quantity {
            self.quantity = q;
        }
        if let Some(date) = due_date {
            self.due_date = Some(date);
        }
        if let Some(n) = notes {
            self.notes = Some(n);
        }
        self.touch();
        Ok(())
    }

    /// Reassign the order number. Frozen in terminal states like every
    /// other field.
    ///
    /// Uniqueness is a cross-entity concern; callers must go through the
    /// service's check-and-assign path.
    pub(crate) fn assign_order_number(&mut self, order_number: String) -> DomainResult<()> {
        if self.status.is_terminal() {
            return Err(DomainError::DetailsFrozen {
                current: self.status,
            });
        }
        self.order_number = order_number;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_order() -> WorkOrder {
        WorkOrder::new(NewWorkOrder {
            order_number: "WO-001".into(),
            product_name: "Precision gear".into(),
            quantity: 10,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn new_defaults_to_pending_with_equal_timestamps() {
        let order = pending_order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn new_rejects_non_positive_quantity() {
        let err = WorkOrder::new(NewWorkOrder {
            order_number: "WO-002".into(),
            product_name: "Gear".into(),
            quantity: 0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveQuantity));
    }

    #[test]
    fn status_transitions_between_non_terminal_states_are_free() {
        let mut order = pending_order();
        order.update_status(OrderStatus::InProgress).unwrap();
        order.update_status(OrderStatus::OnHold).unwrap();
        order.update_status(OrderStatus::Failed).unwrap();
        order.update_status(OrderStatus::Reopened).unwrap();
        order.update_status(OrderStatus::Pending).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn terminal_status_rejects_different_transition() {
        let mut order = pending_order();
        order.update_status(OrderStatus::Completed).unwrap();

        let err = order.update_status(OrderStatus::Reopened).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn terminal_status_accepts_same_value() {
        let mut order = pending_order();
        order.update_status(OrderStatus::Cancelled).unwrap();
        order.update_status(OrderStatus::Cancelled).unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn update_details_applies_only_provided_fields() {
        let mut order = pending_order();
        let due = order.due_date;

        order
            .update_details(None, Some(25), None, Some("rush job".into()))
            .unwrap();

        assert_eq!(order.product_name, "Precision gear");
        assert_eq!(order.quantity, 25);
        assert_eq!(order.due_date, due);
        assert_eq!(order.notes.as_deref(), Some("rush job"));
    }

    #[test]
    fn update_details_rejects_non_positive_quantity_and_changes_nothing() {
        let mut order = pending_order();
        let err = order
            .update_details(Some("Other".into()), Some(-3), None, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::NonPositiveQuantity));
        assert_eq!(order.product_name, "Precision gear");
        assert_eq!(order.quantity, 10);
    }

    #[test]
    fn update_details_frozen_in_terminal_state() {
        let mut order = pending_order();
        order.update_status(OrderStatus::Completed).unwrap();

        let err = order
            .update_details(None, Some(20), None, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::DetailsFrozen { .. }));
        assert_eq!(order.quantity, 10);
    }

    #[test]
    fn order_number_frozen_in_terminal_state() {
        let mut order = pending_order();
        order.update_status(OrderStatus::Cancelled).unwrap();

        let err = order.assign_order_number("WO-999".into()).unwrap_err();
        assert!(matches!(err, DomainError::DetailsFrozen { .. }));
        assert_eq!(order.order_number, "WO-001");
    }

    #[test]
    fn mutations_advance_updated_at() {
        let mut order = pending_order();
        let created = order.created_at;
        let before = order.updated_at;
        order.update_status(OrderStatus::InProgress).unwrap();
        assert!(order.updated_at >= before);
        assert_eq!(order.created_at, created);
    }
}
