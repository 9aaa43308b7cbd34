use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, DomainError, EntityMetadata};
use crate::enums::OrderStatus;
use crate::shared::metadata::{
    FieldMetadata, FieldSource, FieldType, FieldUiMetadata, ValidationRules,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pending-order navigation badge turns to a warning above this count
pub const PENDING_BADGE_WARN_THRESHOLD: u64 = 10;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(OrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Line table part
// ============================================================================

/// One repeater row of the order wizard
///
/// `unit_price` is a snapshot taken at order time; later product price
/// changes never touch past orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    #[serde(rename = "productId")]
    pub product_id: String,

    pub quantity: i32,

    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

impl OrderLine {
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub base: BaseAggregate<OrderId>,

    /// "OR-" + numeric token; assigned once at creation, immutable after
    pub number: String,

    #[serde(rename = "customerId")]
    pub customer_id: String,

    pub status: OrderStatus,

    pub notes: Option<String>,

    /// Derived aggregate over the lines; never hand-edited
    #[serde(rename = "totalPrice")]
    pub total_price: f64,

    pub lines: Vec<OrderLine>,
}

impl Order {
    pub fn new_for_insert(
        number: String,
        customer_id: String,
        status: OrderStatus,
        notes: Option<String>,
        lines: Vec<OrderLine>,
    ) -> Self {
        let total_price = compute_total(&lines);
        Self {
            base: BaseAggregate::new(OrderId::new_v4()),
            number,
            customer_id,
            status,
            notes,
            total_price,
            lines,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Apply editable fields from a DTO. The number is kept as-is and the
    /// total is recomputed from the submitted lines; the DTO carries neither.
    pub fn update(&mut self, dto: &OrderDto, lines: Vec<OrderLine>) {
        self.customer_id = dto.customer_id.clone();
        self.notes = dto.notes.clone();
        self.lines = lines;
        self.total_price = compute_total(&self.lines);
        self.base.metadata.increment_version();
    }

    /// Move to `next`, enforcing the status machine.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.code(),
                to: next.code(),
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.number.trim().is_empty() {
            return Err("number must not be empty".into());
        }
        if Uuid::parse_str(&self.customer_id).is_err() {
            return Err("customer_id must be a valid customer ID".into());
        }
        for (i, line) in self.lines.iter().enumerate() {
            if Uuid::parse_str(&line.product_id).is_err() {
                return Err(format!("item {}: product_id must be a valid product ID", i + 1));
            }
            if line.quantity < 1 {
                return Err(format!("item {}: quantity must be at least 1", i + 1));
            }
            if line.unit_price < 0.0 {
                return Err(format!("item {}: unit_price must not be negative", i + 1));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

/// Sum of quantity x unit_price over the lines
pub fn compute_total(lines: &[OrderLine]) -> f64 {
    lines.iter().map(OrderLine::amount).sum()
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        FIELDS
    }
}

// ============================================================================
// Field schema
// ============================================================================

/// Repeater row schema for the wizard's second step
pub const LINE_FIELDS: &[FieldMetadata] = &[
    FieldMetadata {
        name: "product_id",
        rust_type: "String",
        field_type: FieldType::AggregateRef,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::labeled("Product"),
        validation: ValidationRules::required(),
        ref_aggregate: Some("a004"),
        enum_values: None,
    },
    FieldMetadata::primitive(
        "quantity",
        "i32",
        FieldUiMetadata::labeled("Quantity"),
        ValidationRules::required_min(1.0),
    ),
    FieldMetadata::primitive(
        "unit_price",
        "f64",
        FieldUiMetadata::labeled("Unit Price"),
        ValidationRules::required_min(0.0),
    ),
];

pub const FIELDS: &[FieldMetadata] = &[
    FieldMetadata::primitive(
        "number",
        "String",
        FieldUiMetadata {
            hint: Some("Generated at creation"),
            ..FieldUiMetadata::labeled("Number")
        },
        ValidationRules::required(),
    ),
    FieldMetadata {
        name: "customer_id",
        rust_type: "String",
        field_type: FieldType::AggregateRef,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::labeled("Customer"),
        validation: ValidationRules::required(),
        ref_aggregate: Some("a003"),
        enum_values: None,
    },
    FieldMetadata {
        name: "status",
        rust_type: "OrderStatus",
        field_type: FieldType::Enum,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::labeled("Status"),
        validation: ValidationRules::required(),
        ref_aggregate: None,
        enum_values: Some(&["pending", "processing", "completed", "declined"]),
    },
    FieldMetadata::primitive(
        "notes",
        "Option<String>",
        FieldUiMetadata::widget("Notes", "markdown"),
        ValidationRules::none(),
    ),
    FieldMetadata::primitive(
        "total_price",
        "f64",
        FieldUiMetadata {
            visible_in_form: false,
            ..FieldUiMetadata::labeled("Total Price")
        },
        ValidationRules::none(),
    ),
    FieldMetadata {
        name: "lines",
        rust_type: "Vec<OrderLine>",
        field_type: FieldType::NestedTable,
        source: FieldSource::Specific,
        ui: FieldUiMetadata::form_only("Order Items"),
        validation: ValidationRules::none(),
        ref_aggregate: None,
        enum_values: None,
    },
];

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderLineDto {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub id: Option<String>,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub status: OrderStatus,
    pub notes: Option<String>,
    /// Repeater rows from the wizard's second step
    #[serde(default)]
    pub items: Vec<OrderLineDto>,
}

/// Read-only navigation badge; recomputed on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingBadge {
    pub count: u64,
    /// "danger" above the warning threshold, "primary" otherwise
    pub color: String,
}

impl PendingBadge {
    pub fn from_count(count: u64) -> Self {
        let color = if count > PENDING_BADGE_WARN_THRESHOLD {
            "danger"
        } else {
            "primary"
        };
        Self {
            count,
            color: color.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: u128, quantity: i32, unit_price: f64) -> OrderLine {
        OrderLine {
            product_id: Uuid::from_u128(product).to_string(),
            quantity,
            unit_price,
        }
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let lines = vec![line(1, 2, 10.0), line(2, 1, 5.0)];
        assert_eq!(compute_total(&lines), 25.0);

        let order = Order::new_for_insert(
            "OR-123456".into(),
            Uuid::from_u128(9).to_string(),
            OrderStatus::Pending,
            None,
            lines,
        );
        assert_eq!(order.total_price, 25.0);
    }

    #[test]
    fn test_total_recomputed_on_update() {
        let mut order = Order::new_for_insert(
            "OR-123456".into(),
            Uuid::from_u128(9).to_string(),
            OrderStatus::Pending,
            None,
            vec![line(1, 2, 10.0)],
        );
        let dto = OrderDto {
            id: Some(order.to_string_id()),
            customer_id: order.customer_id.clone(),
            status: OrderStatus::Pending,
            notes: None,
            items: vec![],
        };
        order.update(&dto, vec![line(1, 3, 10.0), line(2, 1, 5.0)]);
        assert_eq!(order.total_price, 35.0);
        // the number is assigned once at creation and never rewritten
        assert_eq!(order.number, "OR-123456");
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        let order = Order::new_for_insert(
            "OR-123456".into(),
            Uuid::from_u128(9).to_string(),
            OrderStatus::Pending,
            None,
            vec![line(1, 0, 10.0)],
        );
        assert!(order.validate().is_err());
    }

    #[test]
    fn test_transition_enforced() {
        let mut order = Order::new_for_insert(
            "OR-123456".into(),
            Uuid::from_u128(9).to_string(),
            OrderStatus::Pending,
            None,
            vec![],
        );
        assert!(order.transition_to(OrderStatus::Declined).is_ok());
        let err = order.transition_to(OrderStatus::Pending).unwrap_err();
        assert!(matches!(
            err,
            crate::domain::common::DomainError::InvalidTransition { .. }
        ));
    }

    #[test]
    fn test_badge_color_threshold() {
        assert_eq!(PendingBadge::from_count(10).color, "primary");
        assert_eq!(PendingBadge::from_count(11).color, "danger");
    }
}
