//! Hand-registered entity types used by the unit tests.

use super::{Entity, FieldKind, TypeDescriptor, Value};
use crate::mapping::MappingError;
use lazy_static::lazy_static;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use time::macros::datetime;
use time::{OffsetDateTime, PrimitiveDateTime};

lazy_static! {
    static ref AUDITED: Arc<TypeDescriptor> = Arc::new(
        TypeDescriptor::new("AuditedEntity")
            .field("id", FieldKind::Identifier)
            .field("created_at", FieldKind::Scalar)
    );
    static ref CUSTOMER: TypeDescriptor = TypeDescriptor::new("Customer")
        .extends(AUDITED.clone())
        .field("name", FieldKind::Scalar);
    static ref CUSTOMER_PROXY: TypeDescriptor = TypeDescriptor::new("Customer")
        .field("id", FieldKind::Identifier)
        .field("name", FieldKind::Scalar);
    static ref ORDER: TypeDescriptor = TypeDescriptor::new("Order")
        .field("id", FieldKind::Identifier)
        .field("customer", FieldKind::ToOne)
        .field("lines", FieldKind::ToMany)
        .field("total", FieldKind::Scalar)
        .field("placed_at", FieldKind::Scalar)
        .field("confirmed_at", FieldKind::Scalar);
    static ref ORDER_LINE: TypeDescriptor = TypeDescriptor::new("OrderLine")
        .field("key", FieldKind::EmbeddedId)
        .field("sku", FieldKind::Scalar)
        .field("quantity", FieldKind::Scalar);
    static ref ORDER_LINE_KEY: TypeDescriptor = TypeDescriptor::new("OrderLineKey")
        .field("order_id", FieldKind::Scalar)
        .field("line_no", FieldKind::Scalar);
    static ref WAREHOUSE: TypeDescriptor =
        TypeDescriptor::new("Warehouse").field("code", FieldKind::Scalar);
    static ref SHIPMENT: TypeDescriptor = TypeDescriptor::new("Shipment")
        .field("id", FieldKind::Identifier)
        .field("warehouse", FieldKind::ToOne);
    static ref ITEM: Arc<TypeDescriptor> = Arc::new(
        TypeDescriptor::new("Item")
            .field("id", FieldKind::Identifier)
            .field("label", FieldKind::Scalar)
    );
    static ref PRODUCT: TypeDescriptor = TypeDescriptor::new("Product")
        .extends(ITEM.clone())
        .field("label", FieldKind::Scalar)
        .field("sku", FieldKind::Scalar);
    static ref NODE: TypeDescriptor = TypeDescriptor::new("Node")
        .field("name", FieldKind::Scalar)
        .field("next", FieldKind::ToOne);
    static ref MISSHAPED: TypeDescriptor = TypeDescriptor::new("Misshaped")
        .field("owner", FieldKind::ToOne)
        .field("items", FieldKind::ToMany)
        .field("tags", FieldKind::ToMany);
    static ref LAZY_PARENT: TypeDescriptor = TypeDescriptor::new("LazyParent")
        .field("id", FieldKind::Identifier)
        .field("children", FieldKind::ToMany);
    static ref ENDLESS: TypeDescriptor =
        TypeDescriptor::new("Endless").field("next", FieldKind::ToOne);
}

fn no_such_field(owner: &str, field: &str) -> MappingError {
    MappingError::inaccessible(owner, field, "no such field")
}

#[derive(Debug)]
pub struct Customer {
    pub id: i64,
    pub created_at: PrimitiveDateTime,
    pub name: String,
}

impl Customer {
    pub fn new(id: i64, name: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            created_at: datetime!(2023-01-15 08:30:00),
            name: name.to_string(),
        })
    }
}

impl Entity for Customer {
    fn descriptor(&self) -> &TypeDescriptor {
        &CUSTOMER
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match (owner, field) {
            ("AuditedEntity", "id") => Ok(self.id.into()),
            ("AuditedEntity", "created_at") => Ok(self.created_at.into()),
            ("Customer", "name") => Ok(self.name.as_str().into()),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// A customer association whose lazy load fails on every field.
#[derive(Debug)]
pub struct DetachedCustomer;

impl Entity for DetachedCustomer {
    fn descriptor(&self) -> &TypeDescriptor {
        &CUSTOMER_PROXY
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        Err(MappingError::unresolved(owner, field, "session is closed"))
    }
}

#[derive(Debug)]
pub struct OrderLineKey {
    pub order_id: i64,
    pub line_no: i32,
}

impl Entity for OrderLineKey {
    fn descriptor(&self) -> &TypeDescriptor {
        &ORDER_LINE_KEY
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "order_id" => Ok(self.order_id.into()),
            "line_no" => Ok(self.line_no.into()),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

#[derive(Debug)]
pub struct OrderLine {
    pub key: Option<Arc<OrderLineKey>>,
    pub sku: String,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(order_id: i64, line_no: i32, sku: &str, quantity: i64) -> Arc<Self> {
        Arc::new(Self {
            key: Some(Arc::new(OrderLineKey { order_id, line_no })),
            sku: sku.to_string(),
            quantity,
        })
    }
}

impl Entity for OrderLine {
    fn descriptor(&self) -> &TypeDescriptor {
        &ORDER_LINE
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "key" => Ok(self.key.clone().map_or(Value::Null, Value::entity)),
            "sku" => Ok(self.sku.as_str().into()),
            "quantity" => Ok(self.quantity.into()),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

#[derive(Debug)]
pub struct Order {
    pub id: i64,
    pub customer: Option<Arc<dyn Entity>>,
    pub lines: Vec<Arc<OrderLine>>,
    pub total: Decimal,
    pub placed_at: PrimitiveDateTime,
    pub confirmed_at: Option<OffsetDateTime>,
}

impl Order {
    pub fn new(id: i64, customer: Option<Arc<dyn Entity>>) -> Self {
        Self {
            id,
            customer,
            lines: Vec::new(),
            total: Decimal::new(4200, 2),
            placed_at: datetime!(2024-05-01 10:15:30.5),
            confirmed_at: Some(datetime!(2024-05-01 10:20:00 +03:00)),
        }
    }

    pub fn with_lines(mut self, lines: Vec<Arc<OrderLine>>) -> Self {
        self.lines = lines;
        self
    }
}

impl Entity for Order {
    fn descriptor(&self) -> &TypeDescriptor {
        &ORDER
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "id" => Ok(self.id.into()),
            "customer" => Ok(self.customer.clone().map_or(Value::Null, Value::Entity)),
            "lines" => Ok(Value::collection(self.lines.iter().cloned())),
            "total" => Ok(self.total.into()),
            "placed_at" => Ok(self.placed_at.into()),
            "confirmed_at" => Ok(self.confirmed_at.into()),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// Identified through its accessor only; no identifier field is declared.
#[derive(Debug)]
pub struct Warehouse {
    pub code: String,
}

impl Entity for Warehouse {
    fn descriptor(&self) -> &TypeDescriptor {
        &WAREHOUSE
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "code" => Ok(self.code.as_str().into()),
            _ => Err(no_such_field(owner, field)),
        }
    }

    fn id(&self) -> Option<Value> {
        Some(format!("WH-{}", self.code).into())
    }
}

#[derive(Debug)]
pub struct Shipment {
    pub id: i64,
    pub warehouse: Option<Arc<Warehouse>>,
}

impl Entity for Shipment {
    fn descriptor(&self) -> &TypeDescriptor {
        &SHIPMENT
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "id" => Ok(self.id.into()),
            "warehouse" => Ok(self.warehouse.clone().map_or(Value::Null, Value::entity)),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// Redeclares the inherited `label` field.
#[derive(Debug)]
pub struct Product {
    pub id: i64,
    pub item_label: String,
    pub product_label: String,
    pub sku: String,
}

impl Entity for Product {
    fn descriptor(&self) -> &TypeDescriptor {
        &PRODUCT
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match (owner, field) {
            ("Item", "id") => Ok(self.id.into()),
            ("Item", "label") => Ok(self.item_label.as_str().into()),
            ("Product", "label") => Ok(self.product_label.as_str().into()),
            ("Product", "sku") => Ok(self.sku.as_str().into()),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// Linked list node; `next` can be pointed back to form a cycle.
#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub next: Mutex<Option<Arc<Node>>>,
}

impl Node {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            next: Mutex::new(None),
        })
    }

    pub fn link(&self, next: &Arc<Node>) {
        *self.next.lock().unwrap() = Some(next.clone());
    }
}

impl Entity for Node {
    fn descriptor(&self) -> &TypeDescriptor {
        &NODE
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "name" => Ok(self.name.as_str().into()),
            "next" => Ok(self
                .next
                .lock()
                .unwrap()
                .clone()
                .map_or(Value::Null, Value::entity)),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// Relation fields holding values of the wrong shape.
#[derive(Debug)]
pub struct Misshaped;

impl Entity for Misshaped {
    fn descriptor(&self) -> &TypeDescriptor {
        &MISSHAPED
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "owner" => Ok(Value::collection([Customer::new(1, "A")])),
            "items" => Ok(Value::entity(Customer::new(2, "B"))),
            "tags" => Ok("not-a-collection".into()),
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// Its children collection cannot be loaded; counts every attempt.
#[derive(Debug)]
pub struct LazyParent {
    pub id: i64,
    children_reads: AtomicUsize,
}

impl LazyParent {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            children_reads: AtomicUsize::new(0),
        }
    }

    pub fn children_reads(&self) -> usize {
        self.children_reads.load(Ordering::SeqCst)
    }
}

impl Entity for LazyParent {
    fn descriptor(&self) -> &TypeDescriptor {
        &LAZY_PARENT
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "id" => Ok(self.id.into()),
            "children" => {
                self.children_reads.fetch_add(1, Ordering::SeqCst);
                Err(MappingError::unresolved(owner, field, "session is closed"))
            }
            _ => Err(no_such_field(owner, field)),
        }
    }
}

/// Hands out a new allocation on every read of `next`.
#[derive(Debug)]
pub struct Endless;

impl Entity for Endless {
    fn descriptor(&self) -> &TypeDescriptor {
        &ENDLESS
    }

    fn read(&self, owner: &str, field: &str) -> Result<Value, MappingError> {
        match field {
            "next" => Ok(Value::entity(Arc::new(Endless))),
            _ => Err(no_such_field(owner, field)),
        }
    }
}
