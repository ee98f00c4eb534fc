#![allow(dead_code)]

use hydrate::{
    mapping::Entity,
    metadata::Catalog,
    row::{Row, RowCursor, Rows},
    Load, MappingNode, Materializer, OutputRef, Result, Type,
};

use std::{cell::Cell, rc::Rc};

#[derive(Debug, PartialEq)]
pub struct Order {
    pub id: i64,
    pub total: i64,
    pub lines: Vec<LineItem>,
}

#[derive(Debug, PartialEq)]
pub struct LineItem {
    pub id: i64,
    pub name: String,
}

impl Load for Order {
    fn load(output: OutputRef<'_>) -> Result<Self> {
        let order = output.expect_entity()?;
        Ok(Order {
            id: order.field("id")?,
            total: order.field("total")?,
            lines: order.many("lines")?,
        })
    }
}

impl Load for LineItem {
    fn load(output: OutputRef<'_>) -> Result<Self> {
        let item = output.expect_entity()?;
        Ok(LineItem {
            id: item.field("id")?,
            name: item.field("name")?,
        })
    }
}

pub fn line(id: i64, name: &str) -> LineItem {
    LineItem {
        id,
        name: name.to_string(),
    }
}

/// Identifier metadata for every entity type used by the tests.
pub fn catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.entity("Order", ["id"]);
    catalog.entity("LineItem", ["id"]);
    catalog.entity("Product", ["sku"]);
    catalog.entity("Customer", ["id"]);
    catalog.entity("Employee", ["id"]);
    catalog.entity("Department", ["id"]);
    catalog.entity("Enrollment", ["student", "course"]);
    catalog.entity("Shipment", ["key"]);
    catalog
        .entity("Vehicle", ["vin"])
        .discriminator("kind")
        .version("revision");
    catalog
}

pub fn materializer() -> Materializer {
    Materializer::new(catalog())
}

pub fn line_item_entity() -> Entity {
    Entity::builder("LineItem")
        .field("id", Type::I64, "line_id")
        .field("name", Type::String, "name")
        .build()
        .unwrap()
}

pub fn order_entity() -> Entity {
    Entity::builder("Order")
        .field("id", Type::I64, "order_id")
        .field("total", Type::I64, "total")
        .to_many("lines", line_item_entity(), ["order_fk"])
        .build()
        .unwrap()
}

pub fn order_mapping() -> MappingNode {
    order_entity().into()
}

/// Two orders joined with their line items, one row per line item.
pub fn order_rows() -> Rows {
    Rows::from_vec(vec![
        order_row(1, 10, Some((1, "A"))),
        order_row(1, 10, Some((2, "B"))),
        order_row(2, 20, Some((3, "C"))),
    ])
}

pub fn order_row(order_id: i64, total: i64, line: Option<(i64, &str)>) -> Row {
    match line {
        Some((line_id, name)) => hydrate::row! {
            "order_id" => order_id,
            "total" => total,
            "line_id" => line_id,
            "name" => name,
            "order_fk" => order_id,
        },
        None => hydrate::row! {
            "order_id" => order_id,
            "total" => total,
            "line_id" => hydrate::Value::Null,
            "name" => hydrate::Value::Null,
            "order_fk" => hydrate::Value::Null,
        },
    }
}

/// Wraps a cursor and counts the rows pulled from it.
pub struct Counting<C> {
    inner: C,
    pulled: Rc<Cell<usize>>,
}

impl<C> Counting<C> {
    pub fn new(inner: C) -> (Self, Rc<Cell<usize>>) {
        let pulled = Rc::new(Cell::new(0));
        (
            Counting {
                inner,
                pulled: pulled.clone(),
            },
            pulled,
        )
    }
}

impl<C: RowCursor> RowCursor for Counting<C> {
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next(&mut self) -> Result<Row> {
        self.pulled.set(self.pulled.get() + 1);
        self.inner.next()
    }
}
