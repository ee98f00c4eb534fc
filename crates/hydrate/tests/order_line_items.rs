mod common;
use common::*;

use hydrate::{Graph, Value};
use pretty_assertions::assert_eq;

#[test]
fn orders_with_line_items() {
    let mapping = order_mapping();
    let orders: Vec<Order> = materializer()
        .materialize(&mapping, order_rows())
        .list()
        .unwrap();

    assert_eq!(
        orders,
        vec![
            Order {
                id: 1,
                total: 10,
                lines: vec![line(1, "A"), line(2, "B")],
            },
            Order {
                id: 2,
                total: 20,
                lines: vec![line(3, "C")],
            },
        ]
    );
}

#[test]
fn one_instance_per_identity() {
    let mapping = order_mapping();
    let graph: Graph = materializer()
        .materialize(&mapping, order_rows())
        .into_graph()
        .unwrap();

    assert_eq!(graph.len(), 2);
    assert_eq!(graph.instances_of("Order").count(), 2);
    assert_eq!(graph.instances_of("LineItem").count(), 3);

    let first = graph.result(0).unwrap().expect_entity().unwrap();
    assert_eq!(first.identifier(), &[Value::I64(1)]);
    assert_eq!(first.get("total"), Some(&Value::I64(10)));

    let names: Vec<String> = first
        .many_refs("lines")
        .unwrap()
        .iter()
        .map(|line| line.field("name").unwrap())
        .collect();
    assert_eq!(names, ["A", "B"]);
}

#[test]
fn repeated_rows_do_not_duplicate_children() {
    let mapping = order_mapping();
    let rows = hydrate::row::Rows::from_vec(vec![
        order_row(1, 10, Some((1, "A"))),
        order_row(1, 10, Some((1, "A"))),
        order_row(1, 10, Some((2, "B"))),
        order_row(1, 10, Some((1, "A"))),
    ]);

    let order: Order = materializer().materialize(&mapping, rows).single().unwrap();
    assert_eq!(order.lines, vec![line(1, "A"), line(2, "B")]);
}

#[test]
fn order_follows_first_appearance() {
    let mapping = order_mapping();
    let rows = hydrate::row::Rows::from_vec(vec![
        order_row(2, 20, Some((3, "C"))),
        order_row(1, 10, Some((2, "B"))),
        order_row(2, 20, Some((4, "D"))),
        order_row(1, 10, Some((1, "A"))),
    ]);

    let orders: Vec<Order> = materializer().materialize(&mapping, rows).list().unwrap();

    let ids: Vec<_> = orders.iter().map(|order| order.id).collect();
    assert_eq!(ids, [2, 1]);
    assert_eq!(orders[0].lines, vec![line(3, "C"), line(4, "D")]);
    assert_eq!(orders[1].lines, vec![line(2, "B"), line(1, "A")]);
}

#[test]
fn order_without_line_items() {
    let mapping = order_mapping();
    let rows = hydrate::row::Rows::from_vec(vec![
        order_row(1, 10, None),
        order_row(2, 20, Some((3, "C"))),
    ]);

    let orders: Vec<Order> = materializer().materialize(&mapping, rows).list().unwrap();

    assert!(orders[0].lines.is_empty());
    assert_eq!(orders[1].lines, vec![line(3, "C")]);
}

#[test]
fn iterate_results() {
    let mapping = order_mapping();
    let materializer = materializer();

    let ids = materializer
        .materialize(&mapping, order_rows())
        .iter::<Order>()
        .map(|order| order.map(|order| order.id))
        .collect::<hydrate::Result<Vec<_>>>()
        .unwrap();

    assert_eq!(ids, [1, 2]);
}

#[test]
fn empty_cursor_yields_no_results() {
    let mapping = order_mapping();
    let orders: Vec<Order> = materializer()
        .materialize(&mapping, hydrate::row::Rows::default())
        .list()
        .unwrap();

    assert!(orders.is_empty());
}
