mod common;
use common::*;

use hydrate::{
    mapping::{Entity, LockHint},
    metadata::Catalog,
    row,
    row::Rows,
    ColumnCase, EntityMetadata, MappingNode, Materializer, Type,
};

use std::sync::Arc;

fn upper_case_rows() -> Rows {
    Rows::from_vec(vec![
        row! { "ORDER_ID" => 1i64, "Total" => 10i64, "LINE_ID" => 1i64, "Name" => "A", "order_FK" => 1i64 },
        row! { "ORDER_ID" => 1i64, "Total" => 10i64, "LINE_ID" => 2i64, "Name" => "B", "order_FK" => 1i64 },
    ])
}

#[test]
fn column_names_are_case_sensitive_by_default() {
    let mapping = order_mapping();
    let err = materializer()
        .materialize(&mapping, upper_case_rows())
        .into_graph()
        .unwrap_err();

    assert!(err.is_missing_column());
}

#[test]
fn case_insensitive_columns() {
    let materializer = Materializer::builder()
        .metadata(catalog())
        .column_case(ColumnCase::Insensitive)
        .build()
        .unwrap();

    let mapping = order_mapping();
    let orders: Vec<Order> = materializer
        .materialize(&mapping, upper_case_rows())
        .list()
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].lines, vec![line(1, "A"), line(2, "B")]);
}

#[test]
fn builder_requires_metadata() {
    let err = Materializer::builder().build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "materializer requires an entity metadata provider"
    );
}

#[test]
fn shared_metadata_provider() {
    let metadata: Arc<dyn EntityMetadata> = Arc::new(catalog());

    let mut builder = Materializer::builder();
    builder.shared_metadata(metadata.clone()).diagnostics(false);

    let first = builder.build().unwrap();
    let second = builder.case_insensitive_columns().build().unwrap();

    assert!(!first.options().diagnostics);
    assert_eq!(first.options().column_case, ColumnCase::Sensitive);
    assert_eq!(second.options().column_case, ColumnCase::Insensitive);

    let mapping = order_mapping();
    let orders: Vec<Order> = first.materialize(&mapping, order_rows()).list().unwrap();
    assert_eq!(orders.len(), 2);
}

#[test]
fn one_materializer_many_passes() {
    let materializer = materializer();
    let mapping = order_mapping();

    let first: Vec<Order> = materializer.materialize(&mapping, order_rows()).list().unwrap();
    let second: Vec<Order> = materializer.materialize(&mapping, order_rows()).list().unwrap();

    assert_eq!(first, second);
}

#[test]
fn diagnostics_do_not_change_results() {
    let mut catalog = Catalog::new();
    catalog
        .entity("Vehicle", ["vin"])
        .discriminator("kind")
        .version("revision");

    // Maps the discriminator as a plain field and omits the version member.
    let mapping: MappingNode = Entity::builder("Vehicle")
        .lock_hint(LockHint::Optimistic)
        .field("vin", Type::String, "vin")
        .field("kind", Type::String, "kind")
        .build()
        .unwrap()
        .into();

    let materializer = Materializer::builder()
        .metadata(catalog)
        .diagnostics(true)
        .build()
        .unwrap();

    let rows = Rows::from_vec(vec![row! { "vin" => "V1", "kind" => "car" }]);
    let graph = materializer
        .materialize(&mapping, rows)
        .into_graph()
        .unwrap();

    let vehicle = graph.single().unwrap().expect_entity().unwrap();
    assert_eq!(vehicle.field::<String>("kind").unwrap(), "car");
    assert_eq!(vehicle.discriminator(), None);
}
