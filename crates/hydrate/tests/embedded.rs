mod common;
use common::*;

use hydrate::{
    mapping::{Embedded, Entity},
    row,
    row::Rows,
    EmbeddedRef, Load, MappingNode, OutputRef, Result, Type, Value,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
struct Address {
    street: String,
    city: Option<String>,
}

impl Address {
    fn from_ref(address: EmbeddedRef<'_>) -> Result<Self> {
        Ok(Address {
            street: address.field("street")?,
            city: address.field("city")?,
        })
    }
}

impl Load for Address {
    fn load(output: OutputRef<'_>) -> Result<Self> {
        Address::from_ref(output.expect_embedded()?)
    }
}

fn address(container: &str) -> Embedded {
    Embedded::builder(container, "address", "Address")
        .field("street", Type::String, "street")
        .field("city", Type::option(Type::String), "city")
        .build()
        .unwrap()
}

fn customer_mapping() -> MappingNode {
    Entity::builder("Customer")
        .field("id", Type::I64, "customer_id")
        .embedded(address("Customer"))
        .build()
        .unwrap()
        .into()
}

#[test]
fn each_owner_gets_its_own_value() {
    let mapping = customer_mapping();
    let rows = Rows::from_vec(vec![
        row! { "customer_id" => 1i64, "street" => "Main St", "city" => "Oslo" },
        row! { "customer_id" => 2i64, "street" => "Main St", "city" => "Oslo" },
    ]);

    let graph = materializer()
        .materialize(&mapping, rows)
        .into_graph()
        .unwrap();

    let customers: Vec<_> = graph.results().map(|r| r.expect_entity().unwrap()).collect();
    let first = customers[0].embedded("address").unwrap();
    let second = customers[1].embedded("address").unwrap();

    assert_eq!(
        Address::from_ref(first).unwrap(),
        Address::from_ref(second).unwrap()
    );
    assert!(!std::ptr::eq(
        customers[0].slot("address").unwrap(),
        customers[1].slot("address").unwrap()
    ));
    assert_eq!(first.embeddable_type().as_str(), "Address");
}

#[test]
fn repeated_owner_keeps_one_value() {
    let mapping = customer_mapping();
    let rows = Rows::from_vec(vec![
        row! { "customer_id" => 1i64, "street" => "Main St", "city" => Value::Null },
        row! { "customer_id" => 1i64, "street" => "Main St", "city" => Value::Null },
    ]);

    let graph = materializer()
        .materialize(&mapping, rows)
        .into_graph()
        .unwrap();

    let customer = graph.single().unwrap().expect_entity().unwrap();
    let address: Address = Address::from_ref(customer.embedded("address").unwrap()).unwrap();

    assert_eq!(
        address,
        Address {
            street: "Main St".to_string(),
            city: None,
        }
    );
}

#[test]
fn changed_embedded_value_is_inconsistent() {
    let mapping = customer_mapping();
    let rows = Rows::from_vec(vec![
        row! { "customer_id" => 1i64, "street" => "Main St", "city" => "Oslo" },
        row! { "customer_id" => 1i64, "street" => "Main St", "city" => "Bergen" },
    ]);

    let err = materializer()
        .materialize(&mapping, rows)
        .into_graph()
        .unwrap_err();

    assert!(err.is_inconsistent_row());
    assert!(err.to_string().ends_with("conflicting values for `address.city`"));
}

#[test]
fn top_level_embedded_is_one_result_per_row() {
    let mapping: MappingNode = address("Customer").into();
    let rows = Rows::from_vec(vec![
        row! { "street" => "Main St", "city" => "Oslo" },
        row! { "street" => "Main St", "city" => "Oslo" },
        row! { "street" => "High St", "city" => Value::Null },
    ]);

    let addresses: Vec<Address> = materializer().materialize(&mapping, rows).list().unwrap();

    assert_eq!(addresses.len(), 3);
    assert_eq!(addresses[0], addresses[1]);
    assert_eq!(addresses[2].city, None);
}

#[test]
fn nested_embedded() {
    let geo = Embedded::builder("Address", "geo", "Geo")
        .field("lat", Type::F64, "lat")
        .field("lon", Type::F64, "lon")
        .build()
        .unwrap();

    let address = Embedded::builder("Customer", "address", "Address")
        .field("street", Type::String, "street")
        .embedded(geo)
        .build()
        .unwrap();

    let mapping: MappingNode = Entity::builder("Customer")
        .field("id", Type::I64, "customer_id")
        .embedded(address)
        .build()
        .unwrap()
        .into();

    let rows = Rows::from_vec(vec![row! {
        "customer_id" => 1i64,
        "street" => "Main St",
        "lat" => 59.9f64,
        "lon" => 10.75f32,
    }]);

    let graph = materializer()
        .materialize(&mapping, rows)
        .into_graph()
        .unwrap();

    let customer = graph.single().unwrap().expect_entity().unwrap();
    let geo = customer.embedded("address").unwrap().embedded("geo").unwrap();

    assert_eq!(geo.field::<f64>("lat").unwrap(), 59.9);
    assert_eq!(geo.field::<f64>("lon").unwrap(), 10.75);
}

#[test]
fn all_null_embedded_value() {
    let mapping: MappingNode = Embedded::builder("Customer", "address", "Address")
        .field("street", Type::option(Type::String), "street")
        .field("city", Type::option(Type::String), "city")
        .build()
        .unwrap()
        .into();

    let rows = Rows::from_vec(vec![
        row! { "street" => Value::Null, "city" => Value::Null },
    ]);

    let graph = materializer()
        .materialize(&mapping, rows)
        .into_graph()
        .unwrap();

    let address = graph.single().unwrap().expect_embedded().unwrap();
    assert!(address.is_null());
}
