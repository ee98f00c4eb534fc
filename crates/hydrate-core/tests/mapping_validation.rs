use hydrate_core::{
    mapping::{Column, Compound, Constructor, Embedded, Entity, Tuple},
    MappingNode, Type,
};
use pretty_assertions::assert_eq;

fn line_item() -> Entity {
    Entity::builder("LineItem")
        .field("id", Type::I64, "line_id")
        .field("name", Type::String, "name")
        .build()
        .unwrap()
}

#[test]
fn valid_entity_with_association() {
    let order = Entity::builder("Order")
        .field("id", Type::I64, "order_id")
        .field("total", Type::I64, "total")
        .to_many("lines", line_item(), ["order_fk"])
        .build()
        .unwrap();

    assert_eq!(order.members().len(), 3);
    assert!(order.member("lines").unwrap().as_association().unwrap().is_plural());
    assert_eq!(order.associations().count(), 1);
}

#[test]
fn duplicate_member_name() {
    let err = Entity::builder("Order")
        .field("id", Type::I64, "order_id")
        .field("id", Type::I64, "other_id")
        .build()
        .unwrap_err();

    assert!(err.is_invalid_mapping());
    assert_eq!(
        err.to_string(),
        "invalid mapping: `Order` declares member `id` more than once"
    );
}

#[test]
fn empty_entity_type() {
    let err = Entity::builder("").build().unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn empty_column_name() {
    let err = Entity::builder("Order")
        .field("id", Type::I64, "")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_mapping());

    assert!(Column::new("", Type::I64).unwrap_err().is_invalid_mapping());
}

#[test]
fn association_without_join_columns() {
    let err = Entity::builder("Order")
        .field("id", Type::I64, "order_id")
        .to_many("lines", line_item(), Vec::<String>::new())
        .build()
        .unwrap_err();

    assert!(err.is_invalid_mapping());
    assert_eq!(
        err.to_string(),
        "invalid mapping: association `Order.lines` has no join columns"
    );
}

#[test]
fn empty_discriminator_column() {
    let err = Entity::builder("Vehicle")
        .discriminator("")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn embedded_validates_its_fields() {
    let err = Embedded::builder("Customer", "address", "Address")
        .field("city", Type::String, "city")
        .field("city", Type::String, "town")
        .build()
        .unwrap_err();
    assert!(err.is_invalid_mapping());

    let err = Embedded::builder("Customer", "", "Address").build().unwrap_err();
    assert!(err.is_invalid_mapping());
}

#[test]
fn constructor_columns_are_validated() {
    let err = Constructor::builder("Summary")
        .column("total", Type::I64)
        .column("", Type::String)
        .build()
        .unwrap_err();
    assert!(err.is_invalid_mapping());

    let summary = Constructor::builder("Summary")
        .column("total", Type::I64)
        .column("name", Type::String)
        .build()
        .unwrap();
    assert_eq!(summary.ordered_columns()[1].name(), "name");
}

#[test]
fn empty_compound() {
    let err = Compound::new(Vec::<MappingNode>::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid mapping: compound requires at least one element"
    );

    let compound = Compound::new(vec![Column::new("total", Type::I64).unwrap()]).unwrap();
    assert_eq!(compound.len(), 1);
    assert!(!compound.is_empty());
}

#[test]
fn tuple_aliases() {
    let mut builder = Tuple::builder();
    let total = builder.push_aliased("total", Column::new("total", Type::I64).unwrap());
    let name = builder.push(Column::new("name", Type::String).unwrap());
    let tuple = builder.build().unwrap();

    assert_eq!(tuple.handle("total"), Some(total));
    assert_eq!(name.index(), 1);
    assert_eq!(tuple.handle("name"), None);
    assert_eq!(tuple.len(), 2);
    assert!(!tuple.is_empty());
}

#[test]
fn tuple_duplicate_alias() {
    let mut builder = Tuple::builder();
    builder.push_aliased("x", Column::new("a", Type::I64).unwrap());
    builder.push_aliased("x", Column::new("b", Type::I64).unwrap());

    let err = builder.build().unwrap_err();
    assert!(err.is_invalid_mapping());
    assert_eq!(
        err.to_string(),
        "invalid mapping: tuple alias `x` is used more than once"
    );
}

#[test]
fn empty_tuple() {
    assert!(Tuple::builder().build().unwrap_err().is_invalid_mapping());
}

#[test]
fn for_each_entity_reaches_association_targets() {
    let order = Entity::builder("Order")
        .field("id", Type::I64, "order_id")
        .to_many("lines", line_item(), ["order_fk"])
        .build()
        .unwrap();

    let root = MappingNode::Compound(
        Compound::new([
            MappingNode::from(order),
            Column::new("total", Type::I64).unwrap().into(),
        ])
        .unwrap(),
    );

    let mut seen = vec![];
    root.for_each_entity(|entity| seen.push(entity.entity_type().to_string()));
    assert_eq!(seen, ["Order", "LineItem"]);
}

#[test]
fn structurally_equal_mappings_are_equal() {
    let a = MappingNode::from(line_item());
    let b = MappingNode::from(line_item());
    assert_eq!(a, b);
    assert!(a.is_identity_bearing());
}
