#![allow(unused_variables)]

use super::{
    Association, Column, Compound, Constructor, Embedded, Entity, Field, MappingNode, Member,
    Tuple,
};

/// Read-only traversal of a mapping tree.
///
/// Override the methods of interest and call the matching free function to
/// continue into children.
pub trait Visit<'a> {
    fn visit_node(&mut self, i: &'a MappingNode) {
        visit_node(self, i);
    }

    fn visit_column(&mut self, i: &'a Column) {}

    fn visit_constructor(&mut self, i: &'a Constructor) {
        visit_constructor(self, i);
    }

    fn visit_entity(&mut self, i: &'a Entity) {
        visit_entity(self, i);
    }

    fn visit_embedded(&mut self, i: &'a Embedded) {
        visit_embedded(self, i);
    }

    fn visit_member(&mut self, i: &'a Member) {
        visit_member(self, i);
    }

    fn visit_field(&mut self, i: &'a Field) {}

    fn visit_association(&mut self, i: &'a Association) {
        visit_association(self, i);
    }

    fn visit_compound(&mut self, i: &'a Compound) {
        visit_compound(self, i);
    }

    fn visit_tuple(&mut self, i: &'a Tuple) {
        visit_tuple(self, i);
    }
}

pub fn visit_node<'a, V>(v: &mut V, node: &'a MappingNode)
where
    V: Visit<'a> + ?Sized,
{
    match node {
        MappingNode::Column(node) => v.visit_column(node),
        MappingNode::Constructor(node) => v.visit_constructor(node),
        MappingNode::Entity(node) => v.visit_entity(node),
        MappingNode::Embedded(node) => v.visit_embedded(node),
        MappingNode::Compound(node) => v.visit_compound(node),
        MappingNode::Tuple(node) => v.visit_tuple(node),
    }
}

pub fn visit_constructor<'a, V>(v: &mut V, node: &'a Constructor)
where
    V: Visit<'a> + ?Sized,
{
    for column in node.ordered_columns() {
        v.visit_column(column);
    }
}

pub fn visit_entity<'a, V>(v: &mut V, node: &'a Entity)
where
    V: Visit<'a> + ?Sized,
{
    for member in node.members() {
        v.visit_member(member);
    }
}

pub fn visit_embedded<'a, V>(v: &mut V, node: &'a Embedded)
where
    V: Visit<'a> + ?Sized,
{
    for member in node.fields() {
        v.visit_member(member);
    }
}

pub fn visit_member<'a, V>(v: &mut V, node: &'a Member)
where
    V: Visit<'a> + ?Sized,
{
    match node {
        Member::Field(node) => v.visit_field(node),
        Member::Embedded(node) => v.visit_embedded(node),
        Member::Association(node) => v.visit_association(node),
    }
}

pub fn visit_association<'a, V>(v: &mut V, node: &'a Association)
where
    V: Visit<'a> + ?Sized,
{
    v.visit_entity(node.target());
}

pub fn visit_compound<'a, V>(v: &mut V, node: &'a Compound)
where
    V: Visit<'a> + ?Sized,
{
    for element in node.elements() {
        v.visit_node(element);
    }
}

pub fn visit_tuple<'a, V>(v: &mut V, node: &'a Tuple)
where
    V: Visit<'a> + ?Sized,
{
    for element in node.elements() {
        v.visit_node(element.node());
    }
}

pub fn for_each_entity<'a, F>(node: &'a MappingNode, f: F)
where
    F: FnMut(&'a Entity),
{
    struct ForEach<F> {
        f: F,
    }

    impl<'a, F> Visit<'a> for ForEach<F>
    where
        F: FnMut(&'a Entity),
    {
        fn visit_entity(&mut self, node: &'a Entity) {
            (self.f)(node);
            visit_entity(self, node);
        }
    }

    ForEach { f }.visit_node(node);
}
