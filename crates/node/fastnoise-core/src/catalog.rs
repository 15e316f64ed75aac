//! One-shot walk over the engine's metadata tables.

use fastnoise_native::{NoiseEngine, VariableType};
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use log::{debug, warn};

use crate::metadata::{
    axis_suffix, normalize_name, DefaultValue, MemberDescriptor, MemberKind, NodeDescriptor,
};

/// Build one descriptor per node kind, in catalog order (`descriptor.id == position`).
///
/// An engine reporting zero kinds yields an empty catalog; that is not an error.
pub fn load_catalog(engine: &dyn NoiseEngine) -> Vec<NodeDescriptor> {
    let count = engine.metadata_count().max(0);
    (0..count)
        .map(|id| {
            let descriptor = load_kind(engine, id);
            debug!(
                "node kind {id} '{}' with {} members",
                descriptor.display_name,
                descriptor.members.len()
            );
            descriptor
        })
        .collect()
}

fn load_kind(engine: &dyn NoiseEngine, id: i32) -> NodeDescriptor {
    let display_name = engine.metadata_name(id).unwrap_or_else(|| {
        warn!("node kind {id} has no name and cannot be resolved by name");
        String::new()
    });
    let mut node = NodeDescriptor::new(id, display_name);
    node.description = engine.metadata_description(id);
    node.groups = engine.metadata_group_names(id);

    for index in 0..engine.variable_count(id).max(0) {
        let code = engine.variable_type(id, index);
        let Some(ty) = VariableType::from_code(code) else {
            warn!(
                "skipping variable {index} of '{}': unknown type code {code}",
                node.display_name
            );
            continue;
        };
        let kind = match ty {
            VariableType::Float => MemberKind::Float,
            VariableType::Int => MemberKind::Int,
            VariableType::Enum => MemberKind::Enum,
        };
        let Some(mut member) = named_member(
            &node,
            engine.variable_name(id, index),
            engine.variable_dimension_idx(id, index),
            kind,
            index,
        ) else {
            continue;
        };
        member.description = engine.variable_description(id, index);
        member.min = engine.variable_min_float(id, index);
        member.max = engine.variable_max_float(id, index);
        member.default = match kind {
            MemberKind::Float => engine
                .variable_default_float(id, index)
                .map(DefaultValue::Float),
            _ => engine
                .variable_default_int_enum(id, index)
                .map(DefaultValue::Int),
        };
        if kind == MemberKind::Enum {
            member.enum_values = Some(load_enum_values(engine, id, index));
        }
        insert_member(&mut node, member);
    }

    for index in 0..engine.node_lookup_count(id).max(0) {
        let Some(mut member) = named_member(
            &node,
            engine.node_lookup_name(id, index),
            engine.node_lookup_dimension_idx(id, index),
            MemberKind::NodeLookup,
            index,
        ) else {
            continue;
        };
        member.description = engine.node_lookup_description(id, index);
        insert_member(&mut node, member);
    }

    for index in 0..engine.hybrid_count(id).max(0) {
        let Some(mut member) = named_member(
            &node,
            engine.hybrid_name(id, index),
            engine.hybrid_dimension_idx(id, index),
            MemberKind::Hybrid,
            index,
        ) else {
            continue;
        };
        member.description = engine.hybrid_description(id, index);
        member.default = engine.hybrid_default(id, index).map(DefaultValue::Float);
        insert_member(&mut node, member);
    }

    node
}

fn named_member(
    node: &NodeDescriptor,
    name: Option<String>,
    dimension_idx: i32,
    kind: MemberKind,
    index: i32,
) -> Option<MemberDescriptor> {
    let Some(base) = name else {
        warn!(
            "skipping unnamed {kind} member {index} of '{}'",
            node.display_name
        );
        return None;
    };
    Some(MemberDescriptor::new(
        dimension_name(node, base, dimension_idx),
        kind,
        index,
    ))
}

fn dimension_name(node: &NodeDescriptor, base: String, dimension_idx: i32) -> String {
    match axis_suffix(dimension_idx) {
        Some(axis) => format!("{base} {axis}"),
        None => {
            if dimension_idx >= 0 {
                warn!(
                    "member '{base}' of '{}' has dimension index {dimension_idx}; leaving it unsuffixed",
                    node.display_name
                );
            }
            base
        }
    }
}

fn load_enum_values(engine: &dyn NoiseEngine, id: i32, index: i32) -> HashMap<String, i32> {
    let mut values = HashMap::new();
    for code in 0..engine.enum_count(id, index).max(0) {
        match engine.enum_name(id, index, code) {
            Some(name) => {
                values.entry(normalize_name(&name)).or_insert(code);
            }
            None => warn!("enum value {code} of variable {index} on kind {id} has no name"),
        }
    }
    values
}

fn insert_member(node: &mut NodeDescriptor, member: MemberDescriptor) {
    match node.members.entry(member.name.clone()) {
        Entry::Occupied(existing) => warn!(
            "'{}' declares '{}' twice; keeping the {} member",
            node.display_name,
            member.display_name,
            existing.get().kind
        ),
        Entry::Vacant(slot) => {
            slot.insert(member);
        }
    }
}
