//! Descriptor model for node kinds and their members.

use std::collections::BTreeMap;
use std::fmt;

use hashbrown::HashMap;
use serde::{Serialize, Serializer};

/// Letters appended to members that form a 2-4 wide group.
pub const AXIS_SUFFIXES: [char; 4] = ['x', 'y', 'z', 'w'];

/// Canonical lookup key: spaces removed, lowercased.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Suffix letter for a native dimension index, `None` for ungrouped members.
pub fn axis_suffix(dimension_idx: i32) -> Option<char> {
    usize::try_from(dimension_idx)
        .ok()
        .and_then(|i| AXIS_SUFFIXES.get(i).copied())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Float,
    Int,
    Enum,
    #[serde(rename = "node_lookup")]
    NodeLookup,
    Hybrid,
}

impl MemberKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Float => "float",
            MemberKind::Int => "int",
            MemberKind::Enum => "enum",
            MemberKind::NodeLookup => "node lookup",
            MemberKind::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Float(f32),
    Int(i32),
}

/// One settable slot of a node kind.
///
/// `index` addresses the member within its own list (variables, lookups or hybrids);
/// the three lists are numbered independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDescriptor {
    pub name: String,
    pub display_name: String,
    pub kind: MemberKind,
    pub index: i32,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "sorted_enum_values"
    )]
    pub enum_values: Option<HashMap<String, i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
}

impl MemberDescriptor {
    pub fn new(display_name: impl Into<String>, kind: MemberKind, index: i32) -> Self {
        let display_name = display_name.into();
        Self {
            name: normalize_name(&display_name),
            display_name,
            kind,
            index,
            enum_values: None,
            description: None,
            default: None,
            min: None,
            max: None,
        }
    }

    /// Native code for an enum value name; matching ignores case and spaces.
    pub fn enum_code(&self, value: &str) -> Option<i32> {
        self.enum_values.as_ref()?.get(&normalize_name(value)).copied()
    }
}

/// Immutable description of one node kind, shared by all of its instances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    pub id: i32,
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(serialize_with = "sorted_members")]
    pub members: HashMap<String, MemberDescriptor>,
}

impl NodeDescriptor {
    pub fn new(id: i32, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            id,
            name: normalize_name(&display_name),
            display_name,
            description: None,
            groups: Vec::new(),
            members: HashMap::new(),
        }
    }

    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.get(&normalize_name(name))
    }

    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &MemberDescriptor> + '_ {
        self.members.values().filter(move |m| m.kind == kind)
    }
}

fn sorted_members<S: Serializer>(
    members: &HashMap<String, MemberDescriptor>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    members
        .iter()
        .collect::<BTreeMap<_, _>>()
        .serialize(serializer)
}

fn sorted_enum_values<S: Serializer>(
    values: &Option<HashMap<String, i32>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    values
        .as_ref()
        .map(|v| v.iter().collect::<BTreeMap<_, _>>())
        .serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_ignores_spaces_and_case() {
        assert_eq!(normalize_name("Distance Function"), "distancefunction");
        assert_eq!(normalize_name(" distance  FUNCTION "), "distancefunction");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn dimension_indices_map_to_axis_letters() {
        assert_eq!(axis_suffix(-1), None);
        assert_eq!(axis_suffix(0), Some('x'));
        assert_eq!(axis_suffix(3), Some('w'));
        assert_eq!(axis_suffix(4), None);
    }

    #[test]
    fn enum_codes_resolve_by_normalized_name() {
        let mut member = MemberDescriptor::new("Distance Function", MemberKind::Enum, 0);
        member.enum_values = Some(
            [("euclidean".to_string(), 0), ("euclideansquared".to_string(), 1)]
                .into_iter()
                .collect(),
        );
        assert_eq!(member.enum_code("Euclidean Squared"), Some(1));
        assert_eq!(member.enum_code("EUCLIDEAN"), Some(0));
        assert_eq!(member.enum_code("Manhattan"), None);
    }

    #[test]
    fn descriptor_json_lists_members_in_name_order() {
        let mut node = NodeDescriptor::new(4, "Fractal FBm");
        for member in [
            MemberDescriptor::new("Source", MemberKind::NodeLookup, 0),
            MemberDescriptor::new("Gain", MemberKind::Hybrid, 0),
        ] {
            node.members.insert(member.name.clone(), member);
        }
        let json = serde_json::to_value(&node).unwrap();
        let keys: Vec<_> = json["members"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["gain", "source"]);
        assert_eq!(json["members"]["source"]["kind"], "node_lookup");
        assert!(json.get("description").is_none());
    }
}
