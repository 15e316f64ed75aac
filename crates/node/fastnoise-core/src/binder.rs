use log::warn;

use crate::error::{NoiseError, Result, ValueShape};
use crate::metadata::MemberKind;
use crate::node::Node;

/// A value for [`Node::set`].
#[derive(Debug, Clone, Copy)]
pub enum MemberValue<'a> {
    Float(f32),
    Int(i32),
    /// Enum value by name; case and spaces are ignored.
    Enum(&'a str),
    Node(&'a Node),
}

impl MemberValue<'_> {
    pub fn shape(&self) -> ValueShape {
        match self {
            MemberValue::Float(_) => ValueShape::Float,
            MemberValue::Int(_) => ValueShape::Int,
            MemberValue::Enum(_) => ValueShape::EnumName,
            MemberValue::Node(_) => ValueShape::Node,
        }
    }
}

impl From<f32> for MemberValue<'_> {
    fn from(value: f32) -> Self {
        MemberValue::Float(value)
    }
}

impl From<i32> for MemberValue<'_> {
    fn from(value: i32) -> Self {
        MemberValue::Int(value)
    }
}

impl<'a> From<&'a str> for MemberValue<'a> {
    fn from(value: &'a str) -> Self {
        MemberValue::Enum(value)
    }
}

impl<'a> From<&'a Node> for MemberValue<'a> {
    fn from(value: &'a Node) -> Self {
        MemberValue::Node(value)
    }
}

impl Node {
    /// Set one member by name.
    ///
    /// The name and value shape are checked against the kind's descriptor before the
    /// engine is touched, so a failed validation leaves the node unchanged. Hybrid
    /// members accept either a float or a node; the last write wins.
    pub fn set<'a>(&mut self, member: &str, value: impl Into<MemberValue<'a>>) -> Result<()> {
        let value = value.into();
        let descriptor = self.metadata();
        let entry = descriptor
            .member(member)
            .ok_or_else(|| NoiseError::UnknownMember {
                node: descriptor.display_name.clone(),
                member: member.to_owned(),
            })?;

        let engine = self.registry.engine();
        let (raw, index) = (self.raw, entry.index);
        let accepted = match (entry.kind, value) {
            (MemberKind::Float, MemberValue::Float(v)) => engine.set_variable_float(raw, index, v),
            (MemberKind::Int, MemberValue::Int(v)) => engine.set_variable_int_enum(raw, index, v),
            (MemberKind::Enum, MemberValue::Enum(name)) => {
                let code = entry
                    .enum_code(name)
                    .ok_or_else(|| NoiseError::UnknownEnumValue {
                        member: entry.display_name.clone(),
                        value: name.to_owned(),
                    })?;
                engine.set_variable_int_enum(raw, index, code)
            }
            (MemberKind::Hybrid, MemberValue::Float(v)) => engine.set_hybrid_float(raw, index, v),
            (MemberKind::NodeLookup, MemberValue::Node(input)) => {
                self.check_same_engine(input, &entry.display_name)?;
                engine.set_node_lookup(raw, index, input.raw)
            }
            (MemberKind::Hybrid, MemberValue::Node(input)) => {
                self.check_same_engine(input, &entry.display_name)?;
                engine.set_hybrid_node_lookup(raw, index, input.raw)
            }
            (expected, value) => {
                return Err(NoiseError::TypeMismatch {
                    member: entry.display_name.clone(),
                    expected,
                    found: value.shape(),
                })
            }
        };

        if accepted {
            Ok(())
        } else {
            warn!(
                "engine rejected {:?} for '{}' on '{}'",
                value, entry.display_name, descriptor.display_name
            );
            Err(NoiseError::EngineRejected {
                member: entry.display_name.clone(),
                kind: entry.kind,
            })
        }
    }

    fn check_same_engine(&self, input: &Node, member: &str) -> Result<()> {
        if self.registry.shares_engine(&input.registry) {
            Ok(())
        } else {
            Err(NoiseError::ForeignNode {
                member: member.to_owned(),
            })
        }
    }
}
