use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static DEFAULT_CATALOG: Lazy<CatalogManifest> = Lazy::new(|| {
    let raw = include_str!("../fixtures/catalog.json");
    serde_json::from_str(raw).expect("fixture catalog should parse")
});

/// The catalog shipped with the fixtures.
pub fn default_catalog() -> &'static CatalogManifest {
    &DEFAULT_CATALOG
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogManifest {
    #[serde(default)]
    pub nodes: Vec<KindSpec>,
}

impl CatalogManifest {
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse mock engine catalog")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub variables: Vec<VariableSpec>,
    #[serde(default)]
    pub lookups: Vec<LookupSpec>,
    #[serde(default)]
    pub hybrids: Vec<HybridSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    Float,
    Int,
    Enum,
}

impl VariableKind {
    /// Native type code reported through `fnGetMetadataVariableType`.
    pub fn code(self) -> i32 {
        match self {
            VariableKind::Float => 0,
            VariableKind::Int => 1,
            VariableKind::Enum => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[serde(default = "no_dimension")]
    pub dimension: i32,
    #[serde(default)]
    pub default: f64,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub enum_values: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl VariableSpec {
    /// Whether the engine would accept `value` for this variable.
    pub fn accepts(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSpec {
    pub name: String,
    #[serde(default = "no_dimension")]
    pub dimension: i32,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSpec {
    pub name: String,
    #[serde(default = "no_dimension")]
    pub dimension: i32,
    #[serde(default)]
    pub default: f32,
    #[serde(default)]
    pub description: Option<String>,
}

fn no_dimension() -> i32 {
    -1
}
