use std::fmt::Display;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

pub const RESOURCE_LIST_API_VERSION: &str = "config.kubernetes.io/v1";
pub const RESOURCE_LIST_KIND: &str = "ResourceList";

/// The envelope a KRM function reads from stdin and writes back to stdout.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_config: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceList {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let list: Self = serde_yaml::from_reader(reader)?;
        if list.kind != RESOURCE_LIST_KIND {
            return Err(Error::NotAResourceList(list.kind));
        }
        Ok(list)
    }

    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    pub fn has_errors(&self) -> bool {
        self.results
            .iter()
            .any(|result| result.severity == Severity::Error)
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,
}

impl ResultItem {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            resource_ref: None,
            field: None,
        }
    }

    pub fn error(error: impl Display) -> Self {
        Self {
            message: error.to_string(),
            severity: Severity::Error,
            resource_ref: None,
            field: None,
        }
    }

    pub fn with_resource(self, resource_ref: ResourceRef) -> Self {
        Self {
            resource_ref: Some(resource_ref),
            ..self
        }
    }

    pub fn with_field(self, path: &[&str]) -> Self {
        Self {
            field: Some(Field {
                path: path.join("."),
            }),
            ..self
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    pub path: String,
}
