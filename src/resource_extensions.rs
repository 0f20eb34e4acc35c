use kube::core::{GroupVersionKind, TypeMeta};
use serde_json::Value;

use crate::field_path::get_field_str;
use crate::resources::ResourceRef;
use crate::{Error, Result};

/// Identity accessors for a KRM object held as an untyped document.
pub trait KrmObject {
    fn gvk(&self) -> Result<GroupVersionKind>;

    /// Empty when `metadata.name` is absent.
    fn name(&self) -> &str;

    fn namespace(&self) -> Option<&str>;

    fn resource_ref(&self) -> ResourceRef;

    fn is_gvk(&self, gvk: &GroupVersionKind) -> bool {
        self.gvk().is_ok_and(|own| own == *gvk)
    }
}

impl KrmObject for Value {
    fn gvk(&self) -> Result<GroupVersionKind> {
        let (Some(api_version), Some(kind)) = (
            self.get("apiVersion").and_then(Value::as_str),
            self.get("kind").and_then(Value::as_str),
        ) else {
            return Err(Error::TypeMetaRequired);
        };
        let type_meta = TypeMeta {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        };
        let gvk: GroupVersionKind = type_meta.try_into()?;
        Ok(gvk)
    }

    fn name(&self) -> &str {
        get_field_str(self, &["metadata", "name"])
    }

    fn namespace(&self) -> Option<&str> {
        self.get("metadata")?.get("namespace")?.as_str()
    }

    fn resource_ref(&self) -> ResourceRef {
        ResourceRef {
            api_version: get_field_str(self, &["apiVersion"]).to_string(),
            kind: get_field_str(self, &["kind"]).to_string(),
            name: self.name().to_string(),
            namespace: self.namespace().map(str::to_string),
        }
    }
}
