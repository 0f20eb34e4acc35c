use serde_json::Value;
use tracing::warn;

use crate::field_path::get_field_path;

pub const SUBNETWORK_RANGE_KEY: &str = "subnetwork-range";
pub const NAMESPACE_KEY: &str = "namespace";

/// Values read from the function config's `data` map.
///
/// An empty value disables every rule that depends on it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Setters {
    pub subnetwork_range: String,
    pub namespace: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Setting {
    SubnetworkRange,
    Namespace,
}

impl Setting {
    pub fn key(self) -> &'static str {
        match self {
            Setting::SubnetworkRange => SUBNETWORK_RANGE_KEY,
            Setting::Namespace => NAMESPACE_KEY,
        }
    }
}

impl Setters {
    pub fn from_function_config(function_config: Option<&Value>) -> Self {
        let Some(function_config) = function_config else {
            return Self::default();
        };
        Self {
            subnetwork_range: data_string(function_config, SUBNETWORK_RANGE_KEY),
            namespace: data_string(function_config, NAMESPACE_KEY),
        }
    }

    pub fn get(&self, setting: Setting) -> &str {
        match setting {
            Setting::SubnetworkRange => &self.subnetwork_range,
            Setting::Namespace => &self.namespace,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subnetwork_range.is_empty() && self.namespace.is_empty()
    }
}

fn data_string(function_config: &Value, key: &str) -> String {
    match get_field_path(function_config, &["data", key]) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(value)) => value.clone(),
        Some(other) => {
            warn!(%key, value = %other, "ignoring non-string functionConfig value");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::both(
        Some(json!({"data": {"subnetwork-range": "10.0.0.0/24", "namespace": "team-a"}})),
        "10.0.0.0/24",
        "team-a"
    )]
    #[case::only_namespace(Some(json!({"data": {"namespace": "team-a"}})), "", "team-a")]
    #[case::no_data(Some(json!({"metadata": {"name": "setters"}})), "", "")]
    #[case::no_function_config(None, "", "")]
    #[case::non_string(Some(json!({"data": {"subnetwork-range": 24, "namespace": null}})), "", "")]
    fn test_from_function_config(
        #[case] function_config: Option<Value>,
        #[case] subnetwork_range: &str,
        #[case] namespace: &str,
    ) {
        let setters = Setters::from_function_config(function_config.as_ref());
        assert_eq!(setters.get(Setting::SubnetworkRange), subnetwork_range);
        assert_eq!(setters.get(Setting::Namespace), namespace);
        assert_eq!(
            setters.is_empty(),
            subnetwork_range.is_empty() && namespace.is_empty()
        );
    }
}
