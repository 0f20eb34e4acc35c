use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::{Setters, Setting};
use crate::field_path::{get_field_str, set_field_path};
use crate::filters::Selector;
use crate::resource_extensions::KrmObject;
use crate::resources::{ResourceList, ResultItem};

pub const PRIVATE_NETWORK_DISPLAY_NAME: &str = "private-net";
pub const DEVELOPER_ACCESS_NAME: &str = "k8s-developer-access";

const AUTHORIZED_NETWORKS_PATH: &[&str] = &["spec", "masterAuthorizedNetworksConfig", "cidrBlocks"];
const SERVICE_ACCOUNT_NAMESPACE_PATH: &[&str] =
    &["spec", "memberFrom", "serviceAccountRef", "namespace"];
const NAMESPACE_PATH: &[&str] = &["metadata", "namespace"];

/// A single field patch, applied to every resource its setting and selector admit.
pub struct Rule {
    pub setting: Setting,
    pub selector: Selector,
    /// Evaluated against the resource as it stands when the rule is reached.
    pub guard: Option<fn(&Value) -> bool>,
    pub field_path: &'static [&'static str],
    pub value: fn(&str) -> Value,
    pub message: fn(&Value) -> String,
}

impl Rule {
    /// Appends one result when the rule applies, nothing otherwise.
    pub fn apply(&self, setters: &Setters, resource: &mut Value, results: &mut Vec<ResultItem>) {
        let setting = setters.get(self.setting);
        if setting.is_empty() || !self.selector.matches(resource) {
            return;
        }
        if self.guard.is_some_and(|guard| !guard(resource)) {
            debug!(name = %resource.name(), "guard not satisfied, skipping");
            return;
        }

        let field = self.field_path.join(".");
        match set_field_path(resource, self.field_path, (self.value)(setting)) {
            Ok(()) => {
                info!(name = %resource.name(), %field, key = self.setting.key(), "patched");
                results.push(
                    ResultItem::info((self.message)(resource))
                        .with_resource(resource.resource_ref())
                        .with_field(self.field_path),
                );
            }
            Err(error) => {
                warn!(name = %resource.name(), %field, %error, "patch failed");
                results.push(
                    ResultItem::error(&error)
                        .with_resource(resource.resource_ref())
                        .with_field(self.field_path),
                );
            }
        }
    }
}

fn has_namespace(resource: &Value) -> bool {
    !get_field_str(resource, NAMESPACE_PATH).is_empty()
}

/// The rules in the order they run against each resource.
pub fn rules() -> Vec<Rule> {
    vec![
        // Let the bastion subnet reach the private GKE control plane.
        Rule {
            setting: Setting::SubnetworkRange,
            selector: Selector::gvk(
                "container.cnrm.cloud.google.com",
                "v1beta1",
                "ContainerCluster",
            ),
            guard: None,
            field_path: AUTHORIZED_NETWORKS_PATH,
            value: |range| {
                json!([{
                    "cidrBlock": range,
                    "displayName": PRIVATE_NETWORK_DISPLAY_NAME,
                }])
            },
            message: |_| {
                "Added auth-network block for private GKE cluster to match subnetwork-range"
                    .to_string()
            },
        },
        Rule {
            setting: Setting::Namespace,
            selector: Selector::gvk("iam.cnrm.cloud.google.com", "v1beta1", "IAMPolicyMember")
                .named(DEVELOPER_ACCESS_NAME),
            guard: None,
            field_path: SERVICE_ACCOUNT_NAMESPACE_PATH,
            value: |namespace| json!(namespace),
            message: |_| format!("Updated {DEVELOPER_ACCESS_NAME} referenced namespace"),
        },
        Rule {
            setting: Setting::Namespace,
            selector: Selector::any(),
            guard: None,
            field_path: NAMESPACE_PATH,
            value: |namespace| json!(namespace),
            message: |resource| format!("Updated {} namespace", resource.name()),
        },
        // Re-sets the namespace stamped above and reports it as its own result.
        Rule {
            setting: Setting::Namespace,
            selector: Selector::gvk("blueprints.cloud.google.com", "v1alpha1", "ProjectServiceSet"),
            guard: Some(has_namespace),
            field_path: NAMESPACE_PATH,
            value: |namespace| json!(namespace),
            message: |_| "Updated project-services namespace".to_string(),
        },
    ]
}

/// Runs every rule over every resource in order, collecting outcomes into `results`.
///
/// Field faults are recorded as error results and never stop the pass, so this
/// always reports success.
pub fn patch(setters: &Setters, items: &mut [Value], results: &mut Vec<ResultItem>) -> bool {
    if setters.is_empty() {
        debug!("no setters configured, leaving resources untouched");
        return true;
    }

    let rules = rules();
    for resource in items.iter_mut() {
        debug!(name = %resource.name(), gvk = ?resource.gvk().ok(), "patching resource");
        for rule in &rules {
            rule.apply(setters, resource, results);
        }
    }
    true
}

/// Reads the setters from the list's function config and patches its items in place.
pub fn process(list: &mut ResourceList) -> bool {
    let setters = Setters::from_function_config(list.function_config.as_ref());
    debug!(?setters, items = list.items.len(), "processing resource list");
    patch(&setters, &mut list.items, &mut list.results)
}
