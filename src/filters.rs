use kube::core::GroupVersionKind;
use serde_json::Value;

use crate::resource_extensions::KrmObject;

/// Exact-match predicate over a resource's GVK and name.
///
/// An unset component matches anything. Resources without a parseable
/// `apiVersion`/`kind` never match a selector that names a GVK.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selector {
    pub gvk: Option<GroupVersionKind>,
    pub name: Option<&'static str>,
}

impl Selector {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn gvk(group: &str, version: &str, kind: &str) -> Self {
        Self {
            gvk: Some(GroupVersionKind::gvk(group, version, kind)),
            name: None,
        }
    }

    pub fn named(self, name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..self
        }
    }

    pub fn matches(&self, resource: &Value) -> bool {
        let gvk_matches = match &self.gvk {
            None => true,
            Some(gvk) => resource.is_gvk(gvk),
        };
        gvk_matches && self.name.map_or(true, |name| resource.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[fixture]
    fn iam_member() -> Selector {
        Selector::gvk("iam.cnrm.cloud.google.com", "v1beta1", "IAMPolicyMember")
            .named("k8s-developer-access")
    }

    #[rstest]
    #[case::exact(
        json!({
            "apiVersion": "iam.cnrm.cloud.google.com/v1beta1",
            "kind": "IAMPolicyMember",
            "metadata": {"name": "k8s-developer-access"},
        }),
        true
    )]
    #[case::other_name(
        json!({
            "apiVersion": "iam.cnrm.cloud.google.com/v1beta1",
            "kind": "IAMPolicyMember",
            "metadata": {"name": "other-binding"},
        }),
        false
    )]
    #[case::other_version(
        json!({
            "apiVersion": "iam.cnrm.cloud.google.com/v1beta2",
            "kind": "IAMPolicyMember",
            "metadata": {"name": "k8s-developer-access"},
        }),
        false
    )]
    #[case::kind_is_case_sensitive(
        json!({
            "apiVersion": "iam.cnrm.cloud.google.com/v1beta1",
            "kind": "IamPolicyMember",
            "metadata": {"name": "k8s-developer-access"},
        }),
        false
    )]
    #[case::name_is_case_sensitive(
        json!({
            "apiVersion": "iam.cnrm.cloud.google.com/v1beta1",
            "kind": "IAMPolicyMember",
            "metadata": {"name": "K8s-Developer-Access"},
        }),
        false
    )]
    #[case::no_type_meta(json!({"metadata": {"name": "k8s-developer-access"}}), false)]
    fn test_named_selector(iam_member: Selector, #[case] resource: Value, #[case] expected: bool) {
        assert_eq!(iam_member.matches(&resource), expected);
    }

    #[rstest]
    #[case(json!({"apiVersion": "v1", "kind": "ConfigMap", "metadata": {"name": "a"}}))]
    #[case(json!({"metadata": {}}))]
    #[case(json!("not even an object"))]
    fn test_any_selector(#[case] resource: Value) {
        assert!(Selector::any().matches(&resource));
    }
}
