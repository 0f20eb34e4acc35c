#![deny(rustdoc::broken_intra_doc_links, rustdoc::bare_urls, rust_2018_idioms)]

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Parsing apiVersion and Kind: {0}")]
    ParseGroupVersionError(#[from] kube::core::gvk::ParseGroupVersionError),

    #[error("YamlError: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Resource is missing apiVersion or kind")]
    TypeMetaRequired,

    #[error("Expected a ResourceList, got kind '{0}'")]
    NotAResourceList(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub mod config;
pub mod field_path;
pub mod filters;
/// The ordered patch rules and the pass that applies them
pub mod patcher;
pub mod resource_extensions;
pub mod resources;
