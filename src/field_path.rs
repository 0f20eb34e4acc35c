use serde_json::{json, Value};

#[derive(thiserror::Error, Debug)]
pub enum FieldPathError {
    #[error("Field path must have at least one segment")]
    EmptyPath,

    #[error("Resource must be an object to set field {0}")]
    RootObjectRequired(String),

    #[error("Value for field {0} must be an object")]
    ObjectRequired(String),
}

/// Sets `leaf` at `path`, creating any missing intermediate objects.
///
/// Whatever was previously stored at the leaf is replaced. Fails if the root or any
/// intermediate segment holds something other than an object.
pub fn set_field_path(
    root: &mut Value,
    path: &[&str],
    leaf: Value,
) -> std::result::Result<(), FieldPathError> {
    use serde_json::Value::Object;

    let (field, parents) = path.split_last().ok_or(FieldPathError::EmptyPath)?;

    let mut map = match root {
        Object(map) => map,
        _ => return Err(FieldPathError::RootObjectRequired(path.join("."))),
    };
    for (depth, parent) in parents.iter().enumerate() {
        map = match map.entry(*parent).or_insert_with(|| json!({})) {
            Object(inner_map) => inner_map,
            _ => return Err(FieldPathError::ObjectRequired(path[..=depth].join("."))),
        };
    }

    map.insert((*field).to_string(), leaf);
    Ok(())
}

pub fn get_field_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |value, field| value.get(*field))
}

/// Empty when the field is absent or not a string.
pub fn get_field_str<'a>(root: &'a Value, path: &[&str]) -> &'a str {
    get_field_path(root, path)
        .and_then(Value::as_str)
        .unwrap_or_default()
}
