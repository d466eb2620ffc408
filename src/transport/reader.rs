use serde_json::{Map, Value};

use crate::domain::{FieldError, FieldErrors};

const ROOT: &str = "$";

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Typed view over one JSON object that records `TypeMismatch` errors
/// instead of failing, so a whole payload can be checked in one pass.
///
/// Field paths are absolute (`address.zipCode`).
pub(super) struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
    path: String,
}

impl<'a> Fields<'a> {
    pub(super) fn root(value: &'a Value, errors: &mut FieldErrors) -> Self {
        Self::object(value, String::new(), errors)
    }

    fn object(value: &'a Value, path: String, errors: &mut FieldErrors) -> Self {
        let map = match value {
            Value::Object(map) => Some(map),
            other => {
                let at = if path.is_empty() { ROOT } else { path.as_str() };
                errors.push(FieldError::type_mismatch(at, "object", type_name(other)));
                None
            }
        };
        Self { map, path }
    }

    fn absent(path: String) -> Self {
        Self { map: None, path }
    }

    pub(super) fn path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.and_then(|map| map.get(key))
    }

    /// Required string. Absent yields `""` so validation reports it as missing.
    pub(super) fn string(&self, key: &str, errors: &mut FieldErrors) -> String {
        match self.get(key) {
            None => String::new(),
            Some(value) => self.expect_string(key, value, errors).unwrap_or_default(),
        }
    }

    /// String whose key must be present even when any value would pass
    /// validation. Absent yields `MissingField` here.
    pub(super) fn present_string(&self, key: &str, errors: &mut FieldErrors) -> String {
        match self.get(key) {
            None => {
                errors.push(FieldError::missing(self.path(key)));
                String::new()
            }
            Some(value) => self.expect_string(key, value, errors).unwrap_or_default(),
        }
    }

    /// Optional string. Absent and `null` both mean "not provided".
    pub(super) fn optional_string(&self, key: &str, errors: &mut FieldErrors) -> Option<String> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => self.expect_string(key, value, errors),
        }
    }

    /// Patch semantics: absent keeps, `null` clears, a string sets.
    pub(super) fn patch_string(
        &self,
        key: &str,
        errors: &mut FieldErrors,
    ) -> Option<Option<String>> {
        match self.get(key)? {
            Value::Null => Some(None),
            value => self.expect_string(key, value, errors).map(Some),
        }
    }

    /// Patch of a required string: absent keeps, `null` is a type error.
    pub(super) fn patch_required_string(
        &self,
        key: &str,
        errors: &mut FieldErrors,
    ) -> Option<String> {
        let value = self.get(key)?;
        self.expect_string(key, value, errors)
    }

    pub(super) fn bool(&self, key: &str, errors: &mut FieldErrors) -> bool {
        match self.get(key) {
            None => {
                errors.push(FieldError::missing(self.path(key)));
                false
            }
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                errors.push(FieldError::type_mismatch(
                    self.path(key),
                    "boolean",
                    type_name(other),
                ));
                false
            }
        }
    }

    pub(super) fn number(&self, key: &str, errors: &mut FieldErrors) -> f64 {
        match self.get(key) {
            None => {
                errors.push(FieldError::missing(self.path(key)));
                0.0
            }
            Some(Value::Number(number)) => number.as_f64().unwrap_or(f64::NAN),
            Some(other) => {
                errors.push(FieldError::type_mismatch(
                    self.path(key),
                    "number",
                    type_name(other),
                ));
                0.0
            }
        }
    }

    /// Required list of strings. Absent yields an empty list.
    pub(super) fn string_list(&self, key: &str, errors: &mut FieldErrors) -> Vec<String> {
        match self.get(key) {
            None => Vec::new(),
            Some(value) => self.expect_string_list(key, value, errors).unwrap_or_default(),
        }
    }

    pub(super) fn optional_string_list(
        &self,
        key: &str,
        errors: &mut FieldErrors,
    ) -> Option<Vec<String>> {
        match self.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => self.expect_string_list(key, value, errors),
        }
    }

    pub(super) fn patch_string_list(
        &self,
        key: &str,
        errors: &mut FieldErrors,
    ) -> Option<Option<Vec<String>>> {
        match self.get(key)? {
            Value::Null => Some(None),
            value => self.expect_string_list(key, value, errors).map(Some),
        }
    }

    pub(super) fn patch_required_string_list(
        &self,
        key: &str,
        errors: &mut FieldErrors,
    ) -> Option<Vec<String>> {
        let value = self.get(key)?;
        self.expect_string_list(key, value, errors)
    }

    /// Nested object. Absent yields an empty view whose reads are all absent.
    pub(super) fn nested(&self, key: &str, errors: &mut FieldErrors) -> Fields<'a> {
        match self.get(key) {
            None => Self::absent(self.path(key)),
            Some(value) => Self::object(value, self.path(key), errors),
        }
    }

    /// Nested object for a patch: `None` when the key is absent.
    pub(super) fn patch_nested(&self, key: &str, errors: &mut FieldErrors) -> Option<Fields<'a>> {
        let value = self.get(key)?;
        Some(Self::object(value, self.path(key), errors))
    }

    /// Every member of this object as a nested view, in key order.
    pub(super) fn members(&self, errors: &mut FieldErrors) -> Vec<(&'a str, Fields<'a>)> {
        let Some(map) = self.map else {
            return Vec::new();
        };
        map.iter()
            .map(|(key, value)| (key.as_str(), Self::object(value, self.path(key), errors)))
            .collect()
    }

    fn expect_string(&self, key: &str, value: &Value, errors: &mut FieldErrors) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            other => {
                errors.push(FieldError::type_mismatch(
                    self.path(key),
                    "string",
                    type_name(other),
                ));
                None
            }
        }
    }

    fn expect_string_list(
        &self,
        key: &str,
        value: &Value,
        errors: &mut FieldErrors,
    ) -> Option<Vec<String>> {
        let Value::Array(items) = value else {
            errors.push(FieldError::type_mismatch(
                self.path(key),
                "array",
                type_name(value),
            ));
            return None;
        };
        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => out.push(s.clone()),
                other => errors.push(FieldError::type_mismatch(
                    format!("{}[{idx}]", self.path(key)),
                    "string",
                    type_name(other),
                )),
            }
        }
        Some(out)
    }
}
