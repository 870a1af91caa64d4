//! Field-map builders shared by the canonical type declarations.
//!
//! Most canonical types are long lists of plain string attributes. These
//! helpers turn a list of attribute names into an ordered [`FieldMap`] so each
//! type declaration only spells out its nested and list-of-object fields.

use crate::error::RegistryError;

/// Built-in string scalar.
pub const STRING: &str = "String";
/// RFC 3339 timestamp scalar used for the `*Parsed` fields.
pub const DATE_TIME: &str = "DateTime";

/// Wrapping applied to a field's named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Nullable single value.
    Single,
    /// Non-null single value.
    Required,
    /// Nullable list of nullable values.
    List,
}

/// Type of one field: a named type plus its wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldType {
    pub type_name: &'static str,
    pub shape: Shape,
}

impl FieldType {
    pub const fn single(type_name: &'static str) -> Self {
        Self {
            type_name,
            shape: Shape::Single,
        }
    }

    pub const fn required(type_name: &'static str) -> Self {
        Self {
            type_name,
            shape: Shape::Required,
        }
    }

    pub const fn list(type_name: &'static str) -> Self {
        Self {
            type_name,
            shape: Shape::List,
        }
    }

    /// Renders the type in SDL notation, e.g. `[ItunesCategory]` or `String!`.
    pub fn sdl(&self) -> String {
        match self.shape {
            Shape::Single => self.type_name.to_string(),
            Shape::Required => format!("{}!", self.type_name),
            Shape::List => format!("[{}]", self.type_name),
        }
    }
}

/// Ordered mapping from field name to field type.
///
/// Declaration order is kept so introspection lists fields the way they
/// are declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: Vec<(&'static str, FieldType)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, rejecting a name that is already present.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateField`] on a repeated name.
    pub fn insert(&mut self, name: &'static str, ty: FieldType) -> Result<(), RegistryError> {
        if self.get(name).is_some() {
            return Err(RegistryError::DuplicateField(name.to_string()));
        }
        self.fields.push((name, ty));
        Ok(())
    }

    /// Adds or replaces a field; a replaced field keeps its position.
    pub fn upsert(&mut self, name: &'static str, ty: FieldType) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = ty,
            None => self.fields.push((name, ty)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, ty)| ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldType)> {
        self.fields.iter().map(|(name, ty)| (*name, ty))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Maps every name to a nullable `String` field.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateField`] if a name repeats. Repeated
/// names are always a typo in a declaration, so they are rejected instead of
/// silently collapsing into one field.
pub fn scalar_field_map(names: &[&'static str]) -> Result<FieldMap, RegistryError> {
    uniform_field_map(names, FieldType::single(STRING))
}

/// Maps every name to a nullable `[String]` field.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateField`] if a name repeats.
pub fn list_scalar_field_map(names: &[&'static str]) -> Result<FieldMap, RegistryError> {
    uniform_field_map(names, FieldType::list(STRING))
}

/// Builds a scalar field map from `names`, then merges `extra` into it.
///
/// Fields in `extra` take precedence when a name appears in both.
///
/// # Errors
///
/// Returns [`RegistryError::DuplicateField`] if a name repeats within `names`.
pub fn merge_scalar_field_map(
    names: &[&'static str],
    extra: FieldMap,
) -> Result<FieldMap, RegistryError> {
    let mut fields = scalar_field_map(names)?;
    for (name, ty) in extra.iter() {
        fields.upsert(name, *ty);
    }
    Ok(fields)
}

fn uniform_field_map(names: &[&'static str], ty: FieldType) -> Result<FieldMap, RegistryError> {
    let mut fields = FieldMap::new();
    for name in names {
        fields.insert(*name, ty)?;
    }
    Ok(fields)
}
