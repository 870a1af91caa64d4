//! The canonical type registry.
//!
//! Declares the ten object types of the public schema exactly once, leaf
//! types first: a type may only reference types that are already declared.
//! `ItunesCategory` is the one exception that needs two phases: it is
//! declared with its scalar field, and its self-referential `subcategory`
//! field is attached once the type exists.
//!
//! The registry is built on first access and never changes afterwards.

use std::sync::OnceLock;

use super::field_map::{
    DATE_TIME, FieldMap, FieldType, STRING, list_scalar_field_map, merge_scalar_field_map,
    scalar_field_map,
};
use crate::error::RegistryError;

pub const FEED: &str = "Feed";
pub const ITEM: &str = "Item";
pub const PERSON: &str = "Person";
pub const IMAGE: &str = "Image";
pub const ENCLOSURE: &str = "Enclosure";
pub const ITUNES_OWNER: &str = "ItunesOwner";
pub const ITUNES_CATEGORY: &str = "ItunesCategory";
pub const ITUNES_FEED_EXTENSION: &str = "ItunesFeedExtension";
pub const ITUNES_ITEM_EXTENSION: &str = "ItunesItemExtension";
pub const DUBLIN_CORE_EXTENSION: &str = "DublinCoreExtension";

/// Scalars every declaration may reference.
pub const SCALARS: &[&str] = &[STRING, DATE_TIME];

/// One object type of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: FieldMap,
}

/// Ordered, validated set of canonical object types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeDef>,
}

static CANONICAL: OnceLock<TypeRegistry> = OnceLock::new();

/// The process-wide canonical registry.
///
/// Built on first call and shared read-only for the life of the process.
///
/// # Errors
///
/// Returns [`RegistryError`] if the declarations are inconsistent. This is a
/// programming defect; callers treat it as fatal at startup.
pub fn canonical_types() -> Result<&'static TypeRegistry, RegistryError> {
    if let Some(registry) = CANONICAL.get() {
        return Ok(registry);
    }
    let registry = TypeRegistry::canonical()?;
    Ok(CANONICAL.get_or_init(|| registry))
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a type.
    ///
    /// Every field must reference a scalar or an already-declared type.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateType`] if `def.name` is taken
    /// - [`RegistryError::UnknownType`] for a reference to an undeclared type,
    ///   including the type itself
    pub fn declare(&mut self, def: TypeDef) -> Result<(), RegistryError> {
        if self.get(def.name).is_some() {
            return Err(RegistryError::DuplicateType(def.name.to_string()));
        }
        for (_, ty) in def.fields.iter() {
            self.check_reference(def.name, ty)?;
        }
        self.types.push(def);
        Ok(())
    }

    /// Attaches a field to a type that is already declared.
    ///
    /// This is the second phase for self-referential types: once the owner
    /// exists, the field may reference the owner itself.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownType`] if the owner or the referenced type
    ///   is not declared
    /// - [`RegistryError::DuplicateField`] if the owner already has the field
    pub fn attach_field(
        &mut self,
        owner: &str,
        name: &'static str,
        ty: FieldType,
    ) -> Result<(), RegistryError> {
        self.check_reference(owner, &ty)?;
        let def = self
            .types
            .iter_mut()
            .find(|t| t.name == owner)
            .ok_or_else(|| RegistryError::UnknownType {
                owner: owner.to_string(),
                referenced: owner.to_string(),
            })?;
        def.fields.insert(name, ty)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn check_reference(&self, owner: &str, ty: &FieldType) -> Result<(), RegistryError> {
        if SCALARS.contains(&ty.type_name) || self.get(ty.type_name).is_some() {
            Ok(())
        } else {
            Err(RegistryError::UnknownType {
                owner: owner.to_string(),
                referenced: ty.type_name.to_string(),
            })
        }
    }

    /// Builds the canonical registry in dependency order.
    pub fn canonical() -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        registry.declare(TypeDef {
            name: IMAGE,
            description: "Image is an image that is the artwork for a given feed or item.",
            fields: scalar_field_map(&["url", "title"])?,
        })?;

        registry.declare(TypeDef {
            name: ENCLOSURE,
            description: "Enclosure is a file associated with a given Item.",
            fields: scalar_field_map(&["url", "length", "type"])?,
        })?;

        registry.declare(TypeDef {
            name: PERSON,
            description: "Person is an individual specified in a feed (e.g. an author).",
            fields: scalar_field_map(&["name", "email"])?,
        })?;

        registry.declare(TypeDef {
            name: ITUNES_OWNER,
            description: "ItunesOwner is the owner of a particular itunes feed.",
            fields: scalar_field_map(&["name", "email"])?,
        })?;

        registry.declare(TypeDef {
            name: ITUNES_CATEGORY,
            description: "ItunesCategory is a category element for itunes feeds.",
            fields: scalar_field_map(&["text"])?,
        })?;
        registry.attach_field(
            ITUNES_CATEGORY,
            "subcategory",
            FieldType::list(ITUNES_CATEGORY),
        )?;

        registry.declare(TypeDef {
            name: ITUNES_FEED_EXTENSION,
            description: "ItunesFeedExtension is a set of extension fields for RSS feeds.",
            fields: merge_scalar_field_map(
                &[
                    "author", "block", "explicit", "keywords", "subtitle", "summary", "image",
                    "complete", "type",
                ],
                object_fields(&[
                    ("categories", FieldType::list(ITUNES_CATEGORY)),
                    ("owner", FieldType::single(ITUNES_OWNER)),
                ])?,
            )?,
        })?;

        registry.declare(TypeDef {
            name: ITUNES_ITEM_EXTENSION,
            description: "ItunesItemExtension is a set of extension fields for RSS items.",
            fields: scalar_field_map(&[
                "author",
                "block",
                "duration",
                "explicit",
                "keywords",
                "subtitle",
                "summary",
                "image",
                "isClosedCaptioned",
                "episode",
                "season",
                "order",
                "episodeType",
            ])?,
        })?;

        registry.declare(TypeDef {
            name: DUBLIN_CORE_EXTENSION,
            description: "DublinCoreExtension represents a feed extension for the Dublin Core specification.",
            fields: list_scalar_field_map(&[
                "title",
                "creator",
                "author",
                "subject",
                "description",
                "publisher",
                "contributor",
                "date",
                "type",
                "format",
                "identifier",
                "source",
                "language",
                "relation",
                "coverage",
                "rights",
            ])?,
        })?;

        registry.declare(TypeDef {
            name: ITEM,
            description: "Item is the universal Item type that atom.Entry and rss.Item get translated to. It represents a single entry in a given feed.",
            fields: merge_scalar_field_map(
                &[
                    "title",
                    "description",
                    "link",
                    "content",
                    "updated",
                    "published",
                    "guid",
                ],
                object_fields(&[
                    ("updatedParsed", FieldType::single(DATE_TIME)),
                    ("publishedParsed", FieldType::single(DATE_TIME)),
                    ("author", FieldType::single(PERSON)),
                    ("image", FieldType::single(STRING)),
                    ("categories", FieldType::list(STRING)),
                    ("enclosures", FieldType::list(ENCLOSURE)),
                    ("itunesExt", FieldType::single(ITUNES_ITEM_EXTENSION)),
                    ("dcExt", FieldType::single(DUBLIN_CORE_EXTENSION)),
                ])?,
            )?,
        })?;

        registry.declare(TypeDef {
            name: FEED,
            description: "Feed is the universal Feed type that atom.Feed and rss.Feed get translated to. It represents a web feed.",
            fields: merge_scalar_field_map(
                &[
                    "title",
                    "description",
                    "link",
                    "feedLink",
                    "updated",
                    "language",
                    "image",
                    "copyright",
                    "generator",
                    "feedType",
                    "feedVersion",
                ],
                object_fields(&[
                    ("author", FieldType::single(PERSON)),
                    ("updatedParsed", FieldType::single(DATE_TIME)),
                    ("published", FieldType::required(STRING)),
                    ("publishedParsed", FieldType::single(DATE_TIME)),
                    ("categories", FieldType::list(STRING)),
                    ("items", FieldType::list(ITEM)),
                    ("itunesExt", FieldType::single(ITUNES_FEED_EXTENSION)),
                    ("dcExt", FieldType::single(DUBLIN_CORE_EXTENSION)),
                ])?,
            )?,
        })?;

        Ok(registry)
    }
}

fn object_fields(fields: &[(&'static str, FieldType)]) -> Result<FieldMap, RegistryError> {
    let mut map = FieldMap::new();
    for (name, ty) in fields {
        map.insert(*name, *ty)?;
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        DublinCoreExtension, Enclosure, Feed, Image, Item, ItunesCategory, ItunesFeedExtension,
        ItunesItemExtension, ItunesOwner, Person,
    };
    use serde::Serialize;
    use serde_json::Value;

    #[test]
    fn test_declaration_order() {
        let registry = TypeRegistry::canonical().unwrap();
        let names: Vec<_> = registry.types().map(|t| t.name).collect();

        assert_eq!(
            names,
            [
                IMAGE,
                ENCLOSURE,
                PERSON,
                ITUNES_OWNER,
                ITUNES_CATEGORY,
                ITUNES_FEED_EXTENSION,
                ITUNES_ITEM_EXTENSION,
                DUBLIN_CORE_EXTENSION,
                ITEM,
                FEED,
            ]
        );
    }

    #[test]
    fn test_category_is_self_referential() {
        let registry = TypeRegistry::canonical().unwrap();
        let category = registry.get(ITUNES_CATEGORY).unwrap();

        assert_eq!(category.fields.names().collect::<Vec<_>>(), ["text", "subcategory"]);
        assert_eq!(
            category.fields.get("subcategory"),
            Some(&FieldType::list(ITUNES_CATEGORY))
        );
    }

    #[test]
    fn test_field_counts() {
        let registry = TypeRegistry::canonical().unwrap();
        let count = |name| registry.get(name).unwrap().fields.len();

        assert_eq!(count(DUBLIN_CORE_EXTENSION), 16);
        assert_eq!(count(ITUNES_ITEM_EXTENSION), 13);
        assert_eq!(count(ITUNES_FEED_EXTENSION), 11);
        assert_eq!(count(ITEM), 15);
        assert_eq!(count(FEED), 19);
    }

    #[test]
    fn test_feed_published_is_required() {
        let registry = TypeRegistry::canonical().unwrap();
        let feed = registry.get(FEED).unwrap();
        assert_eq!(feed.fields.get("published").unwrap().sdl(), "String!");
        assert_eq!(feed.fields.get("items").unwrap().sdl(), "[Item]");
    }

    #[test]
    fn test_single_pass_self_reference_is_rejected() {
        let mut registry = TypeRegistry::new();
        let mut fields = FieldMap::new();
        fields
            .insert("subcategory", FieldType::list(ITUNES_CATEGORY))
            .unwrap();

        let err = registry
            .declare(TypeDef {
                name: ITUNES_CATEGORY,
                description: "",
                fields,
            })
            .unwrap_err();

        assert!(matches!(err, RegistryError::UnknownType { .. }));
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .declare(TypeDef {
                name: ITEM,
                description: "",
                fields: object_fields(&[("author", FieldType::single(PERSON))]).unwrap(),
            })
            .unwrap_err();

        assert_eq!(
            err,
            RegistryError::UnknownType {
                owner: ITEM.to_string(),
                referenced: PERSON.to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let mut registry = TypeRegistry::new();
        let def = TypeDef {
            name: PERSON,
            description: "",
            fields: scalar_field_map(&["name"]).unwrap(),
        };
        registry.declare(def.clone()).unwrap();

        assert_eq!(
            registry.declare(def).unwrap_err(),
            RegistryError::DuplicateType(PERSON.to_string())
        );
    }

    #[test]
    fn test_canonical_types_is_shared() {
        let first = canonical_types().unwrap();
        let second = canonical_types().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 10);
    }

    fn assert_addressable<T: Serialize + Default>(registry: &TypeRegistry, type_name: &str) {
        let value = serde_json::to_value(T::default()).unwrap();
        let Value::Object(attributes) = value else {
            panic!("{type_name} does not serialize to an object");
        };

        for field in registry.get(type_name).unwrap().fields.names() {
            assert!(
                attributes.contains_key(field),
                "{type_name}.{field} has no matching attribute"
            );
        }
    }

    #[test]
    fn test_every_field_is_addressable_on_the_model() {
        let registry = TypeRegistry::canonical().unwrap();

        assert_addressable::<Feed>(&registry, FEED);
        assert_addressable::<Item>(&registry, ITEM);
        assert_addressable::<Person>(&registry, PERSON);
        assert_addressable::<Image>(&registry, IMAGE);
        assert_addressable::<Enclosure>(&registry, ENCLOSURE);
        assert_addressable::<ItunesOwner>(&registry, ITUNES_OWNER);
        assert_addressable::<ItunesCategory>(&registry, ITUNES_CATEGORY);
        assert_addressable::<ItunesFeedExtension>(&registry, ITUNES_FEED_EXTENSION);
        assert_addressable::<ItunesItemExtension>(&registry, ITUNES_ITEM_EXTENSION);
        assert_addressable::<DublinCoreExtension>(&registry, DUBLIN_CORE_EXTENSION);
    }
}
