//! Executable schema: the canonical types plus the root `parse` query.

use std::str::FromStr;
use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, Scalar, Schema, TypeRef,
};
use async_graphql::{ErrorExtensions, Value};

use super::field_map::{DATE_TIME, FieldType, Shape};
use super::registry::{FEED, TypeDef, canonical_types};
use crate::domain::FeedParser;
use crate::error::RegistryError;

/// Name of the root query type.
pub const QUERY: &str = "Query";

/// What the `parse` resolver does when the feed cannot be fetched or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchErrorMode {
    /// `parse` is null and the response carries a `FETCH_ERROR` or
    /// `PARSE_ERROR` entry in `errors`.
    #[default]
    Report,
    /// `parse` is null and no error is reported.
    Silent,
}

impl FromStr for FetchErrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "report" => Ok(Self::Report),
            "silent" => Ok(Self::Silent),
            other => Err(format!("expected 'report' or 'silent', got '{other}'")),
        }
    }
}

/// Assembles the executable schema.
///
/// ```graphql
/// type Query {
///   parse(rssUrl: String!): Feed
/// }
/// ```
///
/// # Errors
///
/// Returns [`RegistryError`] if the canonical registry or the engine rejects
/// the type definitions. Callers must not serve traffic in that case.
pub fn build_schema(
    parser: Arc<dyn FeedParser>,
    error_mode: FetchErrorMode,
) -> Result<Schema, RegistryError> {
    let registry = canonical_types()?;

    let builder = Schema::build(QUERY, None, None)
        .register(Scalar::new(DATE_TIME).description("An RFC 3339 timestamp in UTC."));

    registry
        .types()
        .fold(builder, |builder, def| builder.register(object_type(def)))
        .register(query_type())
        .data(parser)
        .data(error_mode)
        .finish()
        .map_err(|e| RegistryError::Schema(e.to_string()))
}

fn query_type() -> Object {
    Object::new(QUERY).field(
        Field::new("parse", TypeRef::named(FEED), |ctx| {
            FieldFuture::new(resolve_parse(ctx))
        })
        .description("Fetches the feed at `rssUrl` and returns it in canonical form.")
        .argument(InputValue::new(
            "rssUrl",
            TypeRef::named_nn(TypeRef::STRING),
        )),
    )
}

async fn resolve_parse(ctx: ResolverContext<'_>) -> async_graphql::Result<Option<FieldValue<'_>>> {
    let url = ctx.args.try_get("rssUrl")?.string()?.to_string();
    let parser = ctx.data::<Arc<dyn FeedParser>>()?;
    let mode = ctx.data_opt::<FetchErrorMode>().copied().unwrap_or_default();

    match parser.parse_url(&url).await {
        Ok(feed) => {
            tracing::info!(url = %url, items = feed.items.len(), "Feed resolved");
            let value = async_graphql::to_value(&feed)
                .map_err(|e| async_graphql::Error::new(e.to_string()))?;
            Ok(Some(FieldValue::value(value)))
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, code = e.code(), "Failed to resolve feed");
            match mode {
                FetchErrorMode::Report => Err(e.extend()),
                FetchErrorMode::Silent => Ok(None),
            }
        }
    }
}

fn object_type(def: &TypeDef) -> Object {
    def.fields.iter().fold(
        Object::new(def.name).description(def.description),
        |object, (name, ty)| object.field(attribute_field(name, ty)),
    )
}

/// A field resolved by looking up the attribute of the same name on the
/// parent value. Missing attributes resolve to null.
fn attribute_field(name: &'static str, ty: &FieldType) -> Field {
    Field::new(name, type_ref(ty), move |ctx| {
        let value = attribute(&ctx, name);
        FieldFuture::new(async move { Ok(value) })
    })
}

fn attribute<'a>(ctx: &ResolverContext<'a>, name: &str) -> Option<FieldValue<'a>> {
    match ctx.parent_value.as_value()? {
        Value::Object(attributes) => attributes.get(name).cloned().and_then(into_field_value),
        _ => None,
    }
}

fn into_field_value<'a>(value: Value) -> Option<FieldValue<'a>> {
    match value {
        Value::Null => None,
        Value::List(items) => Some(FieldValue::list(
            items
                .into_iter()
                .map(|item| into_field_value(item).unwrap_or(FieldValue::NULL)),
        )),
        other => Some(FieldValue::value(other)),
    }
}

fn type_ref(ty: &FieldType) -> TypeRef {
    match ty.shape {
        Shape::Single => TypeRef::named(ty.type_name),
        Shape::Required => TypeRef::named_nn(ty.type_name),
        Shape::List => TypeRef::named_list(ty.type_name),
    }
}
