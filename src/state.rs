use async_graphql::dynamic::Schema;

/// Shared state handed to every handler.
///
/// The schema is immutable after startup; cloning it only bumps a reference count.
#[derive(Clone)]
pub struct AppState {
    pub schema: Schema,
    /// Serve GraphiQL to browsers on `GET /graphql`.
    pub graphiql: bool,
}

impl AppState {
    pub fn new(schema: Schema, graphiql: bool) -> Self {
        Self { schema, graphiql }
    }
}
