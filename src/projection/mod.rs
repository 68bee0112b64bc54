// Partial-response query builder.
//
// Each entity declares a fixed registry of selectable fields (`EntitySpec`).
// A client's `?fields=` list is parsed into a `ProjectionRequest` and the
// builder compiles registry + request + list context into one SQL statement
// that materializes a JSON object per row. Nothing outside the registry can
// ever be projected.

pub mod builder;
pub mod registry;
pub mod request;
pub mod types;

pub use builder::{build_detail, build_list};
pub use request::ProjectionRequest;
pub use types::{ListContext, SqlResult};
