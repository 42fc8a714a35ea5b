/* src/server/core/rust/src/lib.rs */

pub mod args;
pub mod entity;
pub mod errors;
pub mod method;
pub mod page;
pub mod prop;
pub mod props;
pub mod registry;
pub mod routing;
pub mod runtime;
pub mod signature;
pub mod value;

// Re-exports for ergonomic use
pub use args::{Arg, Args, Payload};
pub use entity::{Entity, EntityCatalog, EntityCollection, entity_basename};
pub use errors::PageError;
pub use method::HttpMethod;
pub use page::{Action, ActionResult, Loader, MiddlewareList, PageDefinition};
pub use prop::{Prop, PropFn, PropStrategy};
pub use props::{PropEntry, Props};
pub use registry::{DefinitionSource, LoadedDefinition, PageFactory, PageRegistry};
pub use routing::{Handler, Route, RouteTable};
pub use runtime::{
  EntityResolver, Inertia, NoEntities, PageObject, PageProps, PageResponse, PartialReload,
  PropValue, RequestContext, Response,
};
pub use signature::{Param, ParamKind, Signature};
pub use value::{Map, Value};
