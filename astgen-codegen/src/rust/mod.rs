//! Rust code generation modules.

pub mod base;
pub mod constructors;
pub mod nodes;
pub mod types;
pub mod visitors;

pub use base::BaseGenerator;
pub use constructors::ConstructorGenerator;
pub use nodes::NodeGenerator;
pub use types::TypeResolver;
pub use visitors::VisitorGenerator;
