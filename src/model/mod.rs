//! In-memory tree of a generated test suite.
//!
//! One `TestClass` is built per source class and owns every other node. Nodes
//! never point back at their parent; operations that need the class take it
//! as an argument.

pub mod class;
pub mod documentation;
pub mod import;
pub mod method;
pub mod property;
pub mod statement;

pub use class::TestClass;
pub use documentation::TestDocumentation;
pub use import::TestImport;
pub use method::TestMethod;
pub use property::TestProperty;
pub use statement::{StatementKind, TestStatement};
