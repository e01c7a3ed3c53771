//! Schema model and constraint naming.

mod model;
pub mod naming;

pub use model::{
    ColumnDef, ColumnModifiers, EnumTypeDef, ForeignKeyAction, ForeignKeyRef, IndexDef, IndexKind,
    SchemaState, TableDef,
};
