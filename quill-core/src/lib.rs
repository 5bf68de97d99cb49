mod column_selection;
mod connection;
mod driver;
mod entity;
mod error;
mod name_converter;
mod property;
mod record;
mod registry;
mod sql_writer;
mod util;

pub use column_selection::*;
pub use connection::*;
pub use driver::*;
pub use entity::{Dialect, EntityBuilder, EntityDescriptor, PropertySelector};
pub use error::*;
pub use name_converter::*;
pub use property::*;
pub use record::*;
pub use registry::*;
pub use sql_writer::*;
pub use util::*;
