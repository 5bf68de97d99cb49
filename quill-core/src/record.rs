use std::any::TypeId;

/// Declared type of a record field, as far as statement generation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    Float32,
    Float64,
    Enum,
    Decimal,
    String,
    Date,
    Time,
    DateTime,
    TimeSpan,
    Uuid,
    Bytes,
    Optional(&'static FieldType),
    /// Anything without a mapping, carries the type name for diagnostics.
    Other(&'static str),
}

impl FieldType {
    /// The type wrapped by any number of `Optional` layers.
    pub fn unwrap_optional(&self) -> &FieldType {
        match self {
            FieldType::Optional(inner) => inner.unwrap_optional(),
            _ => self,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self.unwrap_optional(),
            FieldType::Int8
                | FieldType::Int16
                | FieldType::Int32
                | FieldType::Int64
                | FieldType::Int128
                | FieldType::UInt8
                | FieldType::UInt16
                | FieldType::UInt32
                | FieldType::UInt64
                | FieldType::UInt128
        )
    }

    pub fn is_primitive(&self) -> bool {
        let ty = self.unwrap_optional();
        ty.is_integer()
            || matches!(
                ty,
                FieldType::Bool | FieldType::Char | FieldType::Float32 | FieldType::Float64
            )
    }
}

/// One named field of a record, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldDef {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// Static shape of a plain data record.
///
/// Usually implemented through `#[derive(Record)]`, the generated field list is what statements
/// are built from.
pub trait Record: 'static {
    /// Unqualified type name, the base of the default table name.
    fn type_name() -> &'static str;

    /// Public fields in declaration order.
    fn fields() -> &'static [FieldDef];
}

/// Type erased [`Record`] shape, what a [`crate::SqlWriter`] receives.
#[derive(Debug, Clone, Copy)]
pub struct RecordType {
    pub id: TypeId,
    pub name: &'static str,
    pub fields: &'static [FieldDef],
}

impl RecordType {
    pub fn of<T: Record>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::type_name(),
            fields: T::fields(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RecordType {}
