use bitflags::bitflags;

bitflags! {
    /// Which properties of an entity take part in a statement.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColumnSelection: u8 {
        const KEYS = 0b0001;
        const NON_KEYS = 0b0010;
        const COMPUTED = 0b0100;
        /// Renders for a write: no `AS` aliases on columns, casts on parameters.
        const WRITE = 0b1000;

        const SELECT = Self::KEYS.bits() | Self::NON_KEYS.bits() | Self::COMPUTED.bits();
        const ALL = Self::KEYS.bits() | Self::NON_KEYS.bits();
    }
}

impl Default for ColumnSelection {
    fn default() -> Self {
        Self::SELECT
    }
}
