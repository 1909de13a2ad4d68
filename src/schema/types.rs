// src/schema/types.rs

/// Every imported column is stored as text.
pub const TEXT: &str = "TEXT";

/// A single column definition derived from one header cell.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Column {
    pub name: String,
    pub ty: String,
}

impl Column {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: TEXT.to_string(),
        }
    }
}
