use std::str::FromStr;

use crate::Field;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Fields that failed presence validation, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        match self {
            Error::Validate(errors) => {
                let mut fields = errors
                    .field_errors()
                    .keys()
                    .filter_map(|key| Field::from_str(key).ok())
                    .collect::<Vec<_>>();
                fields.sort();
                fields
            }
        }
    }
}
