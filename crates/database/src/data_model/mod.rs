pub mod journey;
pub mod station;

/// A row as read from the database, convertible into its model.
pub trait DatabaseRow {
    type Model;

    fn to_model(self) -> Self::Model;
}
