// Engine configuration: run settings, sheet layout and language tables
pub mod layout;
pub mod locale;
pub mod settings;

pub use layout::{TaskField, TaskLayout};
pub use locale::Locale;
pub use settings::{ColumnNames, LoaderSettings, Settings};
