// Row -> template context transformation
pub mod context;
pub mod date_format;
pub mod fields;
pub mod number_words;
pub mod row_normalizer;
pub mod task_reshaper;

pub use context::{Clock, ContextAssembler, FixedClock, SystemClock};
pub use date_format::DateFormatter;
pub use number_words::{NumberSpeller, RussianSpeller};
pub use row_normalizer::RowNormalizer;
pub use task_reshaper::TaskReshaper;
