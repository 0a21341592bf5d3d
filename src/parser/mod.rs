// Style-string and scale-training-spec parsers

pub mod lexer;
pub mod style;
pub mod train;

// Public API re-exports
pub use style::{hex_color, percent_float};
pub use train::{parse_train_spec, ScaleClause};
