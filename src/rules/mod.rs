mod conditions;
mod validation;

pub use conditions::{FieldVisibility, evaluate, is_met};
pub use validation::{FormValidator, ValidationOutcome, compile, is_email};
