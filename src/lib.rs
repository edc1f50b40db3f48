#![deny(rust_2018_idioms)]

pub mod builder;
pub mod domain;
pub mod error;
pub mod io;
pub mod preview;
pub mod rules;

#[cfg(test)]
mod tests;

pub use builder::{BuilderCommand, BuilderOptions, FormBuilder, ShortcutContext};
pub use domain::{
    BuilderMode, ConditionAction, ConditionOperator, ConditionRule, FieldPatch, FieldType,
    FieldValue, FormField, FormSchema, FormValues, SelectOption, ValidationRules,
};
pub use error::{ImportError, StoreError};
pub use preview::PreviewState;
pub use rules::{FieldVisibility, FormValidator, ValidationOutcome};

pub mod prelude {
    pub use super::{
        BuilderCommand, BuilderOptions, FieldPatch, FieldType, FieldValue, FormBuilder,
        FormField, FormSchema, PreviewState, ValidationOutcome,
    };
}
