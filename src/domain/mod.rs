mod condition;
mod field;
mod ids;
mod schema;
mod value;

pub use condition::{ConditionAction, ConditionOperator, ConditionPatch, ConditionRule};
pub use field::{
    FieldPatch, FieldType, FormField, SelectOption, ValidationRules, with_added_option,
    with_removed_option, with_updated_option,
};
pub use ids::{generate_field_id, generate_schema_id};
pub use schema::{BuilderMode, FormSchema};
pub use value::{FieldValue, FormValues, coerce_number, coerce_string, format_number};
