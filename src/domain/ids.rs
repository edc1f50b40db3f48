use uuid::Uuid;

pub fn generate_field_id() -> String {
    format!("field_{}", Uuid::new_v4().simple())
}

pub fn generate_schema_id() -> String {
    format!("schema_{}", Uuid::new_v4().simple())
}
