//! Diesel schema for task persistence.

diesel::table! {
    /// Classified task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Classified category.
        #[max_length = 50]
        category -> Varchar,
        /// Classified priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Progress status.
        #[max_length = 50]
        status -> Varchar,
        /// Optional assignee.
        #[max_length = 255]
        assigned_to -> Nullable<Varchar>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Entities extracted at the last classification.
        extracted_entities -> Jsonb,
        /// Actions suggested at the last classification.
        suggested_actions -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Field-level change history for tasks.
    task_history (id) {
        /// History entry identifier.
        id -> Uuid,
        /// Task the change belongs to.
        task_id -> Uuid,
        /// Name of the changed field.
        #[max_length = 50]
        field_name -> Varchar,
        /// Value before the change.
        old_value -> Nullable<Text>,
        /// Value after the change.
        new_value -> Nullable<Text>,
        /// When the change was applied.
        changed_at -> Timestamptz,
        /// Insertion order; orders rows sharing `changed_at`.
        sequence -> Int8,
    }
}

diesel::joinable!(task_history -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_history);
