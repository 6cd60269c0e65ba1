//! Diesel schema for task persistence.

diesel::table! {
    /// Task records. Soft-deleted rows stay in the table.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Business identifier, unique among rows with `is_deleted = false`.
        #[max_length = 255]
        task_code -> Varchar,
        /// Optional subject line.
        task_subject -> Nullable<Text>,
        /// Optional free-text description.
        task_detail -> Nullable<Text>,
        /// Status name.
        #[max_length = 50]
        task_status -> Varchar,
        /// Assignment date.
        assigned_date -> Date,
        /// Project reference.
        #[max_length = 255]
        project_code -> Varchar,
        /// Assigned employee username.
        #[max_length = 255]
        assigned_employee -> Varchar,
        /// Assigned manager username.
        #[max_length = 255]
        assigned_manager -> Varchar,
        /// Soft-delete flag.
        is_deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
