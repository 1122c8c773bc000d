//! Diesel schema for task persistence.

diesel::table! {
    /// Task records owned by a single user.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user's Telegram identifier.
        owner_id -> Int8,
        /// Task text.
        #[max_length = 255]
        content -> Varchar,
        /// Optional due instant.
        due_at -> Nullable<Timestamptz>,
        /// Task priority.
        #[max_length = 16]
        priority -> Varchar,
        /// Task status.
        #[max_length = 16]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
    }
}
