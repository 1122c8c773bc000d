//! Diesel schema for user profiles.

diesel::table! {
    /// Chat users keyed by their platform identifier.
    users (id) {
        /// Telegram user identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Public handle.
        #[max_length = 64]
        username -> Nullable<Varchar>,
        /// Client language tag.
        #[max_length = 16]
        language_code -> Nullable<Varchar>,
        /// First contact timestamp.
        registered_at -> Timestamptz,
        /// Latest contact timestamp.
        last_seen_at -> Timestamptz,
    }
}
