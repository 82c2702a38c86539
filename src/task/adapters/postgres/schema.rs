//! Diesel schema for task persistence.

diesel::table! {
    /// Tenants. Referenced by tasks for validation only.
    accounts (id_account) {
        /// Surrogate account identifier.
        id_account -> Int8,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Soft-delete flag.
        deleted -> Bool,
        /// Creation timestamp.
        date_created -> Timestamptz,
    }
}

diesel::table! {
    /// Users within an account. Referenced by tasks for validation only.
    users (id_user) {
        /// Surrogate user identifier.
        id_user -> Int8,
        /// Owning account.
        id_account -> Int8,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Soft-delete flag.
        deleted -> Bool,
        /// Creation timestamp.
        date_created -> Timestamptz,
    }
}

diesel::table! {
    /// Task records, soft-deleted rows included.
    tasks (id_task) {
        /// Store-assigned task identifier.
        id_task -> Int8,
        /// Owning account.
        id_account -> Int8,
        /// Owning user.
        id_user -> Int8,
        /// Title, unique per owner among live rows.
        #[max_length = 100]
        title -> Varchar,
        /// Description, empty by default.
        #[max_length = 500]
        description -> Varchar,
        /// Priority code.
        priority -> Int2,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Status code.
        status -> Int2,
        /// Creation timestamp.
        date_created -> Timestamptz,
        /// Last modification timestamp.
        date_modified -> Timestamptz,
        /// Soft-delete flag.
        deleted -> Bool,
    }
}
