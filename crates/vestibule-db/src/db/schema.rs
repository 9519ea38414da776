//! Diesel table definitions, kept in step with `migrations/`.

diesel::table! {
    departments (id) {
        id -> Int8,
        name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    divisions (id) {
        id -> Int8,
        department_id -> Int8,
        name -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    public_users (id) {
        id -> Int8,
        public_id -> Text,
        name -> Text,
        nic -> Text,
        address -> Nullable<Text>,
        phone -> Nullable<Text>,
        department_id -> Nullable<Int8>,
        division_id -> Nullable<Int8>,
        status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    staff_users (id) {
        id -> Int8,
        username -> Text,
        password_hash -> Text,
        name -> Text,
        role -> Text,
        department_id -> Nullable<Int8>,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    user_sessions (id) {
        id -> Int8,
        staff_user_id -> Int8,
        token_hash -> Text,
        expires_at -> Timestamptz,
        is_valid -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    registry_entries (id) {
        id -> Int8,
        registry_id -> Text,
        public_user_id -> Nullable<Int8>,
        visitor_name -> Text,
        visitor_nic -> Text,
        visitor_address -> Nullable<Text>,
        visitor_phone -> Nullable<Text>,
        department_id -> Int8,
        division_id -> Nullable<Int8>,
        purpose_of_visit -> Text,
        remarks -> Nullable<Text>,
        visitor_type -> Text,
        status -> Text,
        entry_time -> Timestamptz,
        updated_at -> Timestamptz,
        created_by -> Nullable<Int8>,
    }
}

diesel::table! {
    registry_sequence (name) {
        name -> Text,
        last_value -> Int8,
    }
}

diesel::joinable!(divisions -> departments (department_id));
diesel::joinable!(user_sessions -> staff_users (staff_user_id));

diesel::allow_tables_to_appear_in_same_query!(
    departments,
    divisions,
    public_users,
    staff_users,
    user_sessions,
    registry_entries,
    registry_sequence,
);
