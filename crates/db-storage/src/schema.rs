// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

diesel::table! {
    required_fields (id) {
        id -> Int8,
        field_name -> Varchar,
    }
}

diesel::table! {
    users (id) {
        id -> Int8,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        birth_date -> Nullable<Varchar>,
        birth_place -> Nullable<Varchar>,
        sex -> Nullable<Varchar>,
        current_address -> Nullable<Varchar>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(required_fields, users);
