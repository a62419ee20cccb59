// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use barrel::backend::Pg;
use barrel::{types, Migration};

pub fn migration() -> String {
    let mut migr = Migration::new();

    migr.create_table("users", |table| {
        table.add_column("id", types::custom("BIGSERIAL").primary(true));
        table.add_column("first_name", types::varchar(255).nullable(true));
        table.add_column("last_name", types::varchar(255).nullable(true));
        table.add_column("birth_date", types::varchar(255).nullable(true));
        table.add_column("birth_place", types::varchar(255).nullable(true));
        table.add_column("sex", types::varchar(255).nullable(true));
        table.add_column("current_address", types::varchar(255).nullable(true));
    });

    migr.create_table("required_fields", |table| {
        table.add_column("id", types::custom("BIGSERIAL").primary(true));
        table.add_column("field_name", types::varchar(255).nullable(false));
    });

    migr.make::<Pg>()
}
