//! Default constraint names, following PostgreSQL's conventions.
//!
//! | kind        | on a column | on the table                     |
//! |-------------|-------------|----------------------------------|
//! | primary key | `t_pkey`    | `t_c1_c2_pkey`                   |
//! | unique      | `t_c_key`   | `t_c1_c2_key`                    |
//! | foreign key | `t_c_fkey`  | `t_c1_c2_fkey`                   |
//! | check       | `t_c_check` | `t_check`, `t_check1`, ... first unused |
//!
//! A derived name already taken on the table is numbered with
//! [`first_unused`], so two checks on `c` become `t_c_check` and
//! `t_c_check1`.

use super::model::{IndexKind, TableDef};

/// Strips schema qualification and identifier quotes from a name part.
fn bare(name: &str) -> &str {
    let last = name.rsplit('.').next().unwrap_or(name);
    last.trim_matches(|c| c == '"' || c == '`')
}

/// Returns the name given to a constraint declared inline on `column`.
#[must_use]
pub fn inline_constraint_name(table: &str, column: &str, kind: &IndexKind) -> String {
    match kind {
        IndexKind::PrimaryKey => format!("{}_pkey", bare(table)),
        _ => format!("{}_{}_{}", bare(table), bare(column), kind.name_suffix()),
    }
}

/// Returns the name given to a table-level constraint over `columns`.
///
/// Check constraints take the first of `t_check`, `t_check1`, `t_check2`
/// ... not already used on `table`.
#[must_use]
pub fn table_constraint_name(table: &TableDef, columns: &[String], kind: &IndexKind) -> String {
    let table_name = bare(&table.name);
    if let IndexKind::Check { .. } = kind {
        return first_unused(format!("{table_name}_check"), |name| table.has_index(name));
    }

    let mut name = String::from(table_name);
    for column in columns {
        name.push('_');
        name.push_str(bare(column));
    }
    name.push('_');
    name.push_str(kind.name_suffix());
    name
}

/// Returns `base`, or the first of `base1`, `base2` ... not `taken`.
#[must_use]
pub fn first_unused(base: String, taken: impl Fn(&str) -> bool) -> String {
    if !taken(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or(base)
}
