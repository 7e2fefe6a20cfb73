//! Builds parameterized statements: identifiers are compile-time constants, values are bound as parameters.

use super::params::PgBindValue;
use crate::model::StudentPatch;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<PgBindValue>) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v.into());
        n
    }
}

/// Many-to-many table keyed by (owner, member).
#[derive(Clone, Copy, Debug)]
pub struct Link {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub member_column: &'static str,
}

pub const STUDENT_SUBJECTS: Link = Link {
    table: "student_subjects",
    owner_column: "student_id",
    member_column: "subject_id",
};

pub const STUDENT_CLASSES: Link = Link {
    table: "student_classes",
    owner_column: "student_id",
    member_column: "class_id",
};

/// UPDATE students SET only the fields present in the patch. None for an empty patch.
pub fn update_student(id: i32, patch: &StudentPatch) -> Option<QueryBuf> {
    let fields: [(&str, Option<&String>); 2] = [("name", patch.name.as_ref()), ("grade", patch.grade.as_ref())];
    update_fields("students", "id", id, &fields, &["id", "name", "grade"])
}

/// UPDATE subjects SET name.
pub fn update_subject(id: i32, name: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name_param = q.push_param(name);
    let id_param = q.push_param(id);
    q.sql = format!(
        "UPDATE {} SET {} = ${} WHERE {} = ${} RETURNING {}, {}",
        quoted("subjects"),
        quoted("name"),
        name_param,
        quoted("id"),
        id_param,
        quoted("id"),
        quoted("name")
    );
    q
}

fn update_fields(
    table: &str,
    key: &str,
    id: i32,
    fields: &[(&str, Option<&String>)],
    returning: &[&str],
) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (column, value) in fields {
        let Some(value) = value else { continue };
        let param_num = q.push_param(value.as_str());
        sets.push(format!("{} = ${}", quoted(column), param_num));
    }
    if sets.is_empty() {
        return None;
    }
    let id_param = q.push_param(id);
    let returning = returning.iter().map(|c| quoted(c)).collect::<Vec<_>>().join(", ");
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(table),
        sets.join(", "),
        quoted(key),
        id_param,
        returning
    );
    Some(q)
}

/// Insert (owner, member) unless the pair already exists. Affects zero rows on repeat.
pub fn link_insert(link: Link, owner: i32, member: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let o = q.push_param(owner);
    let m = q.push_param(member);
    let table = quoted(link.table);
    let oc = quoted(link.owner_column);
    let mc = quoted(link.member_column);
    q.sql = format!(
        "INSERT INTO {table} ({oc}, {mc}) SELECT ${o}, ${m} \
         WHERE NOT EXISTS (SELECT 1 FROM {table} WHERE {oc} = ${o} AND {mc} = ${m}) \
         ON CONFLICT DO NOTHING"
    );
    q
}

/// Delete one (owner, member) pair.
pub fn link_delete(link: Link, owner: i32, member: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let o = q.push_param(owner);
    let m = q.push_param(member);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${} AND {} = ${}",
        quoted(link.table),
        quoted(link.owner_column),
        o,
        quoted(link.member_column),
        m
    );
    q
}

/// Delete every pair of one owner.
pub fn link_delete_owner(link: Link, owner: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let o = q.push_param(owner);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(link.table),
        quoted(link.owner_column),
        o
    );
    q
}
