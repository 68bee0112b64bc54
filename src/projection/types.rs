use serde_json::Value;

/// When a field materializes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Included when the field's own name is in the requested set.
    Name,
    /// Always included once the enclosing object materializes. Used for the
    /// fixed nested shapes relations carry.
    Always,
    /// Included when some other name is in the requested set, e.g. a question
    /// row only carries its answers when `answers` was requested.
    Flag(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// One column, projected under the field's name.
    Scalar(&'static str),
    Relation(&'static RelationSpec),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub gate: Gate,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn scalar(name: &'static str) -> Self {
        Self { name, gate: Gate::Name, kind: FieldKind::Scalar(name) }
    }

    pub const fn scalar_always(name: &'static str) -> Self {
        Self { name, gate: Gate::Always, kind: FieldKind::Scalar(name) }
    }

    pub const fn relation(name: &'static str, rel: &'static RelationSpec) -> Self {
        Self { name, gate: Gate::Name, kind: FieldKind::Relation(rel) }
    }

    pub const fn relation_always(name: &'static str, rel: &'static RelationSpec) -> Self {
        Self { name, gate: Gate::Always, kind: FieldKind::Relation(rel) }
    }

    pub const fn relation_flag(
        name: &'static str,
        flag: &'static str,
        rel: &'static RelationSpec,
    ) -> Self {
        Self { name, gate: Gate::Flag(flag), kind: FieldKind::Relation(rel) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// A relation edge plus the shape its rows take. Aliases are assigned in the
/// registry and must be unique along any path through an entity's tree.
#[derive(Debug)]
pub struct RelationSpec {
    pub table: &'static str,
    pub alias: &'static str,
    pub cardinality: Cardinality,
    /// Join condition: `child.0 = parent.1`.
    pub on: (&'static str, &'static str),
    pub fields: &'static [FieldDef],
    /// Raw ORDER BY fragment over this relation's alias.
    pub order_by: Option<&'static str>,
}

/// How the `_count` pseudo-field behaves for an entity.
#[derive(Debug)]
pub struct CountSpec {
    /// To-many relations whose row counts are aggregated.
    pub entries: &'static [(&'static str, &'static RelationSpec)],
    /// Relation whose rows are suppressed whenever `_count` is projected -
    /// the two are mutually exclusive toggles on the same data.
    pub suppresses: Option<&'static str>,
    /// When set, `_count` is also projected whenever this relation was NOT
    /// requested, so a bare listing still carries aggregate sizes.
    pub implicit_unless: Option<&'static str>,
}

/// Fixed, ordered registry of everything an entity can project.
#[derive(Debug)]
pub struct EntitySpec {
    pub table: &'static str,
    pub alias: &'static str,
    pub fields: &'static [FieldDef],
    pub count: Option<CountSpec>,
    /// Names projected when the client sends no `fields` parameter. May
    /// include `_count`.
    pub default_fields: &'static [&'static str],
    /// Raw ORDER BY fragment over the entity alias, applied to listings.
    pub order_by: Option<&'static str>,
}

/// A compiled statement plus its positional parameters, bound in order.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

/// Caller-supplied filters and limits for a list query. Conditions are
/// parameterized fragments over the entity alias; the builder never hard-codes
/// any of them.
#[derive(Debug, Default)]
pub struct ListContext {
    pub(crate) conditions: Vec<String>,
    pub(crate) params: Vec<Value>,
    pub(crate) limit: Option<i64>,
}

impl ListContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a condition with one bound parameter. The `$?` placeholder is
    /// rewritten to the parameter's ordinal.
    pub fn filter(&mut self, template: &str, value: Value) -> &mut Self {
        self.params.push(value);
        let ordinal = format!("${}", self.params.len());
        self.conditions.push(template.replace("$?", &ordinal));
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn filter_numbers_parameters_in_order() {
        let mut ctx = ListContext::new();
        ctx.filter(r#"m."date" = $?::timestamptz"#, json!("2024-01-13"))
            .filter(r#"m."status" = $?"#, json!("live"));
        assert_eq!(ctx.conditions[0], r#"m."date" = $1::timestamptz"#);
        assert_eq!(ctx.conditions[1], r#"m."status" = $2"#);
        assert_eq!(ctx.params.len(), 2);
    }
}
