use serde_json::Value;

use super::request::ProjectionRequest;
use super::types::{
    Cardinality, EntitySpec, FieldDef, FieldKind, Gate, ListContext, RelationSpec, SqlResult,
};

/// Compile a list query: one JSON object per row under the `record` column,
/// with the entity's default ordering and the caller's filters applied.
pub fn build_list(
    spec: &EntitySpec,
    request: Option<&ProjectionRequest>,
    ctx: &ListContext,
) -> SqlResult {
    let selection = Selection::resolve(spec, request);
    let object = entity_object(spec, &selection);

    let mut query = format!(
        r#"SELECT {} AS record FROM "{}" {}"#,
        object, spec.table, spec.alias
    );
    if !ctx.conditions.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&ctx.conditions.join(" AND "));
    }
    if let Some(order) = spec.order_by {
        query.push_str(" ORDER BY ");
        query.push_str(order);
    }
    if let Some(limit) = ctx.limit {
        query.push_str(&format!(" LIMIT {}", limit));
    }

    SqlResult { query, params: ctx.params.clone() }
}

/// Compile a detail query addressing a single row by id.
pub fn build_detail(spec: &EntitySpec, request: Option<&ProjectionRequest>, id: Value) -> SqlResult {
    let selection = Selection::resolve(spec, request);
    let object = entity_object(spec, &selection);

    let query = format!(
        r#"SELECT {} AS record FROM "{}" {} WHERE {}."id" = $1::uuid"#,
        object, spec.table, spec.alias, spec.alias
    );

    SqlResult { query, params: vec![id] }
}

/// The effective requested-name set: the client's parse, or the entity's
/// default projection synthesized as a request.
enum Selection<'a> {
    Request(&'a ProjectionRequest),
    Default(&'static [&'static str]),
}

impl<'a> Selection<'a> {
    fn resolve(spec: &EntitySpec, request: Option<&'a ProjectionRequest>) -> Self {
        match request {
            Some(r) => Selection::Request(r),
            None => Selection::Default(spec.default_fields),
        }
    }

    fn contains(&self, name: &str) -> bool {
        match self {
            Selection::Request(r) => r.contains(name),
            Selection::Default(names) => names.iter().any(|n| *n == name),
        }
    }

    fn admits(&self, field: &FieldDef) -> bool {
        match field.gate {
            Gate::Name => self.contains(field.name),
            Gate::Always => true,
            Gate::Flag(flag) => self.contains(flag),
        }
    }
}

fn entity_object(spec: &EntitySpec, selection: &Selection) -> String {
    let mut pairs = Vec::new();

    let count = spec.count.as_ref().filter(|count| {
        selection.contains("_count")
            || count
                .implicit_unless
                .map_or(false, |relation| !selection.contains(relation))
    });

    if let Some(count) = count {
        pairs.push(count_pair(spec.alias, count.entries));
    }

    for field in spec.fields {
        if !selection.admits(field) {
            continue;
        }
        // _count and its counterpart relation are mutually exclusive toggles
        if let Some(suppressed) = count.and_then(|c| c.suppresses) {
            if field.name == suppressed {
                continue;
            }
        }
        pairs.push(field_pair(field, spec.alias, selection));
    }

    format!("json_build_object({})", pairs.join(", "))
}

fn field_pair(field: &FieldDef, parent_alias: &str, selection: &Selection) -> String {
    match field.kind {
        FieldKind::Scalar(column) => {
            format!(r#"'{}', {}."{}""#, field.name, parent_alias, column)
        }
        FieldKind::Relation(rel) => {
            format!(r#"'{}', {}"#, field.name, relation_select(rel, parent_alias, selection))
        }
    }
}

fn relation_select(rel: &RelationSpec, parent_alias: &str, selection: &Selection) -> String {
    let inner = relation_object(rel, selection);
    let join = format!(
        r#"{}."{}" = {}."{}""#,
        rel.alias, rel.on.0, parent_alias, rel.on.1
    );

    match rel.cardinality {
        Cardinality::One => format!(
            r#"(SELECT {} FROM "{}" {} WHERE {})"#,
            inner, rel.table, rel.alias, join
        ),
        Cardinality::Many => {
            let order = rel
                .order_by
                .map(|o| format!(" ORDER BY {}", o))
                .unwrap_or_default();
            format!(
                r#"COALESCE((SELECT json_agg({}{}) FROM "{}" {} WHERE {}), '[]'::json)"#,
                inner, order, rel.table, rel.alias, join
            )
        }
    }
}

fn relation_object(rel: &RelationSpec, selection: &Selection) -> String {
    let pairs: Vec<String> = rel
        .fields
        .iter()
        .filter(|field| selection.admits(field))
        .map(|field| field_pair(field, rel.alias, selection))
        .collect();
    format!("json_build_object({})", pairs.join(", "))
}

fn count_pair(root_alias: &str, entries: &[(&str, &RelationSpec)]) -> String {
    let counts: Vec<String> = entries
        .iter()
        .map(|(name, rel)| {
            format!(
                r#"'{}', (SELECT COUNT(*) FROM "{}" {}_c WHERE {}_c."{}" = {}."{}")"#,
                name, rel.table, rel.alias, rel.alias, rel.on.0, root_alias, rel.on.1
            )
        })
        .collect();
    format!("'_count', json_build_object({})", counts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::registry;
    use serde_json::json;

    fn list_sql(spec: &EntitySpec, fields: Option<&str>) -> String {
        let request = fields.map(ProjectionRequest::parse);
        build_list(spec, request.as_ref(), &ListContext::new()).query
    }

    #[test]
    fn default_team_projection_is_all_scalars_and_no_relations() {
        let sql = list_sql(&registry::TEAM, None);
        for scalar in ["'id'", "'name'", "'code'", "'flag'", "'is_participating'", "'is_disqualified'", "'group_id'"] {
            assert!(sql.contains(scalar), "missing {} in {}", scalar, sql);
        }
        assert!(!sql.contains("'players'"));
        assert!(!sql.contains("'group',"));
        assert!(!sql.contains("'_count'"));
        assert!(sql.contains(r#"ORDER BY t."name" ASC"#));
    }

    #[test]
    fn requested_scalars_project_exactly() {
        let sql = list_sql(&registry::TEAM, Some("name,code"));
        assert!(sql.contains("'name'"));
        assert!(sql.contains("'code'"));
        assert!(!sql.contains("'flag'"));
        assert!(!sql.contains("'id',"));
    }

    #[test]
    fn unknown_names_are_silently_ignored() {
        let sql = list_sql(&registry::TEAM, Some("name,password,secret_column"));
        assert!(sql.contains("'name'"));
        assert!(!sql.contains("password"));
        assert!(!sql.contains("secret_column"));
    }

    #[test]
    fn empty_fields_value_projects_nothing() {
        let sql = list_sql(&registry::TEAM, Some(""));
        assert!(sql.contains("json_build_object()"));
    }

    #[test]
    fn relation_descends_only_when_requested() {
        let without = list_sql(&registry::TEAM, Some("name"));
        assert!(!without.contains(r#"FROM "players""#));

        let with = list_sql(&registry::TEAM, Some("name,players"));
        assert!(with.contains(r#"FROM "players""#));
        assert!(with.contains("json_agg"));
        assert!(with.contains(r#"ORDER BY tp."name" ASC"#));
    }

    #[test]
    fn to_one_relation_compiles_to_a_row_subquery() {
        let sql = list_sql(&registry::TEAM, Some("group"));
        assert!(sql.contains(r#"(SELECT json_build_object('id', tg."id", 'label', tg."label") FROM "groups" tg WHERE tg."id" = t."group_id")"#));
    }

    #[test]
    fn fixed_nested_shapes_materialize_with_their_parent() {
        let sql = list_sql(&registry::MATCH, Some("match_entries"));
        // entry rows always carry their team and stage sub-objects
        assert!(sql.contains(r#"FROM "teams" met"#));
        assert!(sql.contains(r#"FROM "stages" mes"#));
        assert!(sql.contains("'goals'"));
        // but the stadium relation was not requested
        assert!(!sql.contains("'stadium'"));
    }

    #[test]
    fn flag_gated_nested_relation_requires_its_flag() {
        let without = list_sql(&registry::QUIZ, Some("questions"));
        assert!(without.contains(r#"FROM "questions""#));
        assert!(!without.contains(r#"FROM "answers""#));

        let with = list_sql(&registry::QUIZ, Some("questions,answers"));
        assert!(with.contains(r#"FROM "answers""#));
        assert!(with.contains("'is_correct'"));
    }

    #[test]
    fn quiz_counts_are_implicit_unless_questions_requested() {
        let bare = list_sql(&registry::QUIZ, Some("id,label"));
        assert!(bare.contains("'_count'"));

        let with_questions = list_sql(&registry::QUIZ, Some("id,questions"));
        assert!(!with_questions.contains("'_count'"));

        let explicit = list_sql(&registry::QUIZ, Some("id,questions,_count"));
        assert!(explicit.contains("'_count'"));
    }

    #[test]
    fn count_suppresses_the_favorite_rows() {
        let counted = list_sql(&registry::USER_FAVORITES, Some("_count"));
        assert!(counted.contains("'_count'"));
        // counts only, no aggregated rows
        assert!(counted.contains(r#"FROM "team_users" uf_c"#));
        assert!(!counted.contains("json_agg"));

        let listed = list_sql(&registry::USER_FAVORITES, Some("followed_at,team"));
        assert!(listed.contains("'followed_teams'"));
        assert!(listed.contains("json_agg"));
        assert!(!listed.contains("'_count'"));
    }

    #[test]
    fn favorites_subfields_are_gated_by_the_flat_set() {
        let sql = list_sql(&registry::USER_FAVORITES, Some("followed_at"));
        assert!(sql.contains("'followed_at'"));
        assert!(!sql.contains("'team_id'"));
        // the team sub-object was not requested
        assert!(!sql.contains("'team',"));
        assert!(!sql.contains("uft"));
    }

    #[test]
    fn default_ticket_projection_includes_its_fixed_relations() {
        let sql = list_sql(&registry::TICKET, None);
        assert!(sql.contains("'serial_number'"));
        assert!(sql.contains("'category'"));
        assert!(sql.contains("'seat'"));
        assert!(sql.contains("'match_links'"));
        assert!(!sql.contains("'category_id'"));
    }

    #[test]
    fn default_ticket_category_projection_carries_counts() {
        let sql = list_sql(&registry::TICKET_CATEGORY, None);
        assert!(sql.contains("'_count'"));
        assert!(sql.contains(r#"FROM "tickets" tct_c"#));
    }

    #[test]
    fn detail_query_addresses_one_row() {
        let id = json!("7e0d9a4e-65ab-41d8-9b0e-5a3a0a3e2f10");
        let sql = build_detail(&registry::TEAM, None, id.clone());
        assert!(sql.query.contains(r#"WHERE t."id" = $1::uuid"#));
        assert!(!sql.query.contains("ORDER BY"));
        assert_eq!(sql.params, vec![id]);
    }

    #[test]
    fn list_context_filters_and_limit_are_appended() {
        let mut ctx = ListContext::new();
        ctx.filter(r#"sp."vip" = $?"#, json!(true)).limit(10);
        let sql = build_list(&registry::SPOT, None, &ctx);
        assert!(sql.query.contains(r#"WHERE sp."vip" = $1"#));
        assert!(sql.query.ends_with("LIMIT 10"));
        assert_eq!(sql.params, vec![json!(true)]);
    }

    #[test]
    fn spot_listing_orders_by_vip_then_name() {
        let sql = list_sql(&registry::SPOT, None);
        assert!(sql.contains(r#"ORDER BY sp."vip" ASC, sp."name" ASC"#));
    }
}
