// Fixed field registries, one per entity.
//
// These are the only names a client can ever project. Aliases are assigned
// here and must stay unique along any path through an entity's tree.

use super::types::{Cardinality, CountSpec, EntitySpec, FieldDef, RelationSpec};

// ---------------------------------------------------------------------------
// teams

static TEAM_GROUP: RelationSpec = RelationSpec {
    table: "groups",
    alias: "tg",
    cardinality: Cardinality::One,
    on: ("id", "group_id"),
    fields: &[FieldDef::scalar_always("id"), FieldDef::scalar_always("label")],
    order_by: None,
};

static TEAM_PLAYERS: RelationSpec = RelationSpec {
    table: "players",
    alias: "tp",
    cardinality: Cardinality::Many,
    on: ("team_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("number"),
        FieldDef::scalar_always("position"),
        FieldDef::scalar_always("photo"),
        FieldDef::scalar_always("team_id"),
    ],
    order_by: Some(r#"tp."name" ASC"#),
};

static TEAM_FOLLOWERS: RelationSpec = RelationSpec {
    table: "team_users",
    alias: "tf",
    cardinality: Cardinality::Many,
    on: ("team_id", "id"),
    fields: &[
        FieldDef::scalar_always("user_id"),
        FieldDef::scalar_always("followed_at"),
    ],
    order_by: None,
};

static TEAM_ENTRIES: RelationSpec = RelationSpec {
    table: "match_stage_teams",
    alias: "te",
    cardinality: Cardinality::Many,
    on: ("team_id", "id"),
    fields: &[
        FieldDef::scalar_always("match_id"),
        FieldDef::scalar_always("stage_id"),
        FieldDef::scalar_always("goals"),
        FieldDef::scalar_always("assists"),
        FieldDef::scalar_always("corners"),
        FieldDef::scalar_always("fouls"),
        FieldDef::scalar_always("offsides"),
        FieldDef::scalar_always("possession"),
        FieldDef::scalar_always("red_cards"),
        FieldDef::scalar_always("yellow_cards"),
        FieldDef::scalar_always("is_winner"),
    ],
    order_by: None,
};

pub static TEAM: EntitySpec = EntitySpec {
    table: "teams",
    alias: "t",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("name"),
        FieldDef::scalar("code"),
        FieldDef::scalar("flag"),
        FieldDef::scalar("is_participating"),
        FieldDef::scalar("is_disqualified"),
        FieldDef::scalar("group_id"),
        FieldDef::relation("group", &TEAM_GROUP),
        FieldDef::relation("players", &TEAM_PLAYERS),
        FieldDef::relation("following_users", &TEAM_FOLLOWERS),
        FieldDef::relation("match_entries", &TEAM_ENTRIES),
    ],
    count: Some(CountSpec {
        entries: &[
            ("players", &TEAM_PLAYERS),
            ("following_users", &TEAM_FOLLOWERS),
            ("match_entries", &TEAM_ENTRIES),
        ],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &[
        "id",
        "name",
        "code",
        "flag",
        "is_participating",
        "is_disqualified",
        "group_id",
    ],
    order_by: Some(r#"t."name" ASC"#),
};

// ---------------------------------------------------------------------------
// players

static PLAYER_TEAM: RelationSpec = RelationSpec {
    table: "teams",
    alias: "pt",
    cardinality: Cardinality::One,
    on: ("id", "team_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("code"),
        FieldDef::scalar_always("flag"),
    ],
    order_by: None,
};

pub static PLAYER: EntitySpec = EntitySpec {
    table: "players",
    alias: "p",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("name"),
        FieldDef::scalar("number"),
        FieldDef::scalar("position"),
        FieldDef::scalar("photo"),
        FieldDef::scalar("team_id"),
        FieldDef::relation("team", &PLAYER_TEAM),
    ],
    count: None,
    default_fields: &["id", "name", "number", "position", "photo", "team_id"],
    order_by: Some(r#"p."name" ASC"#),
};

// ---------------------------------------------------------------------------
// groups

static GROUP_TEAMS: RelationSpec = RelationSpec {
    table: "teams",
    alias: "gt",
    cardinality: Cardinality::Many,
    on: ("group_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("code"),
        FieldDef::scalar_always("flag"),
        FieldDef::scalar_always("is_participating"),
        FieldDef::scalar_always("is_disqualified"),
        FieldDef::scalar_always("group_id"),
    ],
    order_by: Some(r#"gt."name" ASC"#),
};

pub static GROUP: EntitySpec = EntitySpec {
    table: "groups",
    alias: "g",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("label"),
        FieldDef::relation("teams", &GROUP_TEAMS),
    ],
    count: Some(CountSpec {
        entries: &[("teams", &GROUP_TEAMS)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "label"],
    order_by: Some(r#"g."label" ASC"#),
};

// ---------------------------------------------------------------------------
// stadiums

static STADIUM_MATCHES: RelationSpec = RelationSpec {
    table: "matches",
    alias: "sm",
    cardinality: Cardinality::Many,
    on: ("stadium_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("date"),
        FieldDef::scalar_always("time"),
        FieldDef::scalar_always("status"),
    ],
    order_by: Some(r#"sm."date" ASC"#),
};

static STADIUM_SEATS: RelationSpec = RelationSpec {
    table: "seats",
    alias: "ss",
    cardinality: Cardinality::Many,
    on: ("stadium_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("row"),
        FieldDef::scalar_always("number"),
    ],
    order_by: None,
};

pub static STADIUM: EntitySpec = EntitySpec {
    table: "stadiums",
    alias: "s",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("name"),
        FieldDef::scalar("city"),
        FieldDef::scalar("capacity"),
        FieldDef::scalar("location"),
        FieldDef::scalar("contact"),
        FieldDef::scalar("photo"),
        FieldDef::relation("matches", &STADIUM_MATCHES),
        FieldDef::relation("seats", &STADIUM_SEATS),
    ],
    count: Some(CountSpec {
        entries: &[("matches", &STADIUM_MATCHES), ("seats", &STADIUM_SEATS)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "name", "city", "capacity", "location", "contact", "photo"],
    order_by: Some(r#"s."name" ASC"#),
};

// ---------------------------------------------------------------------------
// stages

static STAGE_ENTRY_GROUP: RelationSpec = RelationSpec {
    table: "groups",
    alias: "seg",
    cardinality: Cardinality::One,
    on: ("id", "group_id"),
    fields: &[FieldDef::scalar_always("id"), FieldDef::scalar_always("label")],
    order_by: None,
};

static STAGE_ENTRY_TEAM: RelationSpec = RelationSpec {
    table: "teams",
    alias: "ste",
    cardinality: Cardinality::One,
    on: ("id", "team_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("code"),
        FieldDef::scalar_always("flag"),
        FieldDef::scalar_always("is_participating"),
        FieldDef::scalar_always("is_disqualified"),
        FieldDef::relation_always("group", &STAGE_ENTRY_GROUP),
    ],
    order_by: None,
};

static STAGE_ENTRIES: RelationSpec = RelationSpec {
    table: "match_stage_teams",
    alias: "se",
    cardinality: Cardinality::Many,
    on: ("stage_id", "id"),
    fields: &[FieldDef::relation_always("team", &STAGE_ENTRY_TEAM)],
    order_by: None,
};

pub static STAGE: EntitySpec = EntitySpec {
    table: "stages",
    alias: "st",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("label"),
        FieldDef::scalar("starts_at"),
        FieldDef::scalar("ends_at"),
        FieldDef::relation("match_entries", &STAGE_ENTRIES),
    ],
    count: Some(CountSpec {
        entries: &[("match_entries", &STAGE_ENTRIES)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "label", "starts_at", "ends_at", "match_entries"],
    order_by: None,
};

// ---------------------------------------------------------------------------
// matches

static MATCH_STADIUM: RelationSpec = RelationSpec {
    table: "stadiums",
    alias: "ms",
    cardinality: Cardinality::One,
    on: ("id", "stadium_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("city"),
        FieldDef::scalar_always("photo"),
    ],
    order_by: None,
};

static MATCH_ENTRY_TEAM: RelationSpec = RelationSpec {
    table: "teams",
    alias: "met",
    cardinality: Cardinality::One,
    on: ("id", "team_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("code"),
        FieldDef::scalar_always("flag"),
    ],
    order_by: None,
};

static MATCH_ENTRY_STAGE: RelationSpec = RelationSpec {
    table: "stages",
    alias: "mes",
    cardinality: Cardinality::One,
    on: ("id", "stage_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("label"),
        FieldDef::scalar_always("starts_at"),
        FieldDef::scalar_always("ends_at"),
    ],
    order_by: None,
};

static MATCH_ENTRIES: RelationSpec = RelationSpec {
    table: "match_stage_teams",
    alias: "me",
    cardinality: Cardinality::Many,
    on: ("match_id", "id"),
    fields: &[
        FieldDef::scalar_always("goals"),
        FieldDef::scalar_always("assists"),
        FieldDef::scalar_always("corners"),
        FieldDef::scalar_always("fouls"),
        FieldDef::scalar_always("offsides"),
        FieldDef::scalar_always("possession"),
        FieldDef::scalar_always("red_cards"),
        FieldDef::scalar_always("yellow_cards"),
        FieldDef::scalar_always("is_winner"),
        FieldDef::relation_always("team", &MATCH_ENTRY_TEAM),
        FieldDef::relation_always("stage", &MATCH_ENTRY_STAGE),
    ],
    order_by: None,
};

static MATCH_TICKET_LINKS: RelationSpec = RelationSpec {
    table: "match_ticket_users",
    alias: "mt",
    cardinality: Cardinality::Many,
    on: ("match_id", "id"),
    fields: &[
        FieldDef::scalar_always("ticket_id"),
        FieldDef::scalar_always("user_id"),
    ],
    order_by: None,
};

pub static MATCH: EntitySpec = EntitySpec {
    table: "matches",
    alias: "m",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("date"),
        FieldDef::scalar("time"),
        FieldDef::scalar("status"),
        FieldDef::scalar("stadium_id"),
        FieldDef::relation("stadium", &MATCH_STADIUM),
        FieldDef::relation("match_entries", &MATCH_ENTRIES),
        FieldDef::relation("ticket_links", &MATCH_TICKET_LINKS),
    ],
    count: Some(CountSpec {
        entries: &[
            ("match_entries", &MATCH_ENTRIES),
            ("ticket_links", &MATCH_TICKET_LINKS),
        ],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "date", "time", "status", "stadium", "match_entries"],
    order_by: Some(r#"m."date" ASC, m."time" ASC"#),
};

// ---------------------------------------------------------------------------
// tickets

static TICKET_CATEGORY_REF: RelationSpec = RelationSpec {
    table: "ticket_categories",
    alias: "tkc",
    cardinality: Cardinality::One,
    on: ("id", "category_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("label"),
        FieldDef::scalar_always("price"),
    ],
    order_by: None,
};

static SEAT_STADIUM: RelationSpec = RelationSpec {
    table: "stadiums",
    alias: "tkss",
    cardinality: Cardinality::One,
    on: ("id", "stadium_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("city"),
        FieldDef::scalar_always("contact"),
        FieldDef::scalar_always("photo"),
    ],
    order_by: None,
};

static TICKET_SEAT: RelationSpec = RelationSpec {
    table: "seats",
    alias: "tks",
    cardinality: Cardinality::One,
    on: ("id", "seat_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("row"),
        FieldDef::relation_always("stadium", &SEAT_STADIUM),
    ],
    order_by: None,
};

static LINK_MATCH: RelationSpec = RelationSpec {
    table: "matches",
    alias: "tkmm",
    cardinality: Cardinality::One,
    on: ("id", "match_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("date"),
        FieldDef::scalar_always("time"),
        FieldDef::scalar_always("status"),
    ],
    order_by: None,
};

static TICKET_MATCH_LINKS: RelationSpec = RelationSpec {
    table: "match_ticket_users",
    alias: "tkm",
    cardinality: Cardinality::Many,
    on: ("ticket_id", "id"),
    fields: &[FieldDef::relation_always("match", &LINK_MATCH)],
    order_by: None,
};

pub static TICKET: EntitySpec = EntitySpec {
    table: "tickets",
    alias: "tk",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("serial_number"),
        FieldDef::scalar("category_id"),
        FieldDef::scalar("seat_id"),
        FieldDef::relation("category", &TICKET_CATEGORY_REF),
        FieldDef::relation("seat", &TICKET_SEAT),
        FieldDef::relation("match_links", &TICKET_MATCH_LINKS),
    ],
    count: Some(CountSpec {
        entries: &[("match_links", &TICKET_MATCH_LINKS)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "serial_number", "category", "seat", "match_links"],
    order_by: None,
};

// ---------------------------------------------------------------------------
// ticket categories

static CATEGORY_TICKETS: RelationSpec = RelationSpec {
    table: "tickets",
    alias: "tct",
    cardinality: Cardinality::Many,
    on: ("category_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("serial_number"),
    ],
    order_by: None,
};

pub static TICKET_CATEGORY: EntitySpec = EntitySpec {
    table: "ticket_categories",
    alias: "tc",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("label"),
        FieldDef::scalar("price"),
        FieldDef::relation("tickets", &CATEGORY_TICKETS),
    ],
    count: Some(CountSpec {
        entries: &[("tickets", &CATEGORY_TICKETS)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "label", "price", "_count"],
    order_by: Some(r#"tc."label" ASC"#),
};

// ---------------------------------------------------------------------------
// quizzes

static QUESTION_ANSWERS: RelationSpec = RelationSpec {
    table: "answers",
    alias: "qa",
    cardinality: Cardinality::Many,
    on: ("question_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("value"),
        FieldDef::scalar_always("is_correct"),
    ],
    order_by: None,
};

static QUIZ_QUESTIONS: RelationSpec = RelationSpec {
    table: "questions",
    alias: "qq",
    cardinality: Cardinality::Many,
    on: ("quiz_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("label"),
        FieldDef::scalar_always("duration"),
        FieldDef::relation_flag("answers", "answers", &QUESTION_ANSWERS),
    ],
    order_by: None,
};

static QUIZ_POINT_ROWS: RelationSpec = RelationSpec {
    table: "quiz_points",
    alias: "qp",
    cardinality: Cardinality::Many,
    on: ("quiz_id", "id"),
    fields: &[
        FieldDef::scalar_always("question_id"),
        FieldDef::scalar_always("answer_id"),
        FieldDef::scalar_always("user_id"),
        FieldDef::scalar_always("points"),
    ],
    order_by: None,
};

pub static QUIZ: EntitySpec = EntitySpec {
    table: "quizzes",
    alias: "q",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("label"),
        FieldDef::scalar("date"),
        FieldDef::relation("questions", &QUIZ_QUESTIONS),
        FieldDef::relation("points", &QUIZ_POINT_ROWS),
    ],
    count: Some(CountSpec {
        entries: &[
            ("questions", &QUIZ_QUESTIONS),
            ("points", &QUIZ_POINT_ROWS),
        ],
        suppresses: None,
        implicit_unless: Some("questions"),
    }),
    default_fields: &["id", "label", "date", "_count"],
    order_by: None,
};

// ---------------------------------------------------------------------------
// spots (points of interest)

static SPOT_DEALS: RelationSpec = RelationSpec {
    table: "good_deals",
    alias: "spd",
    cardinality: Cardinality::Many,
    on: ("spot_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("label"),
        FieldDef::scalar_always("photo"),
    ],
    order_by: None,
};

static SPOT_CATEGORY_REF: RelationSpec = RelationSpec {
    table: "spot_categories",
    alias: "spc",
    cardinality: Cardinality::One,
    on: ("id", "category_id"),
    fields: &[FieldDef::scalar_always("id"), FieldDef::scalar_always("label")],
    order_by: None,
};

pub static SPOT: EntitySpec = EntitySpec {
    table: "spots",
    alias: "sp",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("name"),
        FieldDef::scalar("contact"),
        FieldDef::scalar("location"),
        FieldDef::scalar("short_description"),
        FieldDef::scalar("long_description"),
        FieldDef::scalar("photo"),
        FieldDef::scalar("vip"),
        FieldDef::scalar("category_id"),
        FieldDef::relation("good_deals", &SPOT_DEALS),
        FieldDef::relation("category", &SPOT_CATEGORY_REF),
    ],
    count: Some(CountSpec {
        entries: &[("good_deals", &SPOT_DEALS)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &[
        "id",
        "name",
        "contact",
        "location",
        "short_description",
        "long_description",
        "photo",
        "vip",
        "category_id",
        "good_deals",
    ],
    order_by: Some(r#"sp."vip" ASC, sp."name" ASC"#),
};

// ---------------------------------------------------------------------------
// spot categories

static CATEGORY_SPOTS: RelationSpec = RelationSpec {
    table: "spots",
    alias: "scs",
    cardinality: Cardinality::Many,
    on: ("category_id", "id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("contact"),
        FieldDef::scalar_always("location"),
        FieldDef::scalar_always("short_description"),
        FieldDef::scalar_always("vip"),
        FieldDef::relation_always("good_deals", &SPOT_DEALS),
    ],
    order_by: None,
};

pub static SPOT_CATEGORY: EntitySpec = EntitySpec {
    table: "spot_categories",
    alias: "sc",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("label"),
        FieldDef::relation("spots", &CATEGORY_SPOTS),
    ],
    count: Some(CountSpec {
        entries: &[("spots", &CATEGORY_SPOTS)],
        suppresses: None,
        implicit_unless: None,
    }),
    default_fields: &["id", "label", "spots"],
    order_by: Some(r#"sc."label" ASC"#),
};

// ---------------------------------------------------------------------------
// good deals

static DEAL_SPOT: RelationSpec = RelationSpec {
    table: "spots",
    alias: "gds",
    cardinality: Cardinality::One,
    on: ("id", "spot_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("contact"),
        FieldDef::scalar_always("location"),
        FieldDef::scalar_always("vip"),
        FieldDef::relation_always("category", &SPOT_CATEGORY_REF),
    ],
    order_by: None,
};

pub static GOOD_DEAL: EntitySpec = EntitySpec {
    table: "good_deals",
    alias: "gd",
    fields: &[
        FieldDef::scalar("id"),
        FieldDef::scalar("label"),
        FieldDef::scalar("photo"),
        FieldDef::scalar("spot_id"),
        FieldDef::relation("spot", &DEAL_SPOT),
    ],
    count: None,
    default_fields: &["id", "label", "photo", "spot_id"],
    order_by: Some(r#"gd."label" ASC"#),
};

// ---------------------------------------------------------------------------
// user favorites
//
// Projected over the user row; the followed rows materialize unless `_count`
// turns them into a bare aggregate. Sub-fields are gated individually, which
// is the one place the registry nests client-controlled names.

static FOLLOWED_TEAM: RelationSpec = RelationSpec {
    table: "teams",
    alias: "uft",
    cardinality: Cardinality::One,
    on: ("id", "team_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("name"),
        FieldDef::scalar_always("code"),
        FieldDef::scalar_always("flag"),
        FieldDef::scalar_always("is_participating"),
        FieldDef::scalar_always("is_disqualified"),
        FieldDef::scalar_always("group_id"),
    ],
    order_by: None,
};

static FOLLOWED_USER: RelationSpec = RelationSpec {
    table: "users",
    alias: "ufu",
    cardinality: Cardinality::One,
    on: ("id", "user_id"),
    fields: &[
        FieldDef::scalar_always("id"),
        FieldDef::scalar_always("first_name"),
        FieldDef::scalar_always("last_name"),
        FieldDef::scalar_always("contact"),
        FieldDef::scalar_always("nationality"),
        FieldDef::scalar_always("photo"),
    ],
    order_by: None,
};

static USER_FOLLOWED_TEAMS: RelationSpec = RelationSpec {
    table: "team_users",
    alias: "uf",
    cardinality: Cardinality::Many,
    on: ("user_id", "id"),
    fields: &[
        FieldDef::scalar("followed_at"),
        FieldDef::scalar("team_id"),
        FieldDef::scalar("user_id"),
        FieldDef::relation("team", &FOLLOWED_TEAM),
        FieldDef::relation("user", &FOLLOWED_USER),
    ],
    order_by: Some(r#"(SELECT "name" FROM "teams" WHERE "id" = uf."team_id") ASC"#),
};

pub static USER_FAVORITES: EntitySpec = EntitySpec {
    table: "users",
    alias: "u",
    fields: &[FieldDef::relation_always("followed_teams", &USER_FOLLOWED_TEAMS)],
    count: Some(CountSpec {
        entries: &[("followed_teams", &USER_FOLLOWED_TEAMS)],
        suppresses: Some("followed_teams"),
        implicit_unless: None,
    }),
    default_fields: &["followed_teams", "followed_at", "team"],
    order_by: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::types::FieldKind;
    use std::collections::HashSet;

    fn all_entities() -> Vec<&'static EntitySpec> {
        vec![
            &TEAM,
            &PLAYER,
            &GROUP,
            &STADIUM,
            &STAGE,
            &MATCH,
            &TICKET,
            &TICKET_CATEGORY,
            &QUIZ,
            &SPOT,
            &SPOT_CATEGORY,
            &GOOD_DEAL,
            &USER_FAVORITES,
        ]
    }

    fn collect_aliases(fields: &[FieldDef], path: &mut Vec<&'static str>, seen: &mut Vec<Vec<&'static str>>) {
        for field in fields {
            if let FieldKind::Relation(rel) = field.kind {
                path.push(rel.alias);
                seen.push(path.clone());
                collect_aliases(rel.fields, path, seen);
                path.pop();
            }
        }
    }

    #[test]
    fn field_names_are_unique_per_entity() {
        for spec in all_entities() {
            let mut names = HashSet::new();
            for field in spec.fields {
                assert!(names.insert(field.name), "duplicate field {} on {}", field.name, spec.table);
            }
        }
    }

    #[test]
    fn aliases_are_unique_along_every_path() {
        for spec in all_entities() {
            let mut paths = Vec::new();
            collect_aliases(spec.fields, &mut vec![spec.alias], &mut paths);
            for path in paths {
                let unique: HashSet<_> = path.iter().collect();
                assert_eq!(unique.len(), path.len(), "alias collision on path {:?} ({})", path, spec.table);
            }
        }
    }

    #[test]
    fn default_fields_name_registered_entries_only() {
        for spec in all_entities() {
            let registered: HashSet<&str> = spec.fields.iter().map(|f| f.name).collect();
            for name in spec.default_fields {
                if *name == "_count" {
                    assert!(spec.count.is_some(), "{} defaults _count without a CountSpec", spec.table);
                    continue;
                }
                // default names address top-level fields or gated nested names
                let nested: HashSet<&str> = spec
                    .fields
                    .iter()
                    .filter_map(|f| match f.kind {
                        FieldKind::Relation(rel) => Some(rel.fields.iter().map(|n| n.name)),
                        _ => None,
                    })
                    .flatten()
                    .collect();
                assert!(
                    registered.contains(name) || nested.contains(name),
                    "{} defaults unknown field {}",
                    spec.table,
                    name
                );
            }
        }
    }

    #[test]
    fn count_entries_reference_declared_relations() {
        for spec in all_entities() {
            if let Some(count) = &spec.count {
                let relations: HashSet<&str> = spec
                    .fields
                    .iter()
                    .filter(|f| matches!(f.kind, FieldKind::Relation(_)))
                    .map(|f| f.name)
                    .collect();
                for (name, _) in count.entries {
                    assert!(relations.contains(name), "{} counts unknown relation {}", spec.table, name);
                }
                if let Some(suppressed) = count.suppresses {
                    assert!(relations.contains(suppressed));
                }
            }
        }
    }
}
