use squall::prelude::*;

use crate::common::{Member, MemberPath, Team, TeamPath, insert_member};
use crate::squall_test;

squall_test!(start_with_select_from, |db| {
    let member = MemberPath::default();
    let found = db
        .fetch_one(&select_from(member).r#where(member.username.eq("member1")))?
        .expect("member1 exists");

    assert_eq!(found.id, 1);
    assert_eq!(found.username.as_deref(), Some("member1"));
    assert_eq!(found.age, 10);
    assert_eq!(found.team, Related::Unloaded(Value::Integer(1)));
});

squall_test!(search_with_conjunction, |db| {
    let member = MemberPath::default();
    let found = db.fetch_one(
        &select_from(member).r#where(
            member
                .username
                .eq("member1")
                .and(member.age.between(10, 30)),
        ),
    )?;
    assert_eq!(found.map(|m| m.id), Some(1));
});

squall_test!(variadic_where_matches_chained_and, |db| {
    let member = MemberPath::default();
    let chained = db.fetch(
        &select_from(member).r#where(member.username.eq("member1").and(member.age.eq(10))),
    )?;
    let variadic =
        db.fetch(&select_from(member).r#where((member.username.eq("member1"), member.age.eq(10))))?;

    assert_eq!(chained.len(), 1);
    assert_eq!(chained, variadic);
});

squall_test!(result_fetch_variants, |db| {
    let member = MemberPath::default();
    let all = select_from(member).order_by(member.age.asc());

    let list: Vec<Member> = db.fetch(&all)?;
    assert_eq!(list.len(), 4);

    let first = db.fetch_first(&all)?.expect("at least one member");
    assert_eq!(first.username.as_deref(), Some("member1"));

    let count = db.fetch_count(&all)?;
    assert_eq!(count, 4);

    let none = db.fetch_one(&select_from(member).r#where(member.age.gt(100)))?;
    assert_eq!(none, None);
});

squall_test!(fetch_count_matches_fetch, |db| {
    let member = MemberPath::default();
    let query = select_from(member).r#where(member.age.goe(20));
    let rows = db.fetch(&query)?;
    assert_eq!(db.fetch_count(&query)?, rows.len() as u64);
});

squall_test!(in_and_like_filters, |db| {
    let member = MemberPath::default();
    let ages = db.fetch(
        &select(member.age)
            .from(member)
            .r#where(member.age.in_list([10, 30, 50]))
            .order_by(member.age.asc()),
    )?;
    assert_eq!(ages, vec![10, 30]);

    let names = db.fetch(
        &select(member.username)
            .from(member)
            .r#where((
                member.username.starts_with("member"),
                member.username.like("%4"),
            )),
    )?;
    assert_eq!(names, vec!["member4".to_string()]);
});

squall_test!(prefix_and_substring_match_wildcards_literally, |db| {
    let member = MemberPath::default();
    insert_member(&db, Some("a_b"), 50, None);
    insert_member(&db, Some("axb"), 51, None);
    insert_member(&db, Some("50%off"), 52, None);
    insert_member(&db, Some("50 off"), 53, None);

    let prefixed = db.fetch(
        &select(member.username)
            .from(member)
            .r#where(member.username.starts_with("a_")),
    )?;
    assert_eq!(prefixed, vec!["a_b".to_string()]);

    let containing = db.fetch(
        &select(member.username)
            .from(member)
            .r#where(member.username.contains("0%")),
    )?;
    assert_eq!(containing, vec!["50%off".to_string()]);

    let wildcard = db.fetch(
        &select(member.username)
            .from(member)
            .r#where(member.username.like("a_b"))
            .order_by(member.age.asc()),
    )?;
    assert_eq!(wildcard, vec!["a_b".to_string(), "axb".to_string()]);
});

squall_test!(distinct_team_names, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let names = db.fetch(
        &select(team.name)
            .from(member)
            .join(member.team, team)
            .distinct()
            .order_by(team.name.asc()),
    )?;
    assert_eq!(names, vec!["teamA".to_string(), "teamB".to_string()]);
});

squall_test!(custom_alias_fetches_entities, |db| {
    let t = TeamPath::new("t");
    let teams: Vec<Team> = db.fetch(&select_from(t).order_by(t.id.asc()))?;
    assert_eq!(
        teams,
        vec![
            Team {
                id: 1,
                name: "teamA".into()
            },
            Team {
                id: 2,
                name: "teamB".into()
            },
        ]
    );
});
