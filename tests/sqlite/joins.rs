use squall::prelude::*;

use crate::common::{Member, MemberPath, Team, TeamPath, insert_member};
use crate::squall_test;

squall_test!(join_filters_on_the_related_entity, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let result = db.fetch(
        &select_from(member)
            .join(member.team, team)
            .r#where(team.name.eq("teamA"))
            .order_by(member.age.asc()),
    )?;

    let names: Vec<_> = result.iter().map(|m| m.username.as_deref()).collect();
    assert_eq!(names, vec![Some("member1"), Some("member2")]);
});

squall_test!(join_from_the_collection_side, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let names = db.fetch(
        &select(team.name)
            .from(team)
            .join(team.members, member)
            .r#where(member.age.gt(25))
            .distinct(),
    )?;
    assert_eq!(names, vec!["teamB".to_string()]);
});

squall_test!(theta_join_without_relation, |db| {
    insert_member(&db, Some("teamA"), 0, None);
    insert_member(&db, Some("teamB"), 0, None);
    insert_member(&db, Some("teamC"), 0, None);

    let member = MemberPath::default();
    let team = TeamPath::default();
    let result = db.fetch(
        &select(member)
            .from((member, team))
            .r#where(member.username.eq(team.name))
            .order_by(member.username.asc()),
    )?;

    let names: Vec<_> = result.into_iter().filter_map(|m| m.username).collect();
    assert_eq!(names, vec!["teamA".to_string(), "teamB".to_string()]);
});

squall_test!(left_join_with_on_condition, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let result: Vec<(Member, Option<Team>)> = db.fetch(
        &select((member, team.optional()))
            .from(member)
            .left_join(member.team, team)
            .on(team.name.eq("teamA"))
            .order_by(member.age.asc()),
    )?;

    let teams: Vec<_> = result
        .iter()
        .map(|(m, t)| (m.age, t.as_ref().map(|t| t.name.as_str())))
        .collect();
    assert_eq!(
        teams,
        vec![
            (10, Some("teamA")),
            (20, Some("teamA")),
            (30, None),
            (40, None),
        ]
    );
});

squall_test!(left_join_on_without_relation, |db| {
    insert_member(&db, Some("teamA"), 0, None);
    insert_member(&db, Some("teamB"), 0, None);
    insert_member(&db, Some("teamC"), 0, None);

    let member = MemberPath::default();
    let team = TeamPath::default();
    let result = db.fetch(
        &select((member.username, team.name.nullable()))
            .from(member)
            .left_join_on(team, member.username.eq(team.name))
            .r#where(member.age.eq(0))
            .order_by(member.username.asc()),
    )?;

    assert_eq!(
        result,
        vec![
            ("teamA".to_string(), Some("teamA".to_string())),
            ("teamB".to_string(), Some("teamB".to_string())),
            ("teamC".to_string(), None),
        ]
    );
});

squall_test!(plain_fetch_leaves_relation_unloaded, |db| {
    let member = MemberPath::default();
    let found = db
        .fetch_one(&select_from(member).r#where(member.username.eq("member1")))?
        .expect("member1 exists");

    assert!(!found.team.is_loaded());
    assert_eq!(found.team.key(), Some(&Value::Integer(1)));
    assert_eq!(found.team.get(), None);
});

squall_test!(fetch_join_loads_relation, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let found = db
        .fetch_one(
            &select_from(member)
                .join(member.team, team)
                .fetch_join()
                .r#where(member.username.eq("member1")),
        )?
        .expect("member1 exists");

    assert!(found.team.is_loaded());
    assert_eq!(
        found.team.get(),
        Some(&Team {
            id: 1,
            name: "teamA".into()
        })
    );
});

squall_test!(left_fetch_join_of_missing_relation, |db| {
    insert_member(&db, Some("loner"), 50, None);

    let member = MemberPath::default();
    let team = TeamPath::default();
    let found = db
        .fetch_one(
            &select_from(member)
                .left_join(member.team, team)
                .fetch_join()
                .r#where(member.username.eq("loner")),
        )?
        .expect("loner exists");

    assert_eq!(found.team, Related::Loaded(None));
});
