use squall::prelude::*;

use crate::common::{Member, MemberPath};
use crate::squall_test;

fn search_with_builder(
    db: &mut Squall<::rusqlite::Connection>,
    username: Option<&str>,
    age: Option<i32>,
) -> squall::Result<Vec<Member>> {
    let member = MemberPath::default();
    let mut builder = PredicateBuilder::new();
    builder.and(username.map(|u| member.username.eq(u)));
    builder.and(age.map(|a| member.age.eq(a)));
    db.fetch(&select_from(member).r#where(builder).order_by(member.age.asc()))
}

fn search_with_where_params(
    db: &mut Squall<::rusqlite::Connection>,
    username: Option<&str>,
    age: Option<i32>,
) -> squall::Result<Vec<Member>> {
    let member = MemberPath::default();
    db.fetch(
        &select_from(member)
            .r#where((
                username.map(|u| member.username.eq(u)),
                age.map(|a| member.age.eq(a)),
            ))
            .order_by(member.age.asc()),
    )
}

fn ages(members: &[Member]) -> Vec<i32> {
    members.iter().map(|m| m.age).collect()
}

squall_test!(builder_with_all_conditions, |db| {
    let result = search_with_builder(&mut db, Some("member1"), Some(10))?;
    assert_eq!(ages(&result), vec![10]);
});

squall_test!(builder_omits_absent_condition, |db| {
    let result = search_with_builder(&mut db, None, Some(10))?;
    assert_eq!(ages(&result), vec![10]);

    let result = search_with_builder(&mut db, None, None)?;
    assert_eq!(ages(&result), vec![10, 20, 30, 40]);
});

squall_test!(where_params_omit_absent_conditions, |db| {
    let result = search_with_where_params(&mut db, Some("member1"), None)?;
    assert_eq!(ages(&result), vec![10]);

    let all = search_with_where_params(&mut db, None, None)?;
    assert_eq!(all.len(), 4);
    assert_eq!(all, search_with_builder(&mut db, None, None)?);
});

squall_test!(composed_optional_predicates, |db| {
    let member = MemberPath::default();
    let username_eq = |u: Option<&str>| u.map(|u| member.username.eq(u));
    let age_eq = |a: Option<i32>| a.map(|a| member.age.eq(a));

    let combined = and(username_eq(None), age_eq(Some(20)));
    let result = db.fetch(&select(member.age).from(member).r#where(combined))?;
    assert_eq!(result, vec![20]);

    let either = or(age_eq(Some(10)), age_eq(Some(40)));
    let result = db.fetch(
        &select(member.age)
            .from(member)
            .r#where(either)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result, vec![10, 40]);

    let nothing = and(username_eq(None), age_eq(None));
    assert!(nothing.is_none());
    let count = db.fetch_count(&select(member.age).from(member).r#where(nothing))?;
    assert_eq!(count, 4);
});

squall_test!(builder_or_and_not, |db| {
    let member = MemberPath::default();
    let mut builder = PredicateBuilder::new();
    builder
        .or(member.age.eq(10))
        .or(member.age.eq(20))
        .and_not(member.username.eq("member2"));

    let result = db.fetch(&select(member.age).from(member).r#where(&builder))?;
    assert_eq!(result, vec![10]);
});

squall_test!(all_and_any, |db| {
    let member = MemberPath::default();
    let low: Option<Predicate> = Some(member.age.lt(15));
    let high: Option<Predicate> = Some(member.age.gt(35));

    let either = any([low.clone(), high.clone(), None]);
    let result = db.fetch(
        &select(member.age)
            .from(member)
            .r#where(either)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result, vec![10, 40]);

    let both = all([low, high]);
    assert_eq!(db.fetch_count(&select(member.age).from(member).r#where(both))?, 0);
});
