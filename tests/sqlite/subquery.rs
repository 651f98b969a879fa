use squall::prelude::*;

use crate::common::{MemberPath, UserDto};
use crate::squall_test;

squall_test!(subquery_eq_max, |db| {
    let member = MemberPath::default();
    let sub = MemberPath::new("member_sub");
    let result = db.fetch(
        &select_from(member).r#where(member.age.eq(select(sub.age.max()).from(sub))),
    )?;

    let ages: Vec<_> = result.iter().map(|m| m.age).collect();
    assert_eq!(ages, vec![40]);
});

squall_test!(subquery_goe_avg, |db| {
    let member = MemberPath::default();
    let sub = MemberPath::new("member_sub");
    let ages = db.fetch(
        &select(member.age)
            .from(member)
            .r#where(member.age.goe(select(sub.age.avg()).from(sub)))
            .order_by(member.age.asc()),
    )?;
    assert_eq!(ages, vec![30, 40]);
});

squall_test!(subquery_in, |db| {
    let member = MemberPath::default();
    let sub = MemberPath::new("member_sub");
    let ages = db.fetch(
        &select(member.age)
            .from(member)
            .r#where(member.age.in_query(select(sub.age).from(sub).r#where(sub.age.gt(10))))
            .order_by(member.age.asc()),
    )?;
    assert_eq!(ages, vec![20, 30, 40]);
});

squall_test!(subquery_not_in, |db| {
    let member = MemberPath::default();
    let sub = MemberPath::new("member_sub");
    let ages = db.fetch(
        &select(member.age)
            .from(member)
            .r#where(member.age.not_in_query(select(sub.age).from(sub).r#where(sub.age.gt(10)))),
    )?;
    assert_eq!(ages, vec![10]);
});

squall_test!(subquery_in_select_list, |db| {
    let member = MemberPath::default();
    let sub = MemberPath::new("member_sub");
    let result = db.fetch(
        &select((member.username, select(sub.age.avg()).from(sub)))
            .from(member)
            .order_by(member.username.asc()),
    )?;

    assert_eq!(result.len(), 4);
    for (_, avg) in &result {
        assert_eq!(*avg, 25.0);
    }
});

squall_test!(subquery_bound_to_dto_by_alias, |db| {
    let member = MemberPath::default();
    let sub = MemberPath::new("member_sub");
    let result = db.fetch(
        &select(Projections::fields::<UserDto>((
            member.username.as_("name"),
            select(sub.age.max()).from(sub).as_("age"),
        )))
        .from(member)
        .order_by(member.username.asc()),
    )?;

    assert_eq!(result.len(), 4);
    assert_eq!(
        result[0],
        UserDto {
            name: Some("member1".into()),
            age: 40
        }
    );
    assert!(result.iter().all(|dto| dto.age == 40));
});
