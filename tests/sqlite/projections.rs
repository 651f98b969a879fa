use squall::prelude::*;

use crate::common::{Member, MemberDto, MemberPath, UserDto, insert_member};
use crate::squall_test;

fn member1() -> MemberDto {
    MemberDto {
        username: Some("member1".into()),
        age: 10,
    }
}

squall_test!(single_column_projection, |db| {
    let member = MemberPath::default();
    let names = db.fetch(
        &select(member.username)
            .from(member)
            .order_by(member.username.asc()),
    )?;
    assert_eq!(names, vec!["member1", "member2", "member3", "member4"]);
});

squall_test!(tuple_projection, |db| {
    let member = MemberPath::default();
    let rows = db.fetch(
        &select(Projections::tuple((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;

    assert_eq!(rows.len(), 4);
    let first = &rows[0];
    assert_eq!(first.len(), 2);
    assert_eq!(first.get(&member.username), Some("member1".to_string()));
    assert_eq!(first.get(&member.age), Some(10));
    assert_eq!(first.value(1), Some(&Value::Integer(10)));
});

squall_test!(tuple_rejects_unselected_keys, |db| {
    let member = MemberPath::default();
    let row = db
        .fetch_first(&select(Projections::tuple((member.username,))).from(member))?
        .expect("members exist");

    assert_eq!(row.get(&member.age), None);
    assert!(matches!(
        row.try_get(&member.age),
        Err(SquallError::InvalidQuery(_))
    ));
});

squall_test!(dto_by_fields, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select(Projections::fields::<MemberDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result.len(), 4);
    assert_eq!(result[0], member1());
});

squall_test!(dto_by_setters, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select(Projections::bean::<MemberDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result[0], member1());
});

squall_test!(dto_by_constructor, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select(Projections::constructor::<MemberDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result[0], member1());
});

squall_test!(dto_by_typed_project, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select(MemberDto::project(member.username, member.age))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result[0], member1());
});

squall_test!(dto_bindings_agree, |db| {
    let member = MemberPath::default();
    let by_fields = db.fetch(
        &select(Projections::fields::<MemberDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    let by_setters = db.fetch(
        &select(Projections::bean::<MemberDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    let by_constructor = db.fetch(
        &select(Projections::constructor::<MemberDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;

    assert_eq!(by_fields, by_setters);
    assert_eq!(by_fields, by_constructor);
});

squall_test!(dto_fields_by_alias, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select(Projections::fields::<UserDto>((
            member.username.as_("name"),
            member.age,
        )))
        .from(member)
        .order_by(member.age.asc()),
    )?;
    assert_eq!(
        result[0],
        UserDto {
            name: Some("member1".into()),
            age: 10
        }
    );
});

squall_test!(dto_setters_ignore_unknown_names, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select(Projections::bean::<UserDto>((member.username, member.age)))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(result[0], UserDto { name: None, age: 10 });
});

squall_test!(generated_setters, |_db| {
    let mut dto = MemberDto::default();
    dto.set_username(Some("member9".into()));
    dto.set_age(90);
    assert_eq!(
        dto,
        MemberDto {
            username: Some("member9".into()),
            age: 90
        }
    );
});

squall_test!(nullable_column_projection, |db| {
    let member = MemberPath::default();
    let username = Member::DEF.column("username").expect("username is mapped");
    assert!(username.nullable);
    assert!(!Member::DEF.column("age").expect("age is mapped").nullable);

    insert_member(&db, None, 50, None);
    let names = db.fetch(
        &select(member.username.nullable())
            .from(member)
            .order_by(member.age.desc())
            .limit(2),
    )?;
    assert_eq!(names, vec![None, Some("member4".to_string())]);
});
