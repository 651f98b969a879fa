use squall::prelude::*;

use crate::common::MemberPath;
use crate::squall_test;

squall_test!(simple_case, |db| {
    let member = MemberPath::default();
    let labels = db.fetch(
        &select(
            member
                .age
                .case()
                .when(10, "ten")
                .when(20, "twenty")
                .otherwise("other"),
        )
        .from(member)
        .order_by(member.age.asc()),
    )?;
    assert_eq!(labels, vec!["ten", "twenty", "other", "other"]);
});

squall_test!(searched_case, |db| {
    let member = MemberPath::default();
    let labels = db.fetch(
        &select(
            case()
                .when(member.age.between(0, 20), "0-20")
                .when(member.age.between(21, 30), "21-30")
                .otherwise("other"),
        )
        .from(member)
        .order_by(member.age.asc()),
    )?;
    assert_eq!(labels, vec!["0-20", "0-20", "21-30", "other"]);
});

squall_test!(case_in_order_by, |db| {
    let member = MemberPath::default();
    let rank = case()
        .when(member.age.between(0, 20), 2)
        .when(member.age.between(21, 30), 1)
        .otherwise(3);
    let result = db.fetch(
        &select((member.username, member.age, rank.clone()))
            .from(member)
            .order_by(rank.desc()),
    )?;

    let ranks: Vec<_> = result.iter().map(|(_, _, rank)| *rank).collect();
    assert_eq!(ranks, vec![3, 2, 2, 1]);
});

squall_test!(constant_column, |db| {
    let member = MemberPath::default();
    let result = db.fetch(
        &select((member.username, constant("A")))
            .from(member)
            .order_by(member.username.asc()),
    )?;

    assert_eq!(result[0], ("member1".to_string(), "A".to_string()));
    assert!(result.iter().all(|(_, a)| a == "A"));
});

squall_test!(concat_with_string_value, |db| {
    let member = MemberPath::default();
    let value = db
        .fetch_one(
            &select(
                member
                    .username
                    .concat("_")
                    .concat(member.age.string_value()),
            )
            .from(member)
            .r#where(member.username.eq("member1")),
        )?
        .expect("member1 exists");
    assert_eq!(value, "member1_10");
});

squall_test!(replace_function, |db| {
    let member = MemberPath::default();
    let names = db.fetch(
        &select(function::<Text>("replace", (member.username, "member", "M")))
            .from(member)
            .order_by(member.username.asc()),
    )?;
    assert_eq!(names, vec!["M1", "M2", "M3", "M4"]);
});

squall_test!(lower_function_in_where, |db| {
    let member = MemberPath::default();
    let count = db.fetch_count(
        &select(member.username)
            .from(member)
            .r#where(member.username.eq(member.username.lower())),
    )?;
    assert_eq!(count, 4);
});

squall_test!(upper_and_length, |db| {
    let member = MemberPath::default();
    let (upper, length) = db
        .fetch_one(
            &select((member.username.upper(), member.username.length()))
                .from(member)
                .r#where(member.id.eq(1)),
        )?
        .expect("member1 exists");
    assert_eq!(upper, "MEMBER1");
    assert_eq!(length, 7);
});

squall_test!(arithmetic, |db| {
    let member = MemberPath::default();
    let ages = db.fetch(
        &select(member.age.add(1).mul(2))
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(ages, vec![22, 42, 62, 82]);
});
