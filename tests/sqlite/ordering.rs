use squall::prelude::*;

use crate::common::{MemberPath, insert_member};
use crate::squall_test;

squall_test!(sort_with_nulls_last, |db| {
    insert_member(&db, None, 100, None);
    insert_member(&db, Some("member5"), 100, None);
    insert_member(&db, Some("member6"), 100, None);

    let member = MemberPath::default();
    let result = db.fetch(
        &select_from(member)
            .r#where(member.age.eq(100))
            .order_by([member.age.desc(), member.username.asc().nulls_last()]),
    )?;

    let names: Vec<_> = result.into_iter().map(|m| m.username).collect();
    assert_eq!(
        names,
        vec![Some("member5".to_string()), Some("member6".to_string()), None]
    );
});

squall_test!(sort_with_nulls_first, |db| {
    insert_member(&db, None, 100, None);
    insert_member(&db, Some("member5"), 100, None);

    let member = MemberPath::default();
    let names = db.fetch(
        &select(member.username.nullable())
            .from(member)
            .r#where(member.age.eq(100))
            .order_by(member.username.desc().nulls_first()),
    )?;
    assert_eq!(names, vec![None, Some("member5".to_string())]);
});

squall_test!(paging_returns_a_slice_of_the_ordered_result, |db| {
    let member = MemberPath::default();
    let ordered = select(member.username)
        .from(member)
        .order_by(member.username.desc());

    let all = db.fetch(&ordered)?;
    let page = db.fetch(&ordered.clone().offset(1).limit(2))?;

    assert_eq!(page, vec!["member3".to_string(), "member2".to_string()]);
    assert_eq!(page.as_slice(), &all[1..3]);
});

squall_test!(paging_with_total_count, |db| {
    let member = MemberPath::default();
    let query = select_from(member)
        .order_by(member.username.desc())
        .offset(1)
        .limit(2);

    let total = db.fetch_count(&query)?;
    let page = db.fetch(&query)?;

    assert_eq!(total, 4);
    assert_eq!(page.len(), 2);
});

squall_test!(offset_without_limit, |db| {
    let member = MemberPath::default();
    let ages = db.fetch(
        &select(member.age)
            .from(member)
            .order_by(member.age.asc())
            .offset(3),
    )?;
    assert_eq!(ages, vec![40]);
});
