use squall::prelude::*;

use crate::common::MemberPath;
use crate::squall_test;

squall_test!(bulk_update, |db| {
    let member = MemberPath::default();
    let affected = db.execute(
        &update(member)
            .set(member.username, "anonymous")
            .r#where(member.age.lt(28)),
    )?;
    assert_eq!(affected, 2);

    let names = db.fetch(
        &select(member.username)
            .from(member)
            .order_by(member.age.asc()),
    )?;
    assert_eq!(names, vec!["anonymous", "anonymous", "member3", "member4"]);
});

squall_test!(bulk_update_is_not_seen_by_fetched_values, |db| {
    let member = MemberPath::default();
    let by_id = select_from(member).r#where(member.id.eq(1));
    let before = db.fetch_one(&by_id)?.expect("member1 exists");

    db.execute(&update(member).set(member.username, "renamed").r#where(member.id.eq(1)))?;

    assert_eq!(before.username.as_deref(), Some("member1"));
    let reloaded = db.fetch_one(&by_id)?.expect("member1 exists");
    assert_eq!(reloaded.username.as_deref(), Some("renamed"));
    assert_eq!(reloaded.age, before.age);
});

squall_test!(bulk_add, |db| {
    let member = MemberPath::default();
    let affected = db.execute(&update(member).set(member.age, member.age.add(1)))?;
    assert_eq!(affected, 4);

    let ages = db.fetch(&select(member.age).from(member).order_by(member.age.asc()))?;
    assert_eq!(ages, vec![11, 21, 31, 41]);
});

squall_test!(bulk_multiply, |db| {
    let member = MemberPath::default();
    db.execute(&update(member).set(member.age, member.age.mul(2)))?;

    let sum = db
        .fetch_one(&select(member.age.sum()).from(member))?
        .expect("aggregate returns a row");
    assert_eq!(sum, 200);
});

squall_test!(bulk_set_null, |db| {
    let member = MemberPath::default();
    let affected = db.execute(
        &update(member)
            .set_null(member.username)
            .r#where(member.age.gt(30)),
    )?;
    assert_eq!(affected, 1);

    let count = db.fetch_count(&select_from(member).r#where(member.username.is_null()))?;
    assert_eq!(count, 1);
});

squall_test!(bulk_delete, |db| {
    let member = MemberPath::default();
    let affected = db.execute(&delete(member).r#where(member.age.gt(18)))?;
    assert_eq!(affected, 3);

    let remaining = db.fetch(&select_from(member))?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].age, 10);
});

squall_test!(delete_without_filter_removes_all, |db| {
    let member = MemberPath::default();
    assert_eq!(db.execute(&delete(member))?, 4);
    assert_eq!(db.fetch_count(&select_from(member))?, 0);
});
