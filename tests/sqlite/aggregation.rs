use squall::prelude::*;

use crate::common::{MemberPath, TeamPath};
use crate::squall_test;

squall_test!(aggregate_functions, |db| {
    let member = MemberPath::default();
    let (count, sum, avg, max, min) = db
        .fetch_one(
            &select((
                member.count(),
                member.age.sum(),
                member.age.avg(),
                member.age.max(),
                member.age.min(),
            ))
            .from(member),
        )?
        .expect("aggregates return one row");

    assert_eq!(count, 4);
    assert_eq!(sum, 100);
    assert_eq!(avg, 25.0);
    assert_eq!(max, 40);
    assert_eq!(min, 10);
});

squall_test!(aggregates_as_tuple, |db| {
    let member = MemberPath::default();
    let total = member.count();
    let oldest = member.age.max();
    let row = db
        .fetch_one(&select(Projections::tuple((total.clone(), oldest.clone()))).from(member))?
        .expect("aggregates return one row");

    assert_eq!(row.get(&total), Some(4));
    assert_eq!(row.get(&oldest), Some(40));
});

squall_test!(group_by_team_average_age, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let result = db.fetch(
        &select((team.name, member.age.avg()))
            .from(member)
            .join(member.team, team)
            .group_by(team.name)
            .order_by(team.name.asc()),
    )?;

    assert_eq!(
        result,
        vec![("teamA".to_string(), 15.0), ("teamB".to_string(), 35.0)]
    );
});

squall_test!(group_by_with_having, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let result = db.fetch(
        &select((team.name, member.age.avg()))
            .from(member)
            .join(member.team, team)
            .group_by(team.name)
            .having(member.age.avg().gt(20.0)),
    )?;

    assert_eq!(result, vec![("teamB".to_string(), 35.0)]);
});

squall_test!(count_distinct_and_count_all, |db| {
    let member = MemberPath::default();
    let team = TeamPath::default();
    let (teams, rows) = db
        .fetch_one(
            &select((team.name.count_distinct(), count_all()))
                .from(member)
                .join(member.team, team),
        )?
        .expect("aggregates return one row");

    assert_eq!(teams, 2);
    assert_eq!(rows, 4);
});
