mod aggregation;
mod dynamic;
mod expressions;
mod joins;
mod mutation;
mod ordering;
mod projections;
mod select;
mod subquery;
