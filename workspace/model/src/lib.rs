//! Persistence layer of the reshipping back office: SeaORM entities for the
//! capital row, the money-bearing records (expenses, orders, baskets), and
//! the plain directories (customers, providers, sources, employees).

pub mod entities;
