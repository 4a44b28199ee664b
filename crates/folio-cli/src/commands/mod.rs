pub mod check;
pub mod dispatch;
pub mod migrate;
pub mod schema;
pub mod shared;
