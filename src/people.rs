//! The people screen and everything it is built from.
//!
//! [`PeopleView`] owns the query and the loaded page. Fetches run as
//! background commands and report back through the view's message queue.

mod cards;
mod column;
mod command;
mod message;
mod pager;
mod query;
mod table;
mod tally;
#[cfg(test)]
mod testing;
mod view;

pub use query::QueryState;
pub use view::PeopleView;
