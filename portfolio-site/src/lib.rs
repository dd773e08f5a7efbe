//! Portfolio site enhancements.
//!
//! The page is modelled as plain data: a root class list, the back to top
//! button style and the containers feed cards are mounted into. Records are
//! turned into [`card::Card`]s by pure functions, containers render them to
//! escaped html.
pub mod card;
pub mod dom;
pub mod feeds;
pub mod modality;
pub mod page;
pub mod scroll;

pub use page::{Container, InputEvent, Key, Page};
