//! Navigation logic for colfm.
//!
//! [`path::PathNormalizer`] validates targets, [`state::NavigationState`]
//! holds the current [`location::Location`] and hidden-files flag,
//! [`breadcrumb::BreadcrumbBridge`] syncs the path editor, and [`filter`]
//! decides which entries are listed and in what order.

pub mod breadcrumb;
pub mod filter;
pub mod location;
pub mod path;
pub mod state;
