pub mod hub;

pub use hub::{Subscription, ViewerHub};
