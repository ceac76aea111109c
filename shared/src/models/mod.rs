//! Domain models
//!
//! Orders, role applications, and the read-mostly retailer/listing
//! reference entities.

pub mod application;
pub mod order;
pub mod retailer;

pub use application::{
    ApplicationDetails, ApplicationRole, ApplicationStatus, DriverDetails, PickupPointDetails,
    ReviewDecision, RoleApplication,
};
pub use order::{Order, OrderLine, OrderStatus, PickupOrderCreate};
pub use retailer::{Listing, Retailer};
