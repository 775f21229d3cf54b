pub mod events;
pub mod lifecycle;
pub mod models;
pub mod repository;

pub use events::VendorOrderNotification;
pub use lifecycle::LifecycleError;
pub use models::{
    Address, Cart, CartLineItem, FulfillmentResult, OrderStatus, Paise, PartitionError,
    PaymentMethod, PaymentStatus, SubOrder, UnresolvedItem, VendorGroup,
};
pub use repository::{CatalogLookup, OrderStore, VendorNotifier};
