pub mod order;
pub mod event;

pub use order::{Amount, Customer, DiscountCode, LineItem, Order};
pub use event::{
    CustomerProperties, Event, EventName, EventProperties, ItemSummary, OrderedProductProperties,
    PlacedOrderProperties,
};
