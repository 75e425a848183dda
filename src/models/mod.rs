//! Domain records displayed by the widgets.

mod customer;

pub use customer::{
    Customer, CustomerDraft, CustomerField, CustomerPatch, SeedError, Status, load_seed,
    parse_seed, sample_customers,
};
