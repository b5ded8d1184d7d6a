pub mod analysis;
pub mod contact;
pub mod credentials;
pub mod notifier;
